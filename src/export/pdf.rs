//! PDF sink.
//!
//! The exporter posts the PDF page to a [`PdfConverter`] and stores the returned bytes
//! as `invoice.pdf` through a [`DownloadTarget`]. Only one export runs at a time: a
//! request made while another is generating is rejected with `ExportInProgress`, and
//! the generating flag is released on every exit path.

use crate::{
    core::InvoiceDocument,
    errors::{Error, Result},
    export::pdf_page,
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::instrument;

/// File name given to every exported invoice.
pub const PDF_FILE_NAME: &str = "invoice.pdf";

/// Renders an HTML page to PDF bytes.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Converts a complete HTML page into PDF bytes.
    async fn convert(&self, html: &str) -> Result<Vec<u8>>;
}

/// Receives finished downloads.
#[async_trait]
pub trait DownloadTarget: Send + Sync {
    /// Stores `bytes` under `file_name` and returns where they ended up.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves downloads into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadTarget for DirectoryDownloads {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// Clears the generating flag when dropped.
struct GeneratingGuard<'a>(&'a AtomicBool);

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight PDF exporter.
#[derive(Debug)]
pub struct PdfExporter<C, D> {
    converter: C,
    target: D,
    generating: AtomicBool,
}

impl<C: PdfConverter, D: DownloadTarget> PdfExporter<C, D> {
    pub const fn new(converter: C, target: D) -> Self {
        Self {
            converter,
            target,
            generating: AtomicBool::new(false),
        }
    }

    /// True while an export is in flight.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// Converts `document` to PDF and saves it as [`PDF_FILE_NAME`].
    ///
    /// # Errors
    /// - `ExportInProgress` if another export is still generating
    /// - converter errors (`Unauthorized`, `NetworkFailure`, `ServiceFailure`)
    /// - I/O errors from the download target
    ///
    /// Nothing is saved when conversion fails.
    #[instrument(skip(self, document))]
    pub async fn export(&self, document: &InvoiceDocument) -> Result<PathBuf> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("PDF export requested while another is generating");
            return Err(Error::ExportInProgress);
        }
        let _guard = GeneratingGuard(&self.generating);

        tracing::info!("Generating PDF...");
        let page = pdf_page(&document.to_html()?);
        let bytes = self
            .converter
            .convert(&page)
            .await
            .inspect_err(|e| tracing::error!("Error generating PDF: {}", e))?;

        let path = self.target.save(PDF_FILE_NAME, &bytes).await?;
        tracing::info!("PDF generated successfully: {}", path.display());
        Ok(path)
    }
}
