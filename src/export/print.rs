//! Print sink.
//!
//! The sink opens a rendering surface, writes the print page, waits for the surface to
//! signal that rendering finished, asks it to print and closes it. Printing is best
//! effort: a failed print is logged and reported as [`PrintOutcome::Failed`], because
//! the preview stays available for a manual retry. The surface is closed on every path.

use crate::{
    core::InvoiceDocument,
    errors::{Error, Result},
    export::print_page,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// File name of the preview written by [`FilePreviewSurface`].
pub const PREVIEW_FILE_NAME: &str = "invoice-preview.html";

/// Somewhere a print page can be rendered and printed from.
#[async_trait]
pub trait PrintSurface: Send {
    /// Loads the complete page into the surface.
    async fn write(&mut self, html: &str) -> Result<()>;

    /// Resolves once the written page has finished rendering.
    async fn rendered(&mut self) -> Result<()>;

    /// Invokes the platform print action.
    async fn print(&mut self) -> Result<()>;

    /// Releases the surface.
    async fn close(&mut self);
}

/// Opens fresh print surfaces.
pub trait SurfaceFactory: Send + Sync {
    /// Opens a fresh surface for one print request.
    fn open(&self) -> Result<Box<dyn PrintSurface>>;
}

/// Result of a print request that got as far as rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    /// Print action was invoked
    Printed,
    /// Print action failed; the preview is still available
    Failed,
}

/// Synchronous-feeling print sink over a [`SurfaceFactory`].
#[derive(Debug)]
pub struct PrintSink<F> {
    factory: F,
    render_timeout: Duration,
}

impl<F: SurfaceFactory> PrintSink<F> {
    pub const fn new(factory: F, render_timeout: Duration) -> Self {
        Self {
            factory,
            render_timeout,
        }
    }

    /// Renders and prints `document`.
    ///
    /// # Errors
    /// Returns an error only when the invoice cannot be rendered, the surface cannot be
    /// opened or the page cannot be written to it. Print failures are reported through
    /// [`PrintOutcome::Failed`].
    pub async fn print(&self, document: &InvoiceDocument) -> Result<PrintOutcome> {
        let page = print_page(&document.to_html()?);
        let mut surface = self.factory.open()?;

        if let Err(e) = surface.write(&page).await {
            tracing::error!("Failed to load print preview: {}", e);
            surface.close().await;
            return Err(e);
        }

        match tokio::time::timeout(self.render_timeout, surface.rendered()).await {
            Ok(Ok(())) => tracing::debug!("Print preview rendered"),
            Ok(Err(e)) => tracing::warn!("Print preview did not confirm rendering: {}", e),
            Err(_) => tracing::warn!(
                "Print preview still rendering after {:?}; printing anyway",
                self.render_timeout
            ),
        }

        let outcome = match surface.print().await {
            Ok(()) => {
                tracing::info!("Printing initiated");
                PrintOutcome::Printed
            }
            Err(e) => {
                tracing::error!("Error during printing: {}", e);
                PrintOutcome::Failed
            }
        };

        surface.close().await;
        Ok(outcome)
    }
}

/// Opens [`FilePreviewSurface`]s in an output directory.
#[derive(Debug, Clone)]
pub struct FilePreviewFactory {
    dir: PathBuf,
    print_command: Option<Vec<String>>,
}

impl FilePreviewFactory {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, print_command: Option<Vec<String>>) -> Self {
        Self {
            dir: dir.into(),
            print_command,
        }
    }

    /// Path the preview page is written to.
    #[must_use]
    pub fn preview_path(&self) -> PathBuf {
        self.dir.join(PREVIEW_FILE_NAME)
    }
}

impl SurfaceFactory for FilePreviewFactory {
    fn open(&self) -> Result<Box<dyn PrintSurface>> {
        Ok(Box::new(FilePreviewSurface {
            path: self.preview_path(),
            print_command: self.print_command.clone(),
            file: None,
        }))
    }
}

/// Print surface backed by an HTML file on disk.
///
/// Rendering is complete once the file is flushed to disk. Printing runs the configured
/// print command with the preview path appended; without a command the page prints
/// itself when opened in a browser.
#[derive(Debug)]
pub struct FilePreviewSurface {
    path: PathBuf,
    print_command: Option<Vec<String>>,
    file: Option<tokio::fs::File>,
}

impl FilePreviewSurface {
    /// Location of the preview file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PrintSurface for FilePreviewSurface {
    async fn write(&mut self, html: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::File::create(&self.path).await?;
        file.write_all(html.as_bytes()).await?;
        self.file = Some(file);
        Ok(())
    }

    async fn rendered(&mut self) -> Result<()> {
        let file = self.file.as_mut().ok_or_else(|| {
            Error::Io(std::io::Error::other(format!(
                "print preview {} has not been written yet",
                self.path.display()
            )))
        })?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn print(&mut self) -> Result<()> {
        let Some((program, args)) = self
            .print_command
            .as_ref()
            .and_then(|command| command.split_first())
        else {
            tracing::info!(
                "Print-ready preview written to {}; open it to print",
                self.path.display()
            );
            return Ok(());
        };

        let status = tokio::process::Command::new(program)
            .args(args)
            .arg(&self.path)
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Io(std::io::Error::other(format!(
                "print command '{program}' exited with {status}"
            ))))
        }
    }

    async fn close(&mut self) {
        self.file = None;
        tracing::debug!("Closed print preview {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct SurfaceLog {
        written: Option<String>,
        printed: bool,
        closed: bool,
    }

    struct ScriptedSurface {
        log: Arc<Mutex<SurfaceLog>>,
        fail_write: bool,
        fail_print: bool,
        never_renders: bool,
    }

    #[async_trait]
    impl PrintSurface for ScriptedSurface {
        async fn write(&mut self, html: &str) -> Result<()> {
            if self.fail_write {
                return Err(Error::Io(std::io::Error::other("surface gone")));
            }
            self.log.lock().unwrap().written = Some(html.to_string());
            Ok(())
        }

        async fn rendered(&mut self) -> Result<()> {
            if self.never_renders {
                std::future::pending::<()>().await;
            }
            Ok(())
        }

        async fn print(&mut self) -> Result<()> {
            if self.fail_print {
                return Err(Error::Io(std::io::Error::other("printer offline")));
            }
            self.log.lock().unwrap().printed = true;
            Ok(())
        }

        async fn close(&mut self) {
            self.log.lock().unwrap().closed = true;
        }
    }

    #[derive(Default)]
    struct ScriptedFactory {
        log: Arc<Mutex<SurfaceLog>>,
        fail_write: bool,
        fail_print: bool,
        never_renders: bool,
    }

    impl SurfaceFactory for ScriptedFactory {
        fn open(&self) -> Result<Box<dyn PrintSurface>> {
            Ok(Box::new(ScriptedSurface {
                log: Arc::clone(&self.log),
                fail_write: self.fail_write,
                fail_print: self.fail_print,
                never_renders: self.never_renders,
            }))
        }
    }

    #[tokio::test]
    async fn test_print_writes_page_and_closes() {
        let factory = ScriptedFactory::default();
        let log = Arc::clone(&factory.log);
        let sink = PrintSink::new(factory, Duration::from_secs(1));
        let document = test_invoice();

        let outcome = sink.print(&document).await.unwrap();

        assert_eq!(outcome, PrintOutcome::Printed);
        let log = log.lock().unwrap();
        assert!(log.printed);
        assert!(log.closed);
        assert!(log.written.as_ref().unwrap().contains(&document.to_html().unwrap()));
    }

    #[tokio::test]
    async fn test_print_failure_is_logged_not_escalated() {
        let factory = ScriptedFactory {
            fail_print: true,
            ..Default::default()
        };
        let log = Arc::clone(&factory.log);
        let sink = PrintSink::new(factory, Duration::from_secs(1));

        let outcome = sink.print(&test_invoice()).await.unwrap();

        assert_eq!(outcome, PrintOutcome::Failed);
        assert!(log.lock().unwrap().closed);
    }

    #[tokio::test]
    async fn test_write_failure_closes_surface() {
        let factory = ScriptedFactory {
            fail_write: true,
            ..Default::default()
        };
        let log = Arc::clone(&factory.log);
        let sink = PrintSink::new(factory, Duration::from_secs(1));

        assert!(sink.print(&test_invoice()).await.is_err());
        let log = log.lock().unwrap();
        assert!(log.closed);
        assert!(!log.printed);
    }

    #[tokio::test]
    async fn test_slow_rendering_still_prints() {
        let factory = ScriptedFactory {
            never_renders: true,
            ..Default::default()
        };
        let log = Arc::clone(&factory.log);
        let sink = PrintSink::new(factory, Duration::from_millis(20));

        let outcome = sink.print(&test_invoice()).await.unwrap();

        assert_eq!(outcome, PrintOutcome::Printed);
        assert!(log.lock().unwrap().closed);
    }

    #[tokio::test]
    async fn test_file_preview_surface_writes_preview() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FilePreviewFactory::new(dir.path(), None);
        let preview = factory.preview_path();
        let sink = PrintSink::new(factory, Duration::from_secs(1));
        let document = test_invoice();

        let outcome = sink.print(&document).await.unwrap();

        assert_eq!(outcome, PrintOutcome::Printed);
        let written = std::fs::read_to_string(preview).unwrap();
        assert!(written.contains(&document.to_html().unwrap()));
        assert!(written.contains("window.print()"));
    }

    #[tokio::test]
    async fn test_rendered_before_write_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FilePreviewFactory::new(dir.path(), None);
        let mut surface = factory.open().unwrap();

        let err = surface.rendered().await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("has not been written yet"));
    }

    #[tokio::test]
    async fn test_failing_print_command_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FilePreviewFactory::new(
            dir.path(),
            Some(vec!["decor-orders-no-such-printer".to_string()]),
        );
        let sink = PrintSink::new(factory, Duration::from_secs(1));

        let outcome = sink.print(&test_invoice()).await.unwrap();

        assert_eq!(outcome, PrintOutcome::Failed);
        assert!(dir.path().join(PREVIEW_FILE_NAME).exists());
    }
}
