//! Export sinks - deliver an assembled invoice to paper or PDF.
//!
//! Both sinks take the same [`InvoiceDocument`](crate::core::InvoiceDocument) body and
//! wrap it in a complete HTML page with their own fixed stylesheet.

/// PDF rendering through the backend and download to disk
pub mod pdf;
/// Print preview surface and print invocation
pub mod print;

pub use pdf::{DirectoryDownloads, PdfConverter, PdfExporter};
pub use print::{FilePreviewFactory, PrintOutcome, PrintSink};

const PAGE_TITLE: &str = "Invoicing Preview";

const PRINT_STYLES: &str = r#"
body, h1, p, table { margin: 10px; padding: 0; border-radius: 5px; }
body { font-family: "Inter", sans-serif; font-weight: 400; line-height: 1; color: #333; }
.invoice-header { background-color: #f2f2f2; padding: 10px; border-bottom: 1px solid #ccc; }
.invoice-header h1 { margin: 0; text-transform: uppercase; }
.invoice-header p { margin: 5px 0; color: #666; font-family: "Nunito", sans-serif; font-weight: 300; }
.customer-details { margin-top: 10px; }
table { width: 75%; border-collapse: collapse; border-radius: 5px; margin: 0 20px; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; font-weight: bold; }
img { max-width: 160px; height: auto; }
"#;

const PDF_STYLES: &str = r#"
body, h1, p, table { margin: 10px; padding: 0; }
body { font-family: Arial, sans-serif; line-height: 1; color: #333; }
.invoice-header { background-color: #f2f2f2; padding: 10px; border-bottom: 1px solid #ccc; }
.invoice-header h1 { margin: 0; }
.invoice-header p { margin: 5px 0; color: #666; }
.customer-details { margin-top: 10px; }
table { width: 70%; border-collapse: collapse; border-radius: 5px; margin: 0 20px; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; font-weight: bold; }
img { max-width: 150px; height: auto; }
"#;

/// Fires the print dialog once the page reports it has finished loading.
const PRINT_ON_LOAD: &str =
    "<script>window.addEventListener(\"load\", function () { window.print(); });</script>";

fn page(styles: &str, body: &str, trailer: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n<style>{styles}</style>\n</head>\n<body>\n{body}{trailer}\n</body>\n</html>\n"
    )
}

/// Full page for the print preview.
#[must_use]
pub fn print_page(body: &str) -> String {
    page(PRINT_STYLES, body, PRINT_ON_LOAD)
}

/// Full page posted to the PDF renderer.
#[must_use]
pub fn pdf_page(body: &str) -> String {
    page(PDF_STYLES, body, "")
}
