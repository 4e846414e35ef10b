//! Document rendering for the download endpoints.
//!
//! Each renderer consumes a [`TranscriptDoc`] (title plus ordered
//! paragraphs) and produces a byte payload. Plain text lives on
//! `TranscriptDoc::to_plain_text`; PDF and DOCX are produced here.

mod docx;
mod pdf;

pub use docx::render_docx;
pub use pdf::render_pdf;

use thiserror::Error;

/// Result type for document rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while composing a download document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF composition failed: {0}")]
    Pdf(String),

    #[error("DOCX composition failed: {0}")]
    Docx(String),
}
