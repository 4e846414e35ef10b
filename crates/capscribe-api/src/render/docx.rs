//! DOCX composition with docx-rs.

use capscribe_models::TranscriptDoc;
use docx_rs::{Docx, Paragraph, Run};

use super::{RenderError, RenderResult};

// docx-rs sizes are half-points
const TITLE_SIZE: usize = 32;

/// Render a transcript as a DOCX: bold title, one paragraph per block.
pub fn render_docx(doc: &TranscriptDoc) -> RenderResult<Vec<u8>> {
    let mut builder = Docx::new().add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(doc.title.as_str()).bold().size(TITLE_SIZE)),
    );

    for paragraph in &doc.paragraphs {
        builder = builder
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph.as_str())));
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    builder
        .build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;

    Ok(buffer.into_inner())
}
