//! PDF composition with printpdf.
//!
//! Uses the builtin Helvetica fonts so no font files ship with the binary.
//! printpdf has no automatic layout, so paragraphs are word-wrapped here
//! and written line by line, starting a new US Letter page when the cursor
//! reaches the bottom margin.

use capscribe_models::TranscriptDoc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use super::{RenderError, RenderResult};

// US Letter
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 20.0;

const TITLE_PT: f32 = 16.0;
const BODY_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const PARAGRAPH_GAP_MM: f32 = 4.0;

/// Approximate character budget per line for 11pt Helvetica inside the
/// margins. Close enough for caption text; long unbroken tokens overflow.
const WRAP_WIDTH_CHARS: usize = 90;

struct PageCursor {
    doc: PdfDocumentReference,
    layer: printpdf::PdfLayerReference,
    y_mm: f32,
}

impl PageCursor {
    fn write_line(&mut self, text: &str, size_pt: f32, font: &IndirectFontRef) {
        if self.y_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        self.layer
            .use_text(text, size_pt, Mm(MARGIN_MM), Mm(self.y_mm), font);
        self.y_mm -= LINE_HEIGHT_MM;
    }
}

/// Greedy word wrap at a character budget.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render a transcript as a PDF: bold title, one block per paragraph.
pub fn render_pdf(doc: &TranscriptDoc) -> RenderResult<Vec<u8>> {
    let (pdf, page, layer) = PdfDocument::new(
        &doc.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );

    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let first_layer = pdf.get_page(page).get_layer(layer);
    let mut cursor = PageCursor {
        doc: pdf,
        layer: first_layer,
        y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    for line in wrap(&doc.title, WRAP_WIDTH_CHARS - 20) {
        cursor.write_line(&line, TITLE_PT, &bold);
    }
    cursor.y_mm -= PARAGRAPH_GAP_MM;

    for paragraph in &doc.paragraphs {
        for line in wrap(paragraph, WRAP_WIDTH_CHARS) {
            cursor.write_line(&line, BODY_PT, &regular);
        }
        cursor.y_mm -= PARAGRAPH_GAP_MM;
    }

    cursor
        .doc
        .save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}
