//! Transcript download endpoints (TXT, PDF, DOCX).
//!
//! Successful responses are attachments named after the sanitized video
//! title. Failures come back as an error-message payload under the
//! endpoint's media type, never as a framework error page.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use capscribe_captions::SegmentOptions;
use capscribe_models::sanitize_filename;
use tracing::error;

use crate::handlers::fetch_doc;
use crate::render;
use crate::state::AppState;

const MEDIA_TYPE_TXT: &str = "text/plain; charset=utf-8";
const MEDIA_TYPE_PDF: &str = "application/pdf";
const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Build an attachment response with a sanitized filename.
fn attachment(bytes: Vec<u8>, title: &str, ext: &str, media_type: &'static str) -> Response {
    let filename = format!("{}.{}", sanitize_filename(title), ext);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Error payload under the given media type, still HTTP 200.
fn error_payload(message: String, media_type: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, media_type)],
        message.into_bytes(),
    )
        .into_response()
}

/// Download the transcript as plain text.
///
/// GET /transcript/{video_id}/download/txt
pub async fn download_txt(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Response {
    match fetch_doc(&state, &video_id, SegmentOptions::default()).await {
        Ok(doc) => attachment(
            doc.to_plain_text().into_bytes(),
            &doc.title,
            "txt",
            MEDIA_TYPE_TXT,
        ),
        Err(message) => error_payload(message, MEDIA_TYPE_TXT),
    }
}

/// Download the transcript as a PDF.
///
/// GET /transcript/{video_id}/download/pdf
pub async fn download_pdf(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Response {
    let doc = match fetch_doc(&state, &video_id, SegmentOptions::default()).await {
        Ok(doc) => doc,
        Err(message) => return error_payload(message, MEDIA_TYPE_PDF),
    };

    match render::render_pdf(&doc) {
        Ok(bytes) => attachment(bytes, &doc.title, "pdf", MEDIA_TYPE_PDF),
        Err(err) => {
            error!(video_id = %video_id, error = %err, "PDF rendering failed");
            error_payload(err.to_string(), MEDIA_TYPE_PDF)
        }
    }
}

/// Download the transcript as a DOCX document.
///
/// GET /transcript/{video_id}/download/docx
pub async fn download_docx(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Response {
    let doc = match fetch_doc(&state, &video_id, SegmentOptions::default()).await {
        Ok(doc) => doc,
        Err(message) => return error_payload(message, MEDIA_TYPE_DOCX),
    };

    match render::render_docx(&doc) {
        Ok(bytes) => attachment(bytes, &doc.title, "docx", MEDIA_TYPE_DOCX),
        Err(err) => {
            error!(video_id = %video_id, error = %err, "DOCX rendering failed");
            error_payload(err.to_string(), MEDIA_TYPE_DOCX)
        }
    }
}
