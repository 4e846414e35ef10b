//! Transcript JSON endpoint.

use axum::extract::{Path, Query, State};
use axum::Json;
use capscribe_captions::SegmentOptions;
use capscribe_models::TranscriptDoc;
use serde::{Deserialize, Serialize};

use crate::handlers::fetch_doc;
use crate::state::AppState;

/// Optional segmentation thresholds, defaulting to (300 chars, 8 seconds).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SegmentQuery {
    pub max_chars: Option<usize>,
    pub max_gap: Option<f64>,
}

impl SegmentQuery {
    pub fn options(&self) -> SegmentOptions {
        let defaults = SegmentOptions::default();
        SegmentOptions {
            max_chars: self.max_chars.unwrap_or(defaults.max_chars),
            max_gap_secs: self.max_gap.unwrap_or(defaults.max_gap_secs),
        }
    }
}

/// JSON response envelope.
///
/// Failures are carried in-band: HTTP 200 with `status: "error"` and a
/// message, so clients never see a framework error page.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<ParagraphText>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParagraphText {
    pub text: String,
}

impl TranscriptResponse {
    pub fn success(doc: TranscriptDoc) -> Self {
        Self {
            status: "success",
            video_title: Some(doc.title),
            language: Some("en"),
            transcript: Some(
                doc.paragraphs
                    .into_iter()
                    .map(|text| ParagraphText { text })
                    .collect(),
            ),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            video_title: None,
            language: None,
            transcript: None,
            message: Some(message.into()),
        }
    }
}

/// Get a video's transcript as paragraphs.
///
/// GET /transcript/{video_id}?max_chars=&max_gap=
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(query): Query<SegmentQuery>,
) -> Json<TranscriptResponse> {
    match fetch_doc(&state, &video_id, query.options()).await {
        Ok(doc) => Json(TranscriptResponse::success(doc)),
        Err(message) => Json(TranscriptResponse::error(message)),
    }
}
