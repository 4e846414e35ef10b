//! Transcript types shared between the captions crate and the API.

use serde::{Deserialize, Serialize};

/// One flattened caption fragment: a start offset in seconds plus its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    /// Start time in seconds from the beginning of the video.
    pub start: f64,
    /// Raw caption text for this fragment.
    pub text: String,
}

impl CaptionLine {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// Result of a caption fetch.
///
/// `lines` is `None` when the video was reachable but carries no English
/// caption track. That is a legitimate outcome, not an error.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Video title as reported by the platform.
    pub title: String,
    /// Flattened caption lines, ordered by start time.
    pub lines: Option<Vec<CaptionLine>>,
}

impl Transcript {
    /// Whether any caption lines were found.
    pub fn has_captions(&self) -> bool {
        self.lines.as_ref().is_some_and(|l| !l.is_empty())
    }
}

/// Title plus segmented paragraphs, the unit every renderer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptDoc {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl TranscriptDoc {
    pub fn new(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs,
        }
    }

    /// Plain-text rendition: paragraphs joined by blank lines.
    pub fn to_plain_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}
