//! Error types for caption retrieval.

use thiserror::Error;

/// Result type for caption operations.
pub type CaptionsResult<T> = Result<T, CaptionsError>;

/// Errors that can occur while fetching captions.
#[derive(Debug, Error)]
pub enum CaptionsError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("Extraction failed: {message}")]
    ExtractionFailed { message: String },

    #[error("Caption track download failed: {0}")]
    TrackDownload(#[from] reqwest::Error),

    #[error("Caption track parse error: {0}")]
    TrackParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptionsError {
    /// Create an extraction failure error.
    pub fn extraction_failed(message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
        }
    }

    /// Best-effort check for cookie/login rejections.
    ///
    /// The platform exposes no structured error code through the CLI
    /// surface, so this matches the message substrings yt-dlp is known to
    /// emit when a logged-in session is required or stale.
    pub fn is_cookie_rejection(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("sign in")
            || message.contains("not a bot")
            || message.contains("cookies")
            || message.contains("private")
    }

    /// Message suitable for API consumers.
    ///
    /// Cookie rejections are reworded into operator guidance instead of the
    /// raw platform error.
    pub fn user_message(&self) -> String {
        if self.is_cookie_rejection() {
            "YouTube cookies may be expired/invalid. Please check /cookies/status \
             and update cookies_*.txt on the server."
                .to_string()
        } else {
            self.to_string()
        }
    }
}
