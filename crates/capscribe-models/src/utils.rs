//! Validation and sanitization helpers shared across the backend.

use thiserror::Error;

/// Errors that can occur during video ID validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoIdError {
    #[error("Video ID has invalid length (expected 11 characters)")]
    InvalidLength,
    #[error("Video ID contains invalid characters")]
    InvalidCharacters,
}

/// Result type for video ID validation.
pub type VideoIdResult<T> = Result<T, VideoIdError>;

/// Validate a YouTube video ID taken from a request path.
///
/// Video IDs are exactly 11 characters of alphanumerics, hyphens, and
/// underscores. Returns the trimmed ID on success.
pub fn validate_video_id(id: &str) -> VideoIdResult<&str> {
    let id = id.trim();

    if id.len() != 11 {
        return Err(VideoIdError::InvalidLength);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(VideoIdError::InvalidCharacters);
    }

    Ok(id)
}

/// Sanitize a video title into a safe download filename stem.
///
/// Keeps alphanumerics, spaces, hyphens, underscores, and periods; every
/// other character becomes an underscore.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
