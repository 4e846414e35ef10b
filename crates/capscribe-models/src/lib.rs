//! Shared data models for the CapScribe backend.
//!
//! This crate provides Serde-serializable types for:
//! - Caption lines and fetched transcripts
//! - Video ID validation
//! - Download filename sanitization

pub mod transcript;
pub mod utils;

// Re-export common types
pub use transcript::{CaptionLine, Transcript, TranscriptDoc};
pub use utils::{sanitize_filename, validate_video_id, VideoIdError, VideoIdResult};
