//! yt-dlp CLI wrapper for caption retrieval.
//!
//! This crate provides:
//! - Cookie file discovery and move-to-front rotation
//! - Video probing via `yt-dlp -J` with optional cookie authentication
//! - English caption track selection and timedtext (json3) parsing
//! - Greedy paragraph segmentation over timestamped caption lines

pub mod cookies;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod segment;
pub mod timedtext;

pub use cookies::CookiePool;
pub use error::{CaptionsError, CaptionsResult};
pub use extract::{
    probe_video, select_english_track, SelectedTrack, TrackFormat, VideoProbe, WATCH_URL_BASE,
};
pub use fetch::{CookieHealth, TranscriptFetcher, HEALTHCHECK_VIDEO_ID};
pub use segment::{segment, SegmentOptions, DEFAULT_MAX_CHARS, DEFAULT_MAX_GAP_SECS};
pub use timedtext::{flatten_events, CaptionEvent, TimedText};
