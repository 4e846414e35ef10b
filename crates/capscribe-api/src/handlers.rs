//! Request handlers.

pub mod cookies;
pub mod downloads;
pub mod health;
pub mod transcript;

pub use cookies::*;
pub use downloads::*;
pub use health::*;
pub use transcript::*;

use capscribe_captions::{segment, SegmentOptions};
use capscribe_models::{validate_video_id, TranscriptDoc};

use crate::state::AppState;

/// Message returned when a video carries no usable English captions.
pub(crate) const NO_CAPTIONS_MESSAGE: &str = "No English captions found";

/// Fetch a transcript and segment it into a renderable document.
///
/// Every failure mode collapses to a user-facing message: invalid video
/// IDs, fetch errors (reworded for cookie rejections), and the legitimate
/// no-captions outcome. The boundary endpoints wrap that message in their
/// own payload shape and never surface a framework error page.
pub(crate) async fn fetch_doc(
    state: &AppState,
    video_id: &str,
    opts: SegmentOptions,
) -> Result<TranscriptDoc, String> {
    let video_id = validate_video_id(video_id).map_err(|e| e.to_string())?;

    let transcript = state
        .fetcher
        .fetch(video_id)
        .await
        .map_err(|e| e.user_message())?;

    let Some(lines) = transcript.lines else {
        return Err(NO_CAPTIONS_MESSAGE.to_string());
    };

    let paragraphs = segment(&lines, opts);
    if paragraphs.is_empty() {
        return Err(NO_CAPTIONS_MESSAGE.to_string());
    }

    Ok(TranscriptDoc::new(transcript.title, paragraphs))
}
