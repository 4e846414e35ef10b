//! Video probing via yt-dlp.
//!
//! The metadata/extraction call is `yt-dlp -J --skip-download`, optionally
//! authenticated with `--cookies <file>`. The JSON dump carries the video
//! title plus the uploaded (`subtitles`) and automatic (`automatic_captions`)
//! caption track maps.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{CaptionsError, CaptionsResult};

/// Watch page URL prefix.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Subset of the yt-dlp info dump this service consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoProbe {
    #[serde(default)]
    pub title: Option<String>,
    /// Uploaded caption tracks, keyed by language code.
    #[serde(default)]
    pub subtitles: HashMap<String, Vec<TrackFormat>>,
    /// Auto-generated caption tracks, keyed by language code.
    #[serde(default)]
    pub automatic_captions: HashMap<String, Vec<TrackFormat>>,
}

impl VideoProbe {
    /// Title, or the given fallback when the dump omits one.
    pub fn title_or(&self, fallback: &str) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Whether any caption track, uploaded or automatic, exists at all.
    pub fn has_any_tracks(&self) -> bool {
        !self.subtitles.is_empty() || !self.automatic_captions.is_empty()
    }
}

/// One downloadable rendition of a caption track.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackFormat {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
}

/// An English caption track chosen for download.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTrack {
    pub lang: String,
    pub url: String,
}

/// Probe a video's metadata and caption tracks.
///
/// Spawns yt-dlp and parses its JSON dump. A non-zero exit surfaces the
/// last stderr line as [`CaptionsError::ExtractionFailed`]. The call itself
/// carries no timeout; only the later track download is bounded.
pub async fn probe_video(
    video_id: &str,
    cookie_file: Option<&Path>,
) -> CaptionsResult<VideoProbe> {
    which::which("yt-dlp").map_err(|_| CaptionsError::YtDlpNotFound)?;

    let url = format!("{WATCH_URL_BASE}{video_id}");

    let mut cmd = Command::new("yt-dlp");
    cmd.args(["-J", "--skip-download", "--no-warnings"]);
    if let Some(cookies) = cookie_file {
        cmd.arg("--cookies").arg(cookies);
    }
    cmd.arg(&url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = cmd.output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);

        let message = stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("Unknown error");
        return Err(CaptionsError::extraction_failed(message));
    }

    let probe: VideoProbe = serde_json::from_slice(&output.stdout)?;
    Ok(probe)
}

/// Select an English caption track from a probe.
///
/// Uploaded and automatic track maps are merged (automatic entries win for
/// a shared language code, matching the original service behavior) and the
/// first language code starting with `en` is taken, in lexicographic order
/// so selection is deterministic. Within a track, a `json3` rendition is
/// preferred since that is the schema the timedtext parser understands;
/// otherwise the first listed rendition is used.
pub fn select_english_track(probe: &VideoProbe) -> Option<SelectedTrack> {
    let mut merged: BTreeMap<&str, &[TrackFormat]> = BTreeMap::new();
    for (lang, formats) in &probe.subtitles {
        merged.insert(lang, formats);
    }
    for (lang, formats) in &probe.automatic_captions {
        merged.insert(lang, formats);
    }

    for (lang, formats) in merged {
        if !lang.starts_with("en") {
            continue;
        }
        let format = formats
            .iter()
            .find(|f| f.ext.as_deref() == Some("json3"))
            .or_else(|| formats.first());
        if let Some(url) = format.and_then(|f| f.url.clone()) {
            return Some(SelectedTrack {
                lang: lang.to_string(),
                url,
            });
        }
    }
    None
}
