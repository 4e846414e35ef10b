//! Transcript fetching with cookie rotation.
//!
//! Each fetch walks the ordered cookie candidates, then falls back to
//! unauthenticated access. Attempts are sequential; a failing cookie is
//! logged and skipped, never aborting the whole operation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use capscribe_models::{CaptionLine, Transcript};
use tracing::{debug, info, warn};

use crate::cookies::CookiePool;
use crate::error::{CaptionsError, CaptionsResult};
use crate::extract::{self, select_english_track};
use crate::timedtext::{self, TimedText};

/// Timeout for the caption track download. The yt-dlp probe itself is
/// unbounded.
pub const TRACK_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Known-public video used by the cookie health check.
pub const HEALTHCHECK_VIDEO_ID: &str = "dQw4w9WgXcQ";

/// Outcome of one credentialed (or credential-less) attempt.
enum Attempt {
    /// Captions found and downloaded.
    Captions {
        title: String,
        lines: Vec<CaptionLine>,
    },
    /// The probe worked but yielded no English caption track.
    NoCaptions { title: String },
    /// The attempt itself failed.
    Failed(CaptionsError),
}

/// Health of a single cookie file, as seen by the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieHealth {
    Working,
    NoCaptions,
    Failed(String),
}

/// Fetches transcripts, rotating through the cookie pool.
#[derive(Debug, Clone)]
pub struct TranscriptFetcher {
    pool: Arc<CookiePool>,
    http: reqwest::Client,
}

impl TranscriptFetcher {
    pub fn new(pool: Arc<CookiePool>) -> Self {
        Self {
            pool,
            http: reqwest::Client::new(),
        }
    }

    /// The cookie pool backing this fetcher.
    pub fn pool(&self) -> &Arc<CookiePool> {
        &self.pool
    }

    /// Fetch a video's transcript.
    ///
    /// Tries each cookie candidate in order, promoting the one that
    /// succeeds. If every candidate is exhausted, retries once without
    /// cookies; a captionless result there is returned as
    /// `Transcript { lines: None }`, while an error surfaces to the caller.
    pub async fn fetch(&self, video_id: &str) -> CaptionsResult<Transcript> {
        for cookie in self.pool.ordered_candidates() {
            let path = self.pool.cookie_path(&cookie);
            match self.attempt(video_id, Some(&path)).await {
                Attempt::Captions { title, lines } => {
                    info!(video_id = %video_id, cookie = %cookie, "Fetched captions");
                    self.pool.promote(&cookie);
                    return Ok(Transcript {
                        title,
                        lines: Some(lines),
                    });
                }
                Attempt::NoCaptions { .. } => {
                    debug!(cookie = %cookie, "Cookie worked but no English captions, trying next");
                }
                Attempt::Failed(err) => {
                    warn!(cookie = %cookie, error = %err, "Cookie attempt failed");
                }
            }
        }

        // Last resort: public access without cookies.
        match self.attempt(video_id, None).await {
            Attempt::Captions { title, lines } => {
                info!(video_id = %video_id, "Fetched captions without cookies");
                Ok(Transcript {
                    title,
                    lines: Some(lines),
                })
            }
            Attempt::NoCaptions { title } => {
                info!(video_id = %video_id, "No English captions available");
                Ok(Transcript { title, lines: None })
            }
            Attempt::Failed(err) => Err(err),
        }
    }

    async fn attempt(&self, video_id: &str, cookie_file: Option<&Path>) -> Attempt {
        let probe = match extract::probe_video(video_id, cookie_file).await {
            Ok(probe) => probe,
            Err(err) => return Attempt::Failed(err),
        };

        let title = probe.title_or(video_id);

        let Some(track) = select_english_track(&probe) else {
            return Attempt::NoCaptions { title };
        };

        match self.download_track(&track.url).await {
            Ok(lines) => Attempt::Captions { title, lines },
            Err(err) => Attempt::Failed(err),
        }
    }

    /// Download and flatten a caption track.
    pub async fn download_track(&self, url: &str) -> CaptionsResult<Vec<CaptionLine>> {
        let response = self
            .http
            .get(url)
            .timeout(TRACK_DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let timed: TimedText = response.json().await?;
        Ok(timedtext::flatten_events(&timed))
    }

    /// Probe one cookie file against a known-public video.
    pub async fn check_cookie(&self, video_id: &str, cookie: &str) -> CookieHealth {
        let path = self.pool.cookie_path(cookie);
        match extract::probe_video(video_id, Some(&path)).await {
            Ok(probe) if probe.has_any_tracks() => CookieHealth::Working,
            Ok(_) => CookieHealth::NoCaptions,
            Err(err) => CookieHealth::Failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> (TempDir, TranscriptFetcher) {
        let dir = TempDir::new().unwrap();
        let pool = Arc::new(CookiePool::new(dir.path()));
        (dir, TranscriptFetcher::new(pool))
    }

    // Rotation tests swap in a scripted yt-dlp via PATH; PATH and the
    // script's env knobs are process-global, so those tests serialize.
    static YT_DLP_LOCK: Mutex<()> = Mutex::new(());

    /// Fake yt-dlp: behavior is keyed on the cookie file's content
    /// ("fail" / "ok" / "other-lang"), or on YTDLP_PUBLIC_MODE for the
    /// cookie-less call. "ok" advertises an en track at YTDLP_TRACK_URL.
    const YT_DLP_SCRIPT: &str = r#"#!/bin/sh
cookie=""
prev=""
for arg in "$@"; do
  [ "$prev" = "--cookies" ] && cookie="$arg"
  prev="$arg"
done
if [ -n "$cookie" ]; then
  mode="$(cat "$cookie")"
else
  mode="${YTDLP_PUBLIC_MODE:-nocaps}"
fi
case "$mode" in
  fail*)
    echo "ERROR: [youtube] Sign in to confirm you're not a bot" >&2
    exit 1
    ;;
  other-lang*)
    printf '{"title":"Stub Video","subtitles":{"fr":[{"url":"http://localhost/fr","ext":"json3"}]},"automatic_captions":{}}'
    ;;
  ok*)
    printf '{"title":"Stub Video","subtitles":{},"automatic_captions":{"en":[{"url":"%s","ext":"json3"}]}}' "$YTDLP_TRACK_URL"
    ;;
  *)
    printf '{"title":"Stub Video","subtitles":{},"automatic_captions":{}}'
    ;;
esac
"#;

    struct ScriptedYtDlp {
        _dir: TempDir,
        saved_path: std::ffi::OsString,
    }

    impl ScriptedYtDlp {
        fn install() -> Self {
            let dir = TempDir::new().unwrap();
            let script = dir.path().join("yt-dlp");
            std::fs::write(&script, YT_DLP_SCRIPT).unwrap();
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

            let saved_path = std::env::var_os("PATH").unwrap_or_default();
            let mut new_path = dir.path().as_os_str().to_os_string();
            new_path.push(":");
            new_path.push(&saved_path);
            std::env::set_var("PATH", new_path);

            Self {
                _dir: dir,
                saved_path,
            }
        }
    }

    impl Drop for ScriptedYtDlp {
        fn drop(&mut self) {
            std::env::set_var("PATH", &self.saved_path);
            std::env::remove_var("YTDLP_PUBLIC_MODE");
            std::env::remove_var("YTDLP_TRACK_URL");
        }
    }

    #[tokio::test]
    async fn empty_pool_and_other_language_captions_yield_no_lines() {
        let _guard = YT_DLP_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _yt_dlp = ScriptedYtDlp::install();
        std::env::set_var("YTDLP_PUBLIC_MODE", "other-lang");

        let (_dir, fetcher) = fetcher();
        let transcript = fetcher.fetch("dQw4w9WgXcQ").await.unwrap();

        // A legitimate captionless outcome, not an error
        assert_eq!(transcript.title, "Stub Video");
        assert!(transcript.lines.is_none());
    }

    #[tokio::test]
    async fn rotation_skips_failing_cookie_and_promotes_the_working_one() {
        let _guard = YT_DLP_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _yt_dlp = ScriptedYtDlp::install();

        let server = MockServer::start().await;
        let body = r#"{"events": [{"tStartMs": 0, "segs": [{"utf8": "Hello"}]}]}"#;
        Mock::given(method("GET"))
            .and(path("/timedtext"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;
        std::env::set_var("YTDLP_TRACK_URL", format!("{}/timedtext", server.uri()));

        let (dir, fetcher) = fetcher();
        std::fs::write(dir.path().join("cookies_a.txt"), "fail").unwrap();
        std::fs::write(dir.path().join("cookies_b.txt"), "ok").unwrap();

        let transcript = fetcher.fetch("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(transcript.title, "Stub Video");
        assert_eq!(transcript.lines.unwrap()[0].text, "Hello");
        // Only the cookie that worked moves to the front
        assert_eq!(fetcher.pool().preferred(), vec!["cookies_b.txt"]);
    }

    #[tokio::test]
    async fn exhausted_rotation_surfaces_the_fallback_error() {
        let _guard = YT_DLP_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _yt_dlp = ScriptedYtDlp::install();
        std::env::set_var("YTDLP_PUBLIC_MODE", "fail");

        let (dir, fetcher) = fetcher();
        std::fs::write(dir.path().join("cookies_a.txt"), "fail").unwrap();

        let err = fetcher.fetch("dQw4w9WgXcQ").await.unwrap_err();

        assert!(matches!(err, CaptionsError::ExtractionFailed { .. }));
        assert!(err.is_cookie_rejection());
        // The failing cookie is never promoted
        assert!(fetcher.pool().preferred().is_empty());
    }

    #[tokio::test]
    async fn download_track_parses_json3_payload() {
        let server = MockServer::start().await;
        let body = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 2000, "segs": [{"utf8": "world"}]}
            ]
        }"#;
        Mock::given(method("GET"))
            .and(path("/timedtext"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let (_dir, fetcher) = fetcher();
        let lines = fetcher
            .download_track(&format!("{}/timedtext", server.uri()))
            .await
            .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello");
        assert_eq!(lines[1].start, 2.0);
    }

    #[tokio::test]
    async fn download_track_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timedtext"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_dir, fetcher) = fetcher();
        let err = fetcher
            .download_track(&format!("{}/timedtext", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, CaptionsError::TrackDownload(_)));
    }

    #[tokio::test]
    async fn download_track_rejects_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timedtext"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
            .mount(&server)
            .await;

        let (_dir, fetcher) = fetcher();
        let result = fetcher
            .download_track(&format!("{}/timedtext", server.uri()))
            .await;

        assert!(result.is_err());
    }
}
