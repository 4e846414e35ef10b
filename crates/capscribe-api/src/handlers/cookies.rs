//! Cookie pool diagnostics.

use axum::extract::{Query, State};
use axum::Json;
use capscribe_captions::{CookieHealth, HEALTHCHECK_VIDEO_ID, WATCH_URL_BASE};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Failure messages are truncated to keep the report readable.
const MAX_FAILURE_CHARS: usize = 120;

#[derive(Debug, Deserialize)]
pub struct CookieStatusQuery {
    /// Video to probe; defaults to a known-public one.
    pub video_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CookieStatusResponse {
    pub checked_video: String,
    pub results: Vec<CookieReport>,
    pub preferred_order: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CookieReport {
    pub cookie: String,
    pub status: String,
}

fn truncated(message: &str) -> String {
    if message.chars().count() <= MAX_FAILURE_CHARS {
        message.to_string()
    } else {
        let head: String = message.chars().take(MAX_FAILURE_CHARS).collect();
        format!("{head}...")
    }
}

/// Probe every cookie file against one known-public video.
///
/// GET /cookies/status?video_id=
///
/// Reports per-file status and refreshes the preference order by
/// batch-promoting the cookies that worked.
pub async fn cookies_status(
    State(state): State<AppState>,
    Query(query): Query<CookieStatusQuery>,
) -> Json<CookieStatusResponse> {
    let video_id = query
        .video_id
        .unwrap_or_else(|| HEALTHCHECK_VIDEO_ID.to_string());

    let pool = state.fetcher.pool();
    let mut results = Vec::new();
    let mut working = Vec::new();

    for cookie in pool.discover() {
        let status = match state.fetcher.check_cookie(&video_id, &cookie).await {
            CookieHealth::Working => {
                working.push(cookie.clone());
                "working".to_string()
            }
            CookieHealth::NoCaptions => "no captions found".to_string(),
            CookieHealth::Failed(message) => format!("failed - {}", truncated(&message)),
        };
        results.push(CookieReport { cookie, status });
    }

    pool.promote_all(&working);

    Json(CookieStatusResponse {
        checked_video: format!("{WATCH_URL_BASE}{video_id}"),
        results,
        preferred_order: pool.preferred(),
    })
}
