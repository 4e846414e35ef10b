//! Application state.

use std::sync::Arc;

use capscribe_captions::{CookiePool, TranscriptFetcher};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub fetcher: TranscriptFetcher,
}

impl AppState {
    /// Create new application state.
    ///
    /// Bootstraps the cookie pool, materializing a cookie file from the
    /// environment when configured.
    pub fn new(config: ApiConfig) -> std::io::Result<Self> {
        let pool = Arc::new(CookiePool::from_env(&config.cookie_dir)?);
        let fetcher = TranscriptFetcher::new(pool);

        Ok(Self { config, fetcher })
    }
}
