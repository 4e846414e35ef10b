//! Cookie file pool with move-to-front rotation.
//!
//! Cookie files (`cookies_*.txt`, Netscape format) live in a configured
//! directory. The pool keeps an in-memory preference list ordered by most
//! recent success; candidates not on the list are tried in randomized order
//! so load does not converge on a single cookie. The list is process
//! lifetime only and resets on restart.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Cookie files must match `cookies_*.txt`.
pub const COOKIE_PREFIX: &str = "cookies_";
pub const COOKIE_SUFFIX: &str = ".txt";

/// Name of the cookie file materialized from the environment at startup.
pub const ENV_COOKIE_FILE: &str = "cookies_env.txt";

/// Environment variable holding Netscape cookie file content.
pub const ENV_COOKIE_VAR: &str = "YT_COOKIES_CONTENT";

/// The preference list never shrinks below this many entries.
const MIN_PREFERRED_LEN: usize = 6;

/// Pool of cookie files in a directory, with an in-memory preference order.
#[derive(Debug)]
pub struct CookiePool {
    dir: PathBuf,
    preferred: RwLock<Vec<String>>,
}

impl CookiePool {
    /// Create a pool over the given cookie directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            preferred: RwLock::new(Vec::new()),
        }
    }

    /// Create a pool, materializing [`ENV_COOKIE_FILE`] from
    /// [`ENV_COOKIE_VAR`] when the variable is set and non-empty.
    pub fn from_env(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let pool = Self::new(dir);

        if let Ok(content) = std::env::var(ENV_COOKIE_VAR) {
            if !content.trim().is_empty() {
                let path = pool.dir.join(ENV_COOKIE_FILE);
                std::fs::create_dir_all(&pool.dir)?;
                std::fs::write(&path, content)?;
                info!(path = %path.display(), "Wrote cookie file from environment");
            }
        }

        Ok(pool)
    }

    /// Directory the pool watches.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of a cookie file by name.
    pub fn cookie_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Cookie file names currently present in the directory, sorted.
    pub fn discover(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                if !entry.file_type().ok()?.is_file() {
                    return None;
                }
                let name = entry.file_name().into_string().ok()?;
                (name.starts_with(COOKIE_PREFIX) && name.ends_with(COOKIE_SUFFIX))
                    .then_some(name)
            })
            .collect();
        names.sort();
        names
    }

    /// Candidates in try order: preferred entries first (only those still on
    /// disk, stored order), then the remaining files shuffled.
    pub fn ordered_candidates(&self) -> Vec<String> {
        let files = self.discover();
        let preferred = self
            .preferred
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut ordered: Vec<String> = preferred
            .iter()
            .filter(|name| files.contains(name))
            .cloned()
            .collect();
        drop(preferred);

        let mut remaining: Vec<String> = files
            .into_iter()
            .filter(|name| !ordered.contains(name))
            .collect();
        remaining.shuffle(&mut rand::rng());
        ordered.extend(remaining);

        debug!(candidates = ordered.len(), "Ordered cookie candidates");
        ordered
    }

    /// Move a working cookie file to the front of the preference list.
    ///
    /// Duplicates are removed and the list is truncated to
    /// `max(6, number of cookie files on disk)`. Idempotent.
    pub fn promote(&self, name: &str) {
        let cap = self.discover().len().max(MIN_PREFERRED_LEN);

        let mut preferred = self
            .preferred
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        preferred.retain(|entry| entry != name);
        preferred.insert(0, name.to_string());
        preferred.truncate(cap);
    }

    /// Batch-promote cookie files, preserving the given order at the front.
    ///
    /// Used by the health check to refresh the preference order from the
    /// set of currently working cookies.
    pub fn promote_all(&self, names: &[String]) {
        for name in names.iter().rev() {
            self.promote(name);
        }
    }

    /// Snapshot of the current preference order, for diagnostics.
    pub fn preferred(&self) -> Vec<String> {
        self.preferred
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pool_with_cookies(names: &[&str]) -> (TempDir, CookiePool) {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "# Netscape HTTP Cookie File\n").unwrap();
        }
        let pool = CookiePool::new(dir.path());
        (dir, pool)
    }

    #[test]
    fn discover_lists_only_matching_files() {
        let (_dir, pool) = pool_with_cookies(&["cookies_a.txt", "cookies_b.txt"]);
        std::fs::write(pool.dir().join("notes.txt"), "x").unwrap();
        std::fs::write(pool.dir().join("cookies_c.json"), "x").unwrap();

        assert_eq!(pool.discover(), vec!["cookies_a.txt", "cookies_b.txt"]);
    }

    #[test]
    fn candidates_never_include_missing_files() {
        let (_dir, pool) = pool_with_cookies(&["cookies_a.txt"]);
        pool.promote("cookies_gone.txt");
        pool.promote("cookies_a.txt");

        assert_eq!(pool.ordered_candidates(), vec!["cookies_a.txt"]);
    }

    #[test]
    fn candidates_put_preferred_first_and_cover_all_files() {
        let (_dir, pool) =
            pool_with_cookies(&["cookies_a.txt", "cookies_b.txt", "cookies_c.txt"]);
        pool.promote("cookies_c.txt");

        let candidates = pool.ordered_candidates();
        assert_eq!(candidates[0], "cookies_c.txt");
        assert_eq!(candidates.len(), 3);
        assert!(candidates.contains(&"cookies_a.txt".to_string()));
        assert!(candidates.contains(&"cookies_b.txt".to_string()));
    }

    #[test]
    fn promote_is_idempotent() {
        let (_dir, pool) = pool_with_cookies(&["cookies_a.txt", "cookies_b.txt"]);
        pool.promote("cookies_b.txt");
        pool.promote("cookies_b.txt");
        pool.promote("cookies_b.txt");

        assert_eq!(pool.preferred(), vec!["cookies_b.txt"]);
    }

    #[test]
    fn promote_moves_to_front_and_keeps_others() {
        let (_dir, pool) = pool_with_cookies(&["cookies_a.txt", "cookies_b.txt"]);
        pool.promote("cookies_a.txt");
        pool.promote("cookies_b.txt");

        assert_eq!(pool.preferred(), vec!["cookies_b.txt", "cookies_a.txt"]);
    }

    #[test]
    fn preference_list_is_bounded() {
        let (_dir, pool) = pool_with_cookies(&["cookies_a.txt"]);
        for i in 0..10 {
            pool.promote(&format!("cookies_{i}.txt"));
        }
        // One file on disk, so the bound is the 6-entry floor
        assert_eq!(pool.preferred().len(), 6);
    }

    #[test]
    fn promote_all_preserves_given_order_at_front() {
        let (_dir, pool) =
            pool_with_cookies(&["cookies_a.txt", "cookies_b.txt", "cookies_c.txt"]);
        pool.promote("cookies_c.txt");
        pool.promote_all(&["cookies_a.txt".to_string(), "cookies_b.txt".to_string()]);

        assert_eq!(
            pool.preferred(),
            vec!["cookies_a.txt", "cookies_b.txt", "cookies_c.txt"]
        );
    }

    #[test]
    fn from_env_writes_cookie_file_when_content_present() {
        let dir = TempDir::new().unwrap();
        // Serialized by cargo's per-process env; fine for a single test.
        std::env::set_var(ENV_COOKIE_VAR, "# Netscape HTTP Cookie File\n");
        let pool = CookiePool::from_env(dir.path()).unwrap();
        std::env::remove_var(ENV_COOKIE_VAR);

        assert!(pool.discover().contains(&ENV_COOKIE_FILE.to_string()));
    }
}
