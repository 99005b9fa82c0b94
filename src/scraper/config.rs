use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::scraper::NavigationWait;

/// Configuration for the browser-backed scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Path to a Chrome/Chromium executable (default: auto-detect)
    pub chrome_path: Option<String>,

    /// Navigation timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Base settle delay after navigation in milliseconds (default: 1000)
    pub wait_after_load_ms: u64,

    /// Wait policy for platforms without their own (default: load)
    pub navigation_wait: NavigationWait,

    /// Maximum simultaneous render sessions (default: 5)
    pub max_concurrency: usize,

    /// User agent string presented to sites
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            timeout_secs: 30,
            wait_after_load_ms: 1000,
            navigation_wait: NavigationWait::Load,
            max_concurrency: 5,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl ScraperConfig {
    /// Get the navigation timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the base settle delay as a Duration
    pub fn wait_after_load(&self) -> Duration {
        Duration::from_millis(self.wait_after_load_ms)
    }

    /// Create a config optimized for speed (fewer fields on slow pages)
    pub fn fast() -> Self {
        Self {
            timeout_secs: 15,
            wait_after_load_ms: 500,
            max_concurrency: 10,
            ..Default::default()
        }
    }

    /// Create a config optimized for completeness (slower)
    pub fn thorough() -> Self {
        Self {
            timeout_secs: 60,
            wait_after_load_ms: 2000,
            navigation_wait: NavigationWait::NetworkIdle,
            max_concurrency: 3,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert!(config.chrome_path.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.wait_after_load_ms, 1000);
        assert_eq!(config.navigation_wait, NavigationWait::Load);
        assert_eq!(config.max_concurrency, 5);
        assert!(config.user_agent.is_some());
    }

    #[test]
    fn test_fast_config() {
        let config = ScraperConfig::fast();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.wait_after_load_ms, 500);
        assert_eq!(config.max_concurrency, 10);
        // Inherits defaults for the rest
        assert_eq!(config.navigation_wait, NavigationWait::Load);
    }

    #[test]
    fn test_thorough_config() {
        let config = ScraperConfig::thorough();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.wait_after_load_ms, 2000);
        assert_eq!(config.max_concurrency, 3);
        assert_eq!(config.navigation_wait, NavigationWait::NetworkIdle);
    }

    #[test]
    fn test_durations() {
        let config = ScraperConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.wait_after_load(), Duration::from_millis(1000));
    }
}
