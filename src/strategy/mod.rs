//! Platform-specific extraction strategies.
//!
//! Each strategy owns a list of independent [`FieldExtractor`]s. They run
//! concurrently against the same [`RenderSession`]; any of them may fail
//! without affecting the others.
//!
//! ```text
//! Platform → StrategyRegistry → ExtractionStrategy → [FieldExtractor] → PartialResult
//! ```

mod facebook;
mod field;
mod instagram;
mod threads;
mod tiktok;
mod title;
mod twitter;
mod youtube;

pub use facebook::FacebookStrategy;
pub use field::{decode_entities, FieldExtractor, Probe, Source, FOLLOWERS_TEXT, LIKES_TEXT};
pub use instagram::InstagramStrategy;
pub use threads::ThreadsStrategy;
pub use tiktok::TiktokStrategy;
pub use title::cut_title;
pub use twitter::TwitterStrategy;
pub use youtube::YoutubeStrategy;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::domain::{PartialResult, Platform};
use crate::scraper::RenderSession;

/// Extraction logic for one platform.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn platform(&self) -> Platform;

    fn extractors(&self) -> &[FieldExtractor];

    /// Run every extractor and collect whatever succeeded.
    async fn extract(&self, session: &RenderSession) -> PartialResult {
        let platform = self.platform();
        let outcomes = join_all(self.extractors().iter().map(|extractor| async move {
            extractor
                .run(session, platform)
                .await
                .map(|value| (extractor.field(), value))
        }))
        .await;

        PartialResult::from_fields(outcomes.into_iter().flatten())
    }
}

/// Maps each platform to its strategy.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<Platform, Arc<dyn ExtractionStrategy>>,
}

impl StrategyRegistry {
    /// An empty registry; every platform yields defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a strategy for every known platform except `other`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(YoutubeStrategy::new()));
        registry.register(Arc::new(TiktokStrategy::new()));
        registry.register(Arc::new(InstagramStrategy::new()));
        registry.register(Arc::new(FacebookStrategy::new()));
        registry.register(Arc::new(TwitterStrategy::new()));
        registry.register(Arc::new(ThreadsStrategy::new()));
        registry
    }

    /// Add or replace the strategy for its platform.
    pub fn register(&mut self, strategy: Arc<dyn ExtractionStrategy>) {
        self.strategies.insert(strategy.platform(), strategy);
    }

    pub fn get(&self, platform: Platform) -> Option<&Arc<dyn ExtractionStrategy>> {
        self.strategies.get(&platform)
    }

    /// Dispatch to the platform's strategy. Platforms without one get an
    /// empty result, not an error.
    pub async fn extract(&self, platform: Platform, session: &RenderSession) -> PartialResult {
        match self.get(platform) {
            Some(strategy) => strategy.extract(session).await,
            None => {
                tracing::debug!(platform = %platform, "No extraction strategy registered");
                PartialResult::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use regex::Regex;

    use super::*;
    use crate::domain::{ExtractionResult, Field};
    use crate::scraper::fake::{session_for, FakePage};

    static FOLLOWER_COUNT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#""followers":(\d+)"#).unwrap());

    struct SplitStrategy {
        extractors: Vec<FieldExtractor>,
    }

    impl SplitStrategy {
        fn new() -> Self {
            Self {
                extractors: vec![
                    // Selector queries fail on the fixture page.
                    FieldExtractor::new(Field::DisplayName).or(Source::text(&["h1.name"])),
                    FieldExtractor::new(Field::FollowerCount)
                        .or(Source::content().matching(&FOLLOWER_COUNT)),
                ],
            }
        }
    }

    #[async_trait]
    impl ExtractionStrategy for SplitStrategy {
        fn platform(&self) -> Platform {
            Platform::Other
        }

        fn extractors(&self) -> &[FieldExtractor] {
            &self.extractors
        }
    }

    #[tokio::test]
    async fn test_failing_extractor_does_not_affect_siblings() {
        let session = session_for(
            FakePage::default()
                .failing_queries()
                .with_content(r#"{"followers":321}"#),
        );

        let partial = SplitStrategy::new().extract(&session).await;
        let result = ExtractionResult::assemble(Platform::Other, partial);

        assert_eq!(result.follower_count, 321);
        assert_eq!(result.display_name, "Unknown");
    }

    #[tokio::test]
    async fn test_unregistered_platform_is_empty() {
        let session = session_for(FakePage::default().with_title("Anything"));
        let registry = StrategyRegistry::with_defaults();

        assert!(registry.get(Platform::Other).is_none());
        let partial = registry.extract(Platform::Other, &session).await;
        assert!(partial.is_empty());
    }

    #[test]
    fn test_defaults_cover_known_platforms() {
        let registry = StrategyRegistry::with_defaults();
        for platform in Platform::ALL {
            let registered = registry.get(platform).is_some();
            assert_eq!(registered, platform != Platform::Other, "{}", platform);
            if let Some(strategy) = registry.get(platform) {
                assert_eq!(strategy.platform(), platform);
            }
        }
    }

    #[tokio::test]
    async fn test_register_replaces_strategy() {
        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(SplitStrategy::new()));
        assert!(registry.get(Platform::Other).is_some());

        let session = session_for(FakePage::default().with_content(r#"{"followers":7}"#));
        let partial = registry.extract(Platform::Other, &session).await;
        assert_eq!(partial.follower_count, Some(7));
    }
}
