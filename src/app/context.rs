use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::app::error::{Result, SocialError};
use crate::domain::{ExtractionResult, Platform};
use crate::scraper::{
    capture_screenshot, ChromeRenderer, Renderer, ScraperConfig, SessionConfig, SessionGateway,
};
use crate::strategy::StrategyRegistry;

/// Wires the renderer, session gateway and strategy registry together.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ScraperConfig>,
    pub gateway: Arc<SessionGateway>,
    pub registry: Arc<StrategyRegistry>,
}

impl AppContext {
    pub fn new(config: ScraperConfig) -> Self {
        let renderer: Arc<dyn Renderer> = Arc::new(ChromeRenderer::new(config.clone()));
        Self::with_renderer(renderer, config)
    }

    pub fn with_renderer(renderer: Arc<dyn Renderer>, config: ScraperConfig) -> Self {
        let gateway = Arc::new(SessionGateway::new(renderer, config.max_concurrency));
        Self {
            config: Arc::new(config),
            gateway,
            registry: Arc::new(StrategyRegistry::with_defaults()),
        }
    }

    /// Extract normalized metadata for `url`, classifying it first.
    pub async fn social_info(&self, url: &str) -> Result<ExtractionResult> {
        self.social_info_as(url, Platform::classify(url)).await
    }

    /// Extract with an explicit platform instead of classifying the URL.
    pub async fn social_info_as(&self, url: &str, platform: Platform) -> Result<ExtractionResult> {
        let url = validate_url(url)?;
        let session_config = SessionConfig::for_platform(platform, &self.config);
        let registry = self.registry.clone();

        let partial = self
            .gateway
            .with_session(url.as_str(), &session_config, move |session| {
                Box::pin(async move { Ok(registry.extract(platform, session).await) })
            })
            .await?;

        let result = ExtractionResult::assemble(platform, partial);
        info!(
            url = %url,
            platform = %platform,
            followers = result.follower_count,
            "Extracted social info"
        );
        Ok(result)
    }

    /// PNG of `url` in a phone-sized viewport.
    pub async fn screenshot(&self, url: &str) -> Result<Vec<u8>> {
        let url = validate_url(url)?;
        let png = capture_screenshot(&self.gateway, url.as_str(), &self.config).await?;
        info!(url = %url, size = png.len(), "Captured screenshot");
        Ok(png)
    }
}

/// Reject missing, malformed or non-web URLs before any browser starts.
pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SocialError::MissingInput);
    }

    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SocialError::UnsupportedScheme(other.to_string())),
    }
}
