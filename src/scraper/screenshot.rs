use tracing::debug;

use crate::app::Result;
use crate::scraper::session::as_millis;
use crate::scraper::{
    ImageFormat, NavigationWait, ScraperConfig, SessionConfig, SessionGateway, Viewport,
};

/// Phone-sized viewport used for every capture.
pub const SCREENSHOT_VIEWPORT: Viewport = Viewport {
    width: 375,
    height: 812,
    is_mobile: true,
};

/// Time given to deferred content after the load event.
pub const SCREENSHOT_SETTLE_MS: u64 = 3000;

impl SessionConfig {
    /// Fixed mobile capture policy; only identity and timeout come from config.
    pub fn for_screenshot(config: &ScraperConfig) -> Self {
        Self {
            viewport: SCREENSHOT_VIEWPORT,
            client_identity: config.user_agent.clone(),
            navigation_wait: NavigationWait::Load,
            settle_delay_ms: SCREENSHOT_SETTLE_MS,
            timeout_ms: as_millis(config.timeout()).max(1),
        }
    }
}

/// Capture a PNG of the visible mobile viewport.
pub async fn capture_screenshot(
    gateway: &SessionGateway,
    url: &str,
    config: &ScraperConfig,
) -> Result<Vec<u8>> {
    capture_screenshot_with(gateway, url, &SessionConfig::for_screenshot(config)).await
}

/// Capture a PNG with an explicit session policy.
pub async fn capture_screenshot_with(
    gateway: &SessionGateway,
    url: &str,
    session_config: &SessionConfig,
) -> Result<Vec<u8>> {
    let png = gateway
        .with_session(url, session_config, |session| {
            Box::pin(session.screenshot(ImageFormat::Png))
        })
        .await?;

    debug!(url = %url, size = png.len(), "Screenshot captured");
    Ok(png)
}
