//! Rendered-page access for extraction and screenshots.
//!
//! A [`Renderer`] opens isolated rendering contexts; each one is wrapped in
//! a [`RenderSession`] that the [`SessionGateway`] owns for exactly one
//! request and always releases.
//!
//! # Architecture
//!
//! ```text
//! URL → SessionGateway::with_session → RenderSession → strategy / screenshot
//!                                            ↓
//!                                  RenderHandle::close (once)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use socialprobe::scraper::{ChromeRenderer, ScraperConfig, SessionConfig, SessionGateway};
//!
//! let config = ScraperConfig::default();
//! let gateway = SessionGateway::new(Arc::new(ChromeRenderer::new(config.clone())), 5);
//! let title = gateway
//!     .with_session(url, &SessionConfig::for_platform(platform, &config), |session| {
//!         Box::pin(session.title())
//!     })
//!     .await?;
//! ```

mod chrome;
mod config;
#[cfg(test)]
pub(crate) mod fake;
mod screenshot;
mod script;
mod session;

pub use chrome::ChromeRenderer;
pub use config::ScraperConfig;
pub use screenshot::{
    capture_screenshot, capture_screenshot_with, SCREENSHOT_SETTLE_MS, SCREENSHOT_VIEWPORT,
};
pub use session::{RenderSession, SessionConfig, SessionGateway};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app::Result;

/// When navigation counts as finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationWait {
    /// DOM parsed (`document.readyState` is `interactive`).
    DomReady,
    /// Load event fired.
    #[default]
    Load,
    /// Load event fired and no new resources for a quiet window.
    NetworkIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub is_mobile: bool,
}

impl Viewport {
    pub const DESKTOP: Viewport = Viewport {
        width: 1280,
        height: 800,
        is_mobile: false,
    };
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DESKTOP
    }
}

/// Raster formats a handle can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Settings applied when a rendering context is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub timeout: Duration,
}

/// Source of rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Start or attach to a rendering process and open one isolated context.
    ///
    /// Fails with [`SocialError::RenderProcessUnavailable`](crate::app::SocialError)
    /// when no process can be started.
    async fn open(&self, options: &ContextOptions) -> Result<Box<dyn RenderHandle>>;
}

/// One live rendering context.
#[async_trait]
pub trait RenderHandle: Send + Sync {
    /// Navigate and wait until `wait` is satisfied. Callers bound this with
    /// their own timeout.
    async fn navigate(&self, url: &str, wait: NavigationWait) -> Result<()>;

    /// Trimmed visible text of the first selector that matches a non-empty
    /// element.
    async fn query_text(&self, selectors: &[&str]) -> Result<Option<String>>;

    /// Attribute value of the first selector whose element carries it.
    async fn query_attribute(&self, selectors: &[&str], attribute: &str) -> Result<Option<String>>;

    async fn title(&self) -> Result<Option<String>>;

    /// Serialized DOM of the current page.
    async fn raw_content(&self) -> Result<String>;

    /// Capture the visible viewport.
    async fn screenshot(&self, format: ImageFormat) -> Result<Vec<u8>>;

    /// Tear the context down, including any process started for it.
    async fn close(self: Box<Self>) -> Result<()>;
}
