use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::{OnceCell, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::app::{Result, SocialError};
use crate::domain::Platform;
use crate::scraper::{
    ContextOptions, ImageFormat, NavigationWait, RenderHandle, Renderer, ScraperConfig, Viewport,
};

/// How one render session is opened and navigated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub viewport: Viewport,
    pub client_identity: Option<String>,
    pub navigation_wait: NavigationWait,
    pub settle_delay_ms: u64,
    pub timeout_ms: u64,
}

impl SessionConfig {
    /// Wait and settle policy suited to how each platform renders.
    pub fn for_platform(platform: Platform, config: &ScraperConfig) -> Self {
        let base = as_millis(config.wait_after_load());
        let (navigation_wait, settle_delay_ms) = match platform {
            Platform::Youtube => (NavigationWait::NetworkIdle, base.saturating_add(500)),
            // Embedded state is in the first document; the username needs hydration.
            Platform::Tiktok => (NavigationWait::DomReady, base.saturating_add(1000)),
            Platform::Instagram => (NavigationWait::Load, base.saturating_add(1000)),
            Platform::Facebook | Platform::Threads => (NavigationWait::Load, base),
            Platform::Twitter => (NavigationWait::NetworkIdle, base),
            Platform::Other => (config.navigation_wait, base),
        };

        Self {
            viewport: Viewport::DESKTOP,
            client_identity: config.user_agent.clone(),
            navigation_wait,
            settle_delay_ms,
            timeout_ms: as_millis(config.timeout()).max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    fn context_options(&self) -> ContextOptions {
        ContextOptions {
            viewport: self.viewport,
            user_agent: self.client_identity.clone(),
            timeout: self.timeout(),
        }
    }
}

pub(crate) fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A live rendered page owned by one request.
///
/// The underlying context is closed exactly once: by [`RenderSession::release`]
/// on normal exit, or from `Drop` when the owning future is cancelled.
pub struct RenderSession {
    handle: Option<Box<dyn RenderHandle>>,
    url: String,
    content: OnceCell<String>,
    permit: Option<OwnedSemaphorePermit>,
}

impl RenderSession {
    pub(crate) fn new(
        handle: Box<dyn RenderHandle>,
        url: impl Into<String>,
        permit: Option<OwnedSemaphorePermit>,
    ) -> Self {
        Self {
            handle: Some(handle),
            url: url.into(),
            content: OnceCell::new(),
            permit,
        }
    }

    fn handle(&self) -> Result<&dyn RenderHandle> {
        self.handle
            .as_deref()
            .ok_or_else(|| SocialError::Render("Render session already released".to_string()))
    }

    async fn navigate(&self, wait: NavigationWait) -> Result<()> {
        self.handle()?.navigate(&self.url, wait).await
    }

    pub async fn query_text(&self, selectors: &[&str]) -> Result<Option<String>> {
        self.handle()?.query_text(selectors).await
    }

    pub async fn query_attribute(
        &self,
        selectors: &[&str],
        attribute: &str,
    ) -> Result<Option<String>> {
        self.handle()?.query_attribute(selectors, attribute).await
    }

    pub async fn title(&self) -> Result<Option<String>> {
        self.handle()?.title().await
    }

    /// Page content, fetched once and shared by every extractor.
    pub async fn raw_content(&self) -> Result<&str> {
        let content = self
            .content
            .get_or_try_init(|| async { self.handle()?.raw_content().await })
            .await?;
        Ok(content.as_str())
    }

    pub async fn screenshot(&self, format: ImageFormat) -> Result<Vec<u8>> {
        self.handle()?.screenshot(format).await
    }

    /// Close the rendering context and wait for it to go away.
    pub async fn release(mut self) {
        if let Some(handle) = self.handle.take() {
            match handle.close().await {
                Ok(()) => debug!(url = %self.url, "Render session closed"),
                Err(e) => warn!(url = %self.url, "Failed to close render session: {}", e),
            }
        }
        self.permit.take();
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        let permit = self.permit.take();
        let url = std::mem::take(&mut self.url);
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                debug!(url = %url, "Render session dropped, closing in background");
                runtime.spawn(async move {
                    if let Err(e) = handle.close().await {
                        warn!(url = %url, "Failed to close abandoned render session: {}", e);
                    }
                    drop(permit);
                });
            }
            Err(_) => warn!(url = %url, "No runtime to close abandoned render session"),
        }
    }
}

/// Opens, navigates and releases render sessions.
pub struct SessionGateway {
    renderer: Arc<dyn Renderer>,
    permits: Arc<Semaphore>,
}

impl SessionGateway {
    pub fn new(renderer: Arc<dyn Renderer>, max_sessions: usize) -> Self {
        Self {
            renderer,
            permits: Arc::new(Semaphore::new(max_sessions.max(1))),
        }
    }

    /// Open a session and navigate it to `url`.
    ///
    /// On failure the context is already closed when the error is returned.
    pub async fn open(&self, url: &str, config: &SessionConfig) -> Result<RenderSession> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| SocialError::RenderProcessUnavailable(format!("Semaphore error: {}", e)))?;

        let handle = self.renderer.open(&config.context_options()).await?;
        let session = RenderSession::new(handle, url, Some(permit));
        debug!(url = %url, wait = ?config.navigation_wait, "Render session opened");

        let navigation =
            tokio::time::timeout(config.timeout(), session.navigate(config.navigation_wait)).await;
        match navigation {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(url = %url, "Navigation failed: {}", e);
                session.release().await;
                return Err(e);
            }
            Err(_) => {
                warn!(url = %url, timeout_ms = config.timeout_ms, "Navigation timed out");
                session.release().await;
                return Err(SocialError::NavigationTimeout(config.timeout_ms));
            }
        }

        if config.settle_delay_ms > 0 {
            tokio::time::sleep(config.settle_delay()).await;
        }

        Ok(session)
    }

    /// Run `work` against a freshly navigated session, then release it.
    ///
    /// The session is released whether `work` succeeds or fails; if the
    /// returned future is dropped, the session closes from `Drop`.
    pub async fn with_session<T, F>(&self, url: &str, config: &SessionConfig, work: F) -> Result<T>
    where
        F: for<'s> FnOnce(&'s RenderSession) -> BoxFuture<'s, Result<T>>,
    {
        let session = self.open(url, config).await?;
        let outcome = work(&session).await;
        session.release().await;
        outcome
    }
}
