use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, NavigateParams};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::{Result, SocialError};
use crate::scraper::config::ScraperConfig;
use crate::scraper::script::{
    query_attribute_script, query_text_script, READY_STATE_SCRIPT, RESOURCE_COUNT_SCRIPT,
};
use crate::scraper::{ContextOptions, ImageFormat, NavigationWait, RenderHandle, Renderer};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Chrome-based renderer using chromiumoxide
///
/// Every context is a separate headless Chrome process with a throwaway
/// profile, so concurrent requests share no cookies or storage.
pub struct ChromeRenderer {
    config: ScraperConfig,
}

impl ChromeRenderer {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self, options: &ContextOptions, profile: &TempDir) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile.path())
            .window_size(options.viewport.width, options.viewport.height)
            .request_timeout(options.timeout)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--no-first-run")
            .arg("--hide-scrollbars");

        if !self.config.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = self.config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(|e| {
            SocialError::RenderProcessUnavailable(format!("Failed to build browser config: {}", e))
        })
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn open(&self, options: &ContextOptions) -> Result<Box<dyn RenderHandle>> {
        let profile = tempfile::Builder::new()
            .prefix("socialprobe-profile-")
            .tempdir()
            .map_err(|e| {
                SocialError::RenderProcessUnavailable(format!(
                    "Failed to create profile dir: {}",
                    e
                ))
            })?;

        let browser_config = self.browser_config(options, &profile)?;

        let (mut browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            SocialError::RenderProcessUnavailable(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Spawn the browser handler
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
        });

        match prepare_page(&browser, options).await {
            Ok(page) => Ok(Box::new(ChromeHandle {
                browser,
                page,
                handler_task,
                profile,
            })),
            Err(e) => {
                // The process is already running; tear it down before reporting.
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                Err(e)
            }
        }
    }
}

async fn prepare_page(browser: &Browser, options: &ContextOptions) -> Result<Page> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| {
            SocialError::RenderProcessUnavailable(format!("Failed to create page: {}", e))
        })?;

    page.execute(SetDeviceMetricsOverrideParams::new(
        i64::from(options.viewport.width),
        i64::from(options.viewport.height),
        if options.viewport.is_mobile { 2.0 } else { 1.0 },
        options.viewport.is_mobile,
    ))
    .await
    .map_err(|e| SocialError::Render(format!("Failed to set viewport: {}", e)))?;

    if let Some(ref ua) = options.user_agent {
        page.set_user_agent(ua)
            .await
            .map_err(|e| SocialError::Render(format!("Failed to set user agent: {}", e)))?;
    }

    Ok(page)
}

/// `load` maps onto the browser's own load event; the other policies are
/// polled because they end before or after it.
fn waits_for_load_event(wait: NavigationWait) -> bool {
    matches!(wait, NavigationWait::Load)
}

struct ChromeHandle {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    profile: TempDir,
}

impl ChromeHandle {
    async fn evaluate<T: serde::de::DeserializeOwned>(&self, script: &str) -> Result<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| SocialError::Render(format!("Script execution failed: {}", e)))?
            .into_value()
            .map_err(|e| SocialError::Render(format!("Failed to parse result: {:?}", e)))
    }

    async fn evaluate_non_empty(&self, script: &str) -> Result<Option<String>> {
        let value: String = self.evaluate(script).await?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    /// Poll `document.readyState` for the states the load event doesn't cover.
    async fn wait_until(&self, wait: NavigationWait) -> Result<()> {
        let mut last_count: Option<u64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let state: String = self.evaluate(READY_STATE_SCRIPT).await?;
            let complete = state == "complete";

            match wait {
                NavigationWait::DomReady if complete || state == "interactive" => return Ok(()),
                NavigationWait::NetworkIdle if complete => {
                    let count: u64 = self.evaluate(RESOURCE_COUNT_SCRIPT).await?;
                    if last_count == Some(count) {
                        if quiet_since.elapsed() >= NETWORK_QUIET_WINDOW {
                            return Ok(());
                        }
                    } else {
                        last_count = Some(count);
                        quiet_since = Instant::now();
                    }
                }
                _ => {}
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl RenderHandle for ChromeHandle {
    async fn navigate(&self, url: &str, wait: NavigationWait) -> Result<()> {
        if waits_for_load_event(wait) {
            self.page
                .goto(url)
                .await
                .map_err(|e| SocialError::Render(format!("Navigation to {} failed: {}", url, e)))?;

            // Wait for the page to load
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| SocialError::Render(format!("Navigation failed: {}", e)))?;
            return Ok(());
        }

        let response = self
            .page
            .execute(NavigateParams::new(url.to_string()))
            .await
            .map_err(|e| SocialError::Render(format!("Navigation failed: {}", e)))?;

        if let Some(ref error) = response.result.error_text {
            return Err(SocialError::Render(format!("Navigation to {} failed: {}", url, error)));
        }

        self.wait_until(wait).await
    }

    async fn query_text(&self, selectors: &[&str]) -> Result<Option<String>> {
        self.evaluate_non_empty(&query_text_script(selectors)).await
    }

    async fn query_attribute(&self, selectors: &[&str], attribute: &str) -> Result<Option<String>> {
        self.evaluate_non_empty(&query_attribute_script(selectors, attribute))
            .await
    }

    async fn title(&self) -> Result<Option<String>> {
        self.page
            .get_title()
            .await
            .map_err(|e| SocialError::Render(format!("Failed to read title: {}", e)))
    }

    async fn raw_content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| SocialError::Render(format!("Failed to read page content: {}", e)))
    }

    async fn screenshot(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let format = match format {
            ImageFormat::Png => CaptureScreenshotFormat::Png,
            ImageFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
        };

        self.page
            .screenshot(ScreenshotParams::builder().format(format).build())
            .await
            .map_err(|e| SocialError::Render(format!("Failed to capture screenshot: {}", e)))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromeHandle {
            mut browser,
            page,
            handler_task,
            profile,
        } = *self;

        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        let result = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| SocialError::Render(format!("Failed to close browser: {}", e)));

        if let Err(e) = browser.wait().await {
            debug!("Failed to wait for browser exit: {}", e);
        }

        handler_task.abort();
        drop(profile);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_load_uses_load_event() {
        assert!(waits_for_load_event(NavigationWait::Load));
        assert!(!waits_for_load_event(NavigationWait::DomReady));
        assert!(!waits_for_load_event(NavigationWait::NetworkIdle));
    }
}
