//! Scripted in-memory renderer for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{Result, SocialError};
use crate::scraper::{
    ContextOptions, ImageFormat, NavigationWait, RenderHandle, RenderSession, Renderer,
};

/// PNG file signature, enough for content checks.
pub const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FakeNavigation {
    #[default]
    Succeed,
    Fail,
    Hang,
}

/// What the fake page serves.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    texts: HashMap<String, String>,
    attributes: HashMap<(String, String), String>,
    title: Option<String>,
    content: String,
    navigation: FakeNavigation,
    fail_queries: bool,
    fail_content: bool,
}

impl FakePage {
    pub fn with_text(mut self, selector: &str, text: &str) -> Self {
        self.texts.insert(selector.to_string(), text.to_string());
        self
    }

    pub fn with_attribute(mut self, selector: &str, attribute: &str, value: &str) -> Self {
        self.attributes
            .insert((selector.to_string(), attribute.to_string()), value.to_string());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_navigation(mut self, navigation: FakeNavigation) -> Self {
        self.navigation = navigation;
        self
    }

    /// Every selector and title query errors.
    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn failing_content(mut self) -> Self {
        self.fail_content = true;
        self
    }
}

#[derive(Default)]
struct Counters {
    opens: AtomicUsize,
    closes: AtomicUsize,
    content_reads: AtomicUsize,
}

pub struct FakeRenderer {
    page: FakePage,
    available: bool,
    counters: Arc<Counters>,
    last_options: Mutex<Option<ContextOptions>>,
}

impl FakeRenderer {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            available: true,
            counters: Arc::new(Counters::default()),
            last_options: Mutex::new(None),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(FakePage::default())
        }
    }

    pub fn opens(&self) -> usize {
        self.counters.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    pub fn content_reads(&self) -> usize {
        self.counters.content_reads.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<ContextOptions> {
        self.last_options.lock().unwrap().clone()
    }

    fn handle(&self) -> FakeHandle {
        FakeHandle {
            page: self.page.clone(),
            counters: self.counters.clone(),
        }
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn open(&self, options: &ContextOptions) -> Result<Box<dyn RenderHandle>> {
        if !self.available {
            return Err(SocialError::RenderProcessUnavailable("fake renderer is down".into()));
        }
        *self.last_options.lock().unwrap() = Some(options.clone());
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.handle()))
    }
}

/// A session already on `page`, for exercising strategies directly.
pub fn session_for(page: FakePage) -> RenderSession {
    let renderer = FakeRenderer::new(page);
    RenderSession::new(Box::new(renderer.handle()), "https://example.com/fixture", None)
}

struct FakeHandle {
    page: FakePage,
    counters: Arc<Counters>,
}

impl FakeHandle {
    fn check_queries(&self) -> Result<()> {
        if self.page.fail_queries {
            Err(SocialError::Render("selector engine crashed".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RenderHandle for FakeHandle {
    async fn navigate(&self, _url: &str, _wait: NavigationWait) -> Result<()> {
        match self.page.navigation {
            FakeNavigation::Succeed => Ok(()),
            FakeNavigation::Fail => Err(SocialError::Render("net::ERR_NAME_NOT_RESOLVED".into())),
            FakeNavigation::Hang => futures::future::pending().await,
        }
    }

    async fn query_text(&self, selectors: &[&str]) -> Result<Option<String>> {
        self.check_queries()?;
        Ok(selectors
            .iter()
            .find_map(|s| self.page.texts.get(*s))
            .cloned())
    }

    async fn query_attribute(&self, selectors: &[&str], attribute: &str) -> Result<Option<String>> {
        self.check_queries()?;
        Ok(selectors
            .iter()
            .find_map(|s| {
                self.page
                    .attributes
                    .get(&(s.to_string(), attribute.to_string()))
            })
            .cloned())
    }

    async fn title(&self) -> Result<Option<String>> {
        self.check_queries()?;
        Ok(self.page.title.clone())
    }

    async fn raw_content(&self) -> Result<String> {
        self.counters.content_reads.fetch_add(1, Ordering::SeqCst);
        if self.page.fail_content {
            return Err(SocialError::Render("connection reset while reading content".into()));
        }
        Ok(self.page.content.clone())
    }

    async fn screenshot(&self, _format: ImageFormat) -> Result<Vec<u8>> {
        Ok(FAKE_PNG.to_vec())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
