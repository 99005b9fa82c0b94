//! Field extractors: ordered fallback sources for one result field.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::app::Result;
use crate::domain::{Field, FieldValue, Platform};
use crate::normalizer::{to_canonical_day_month, try_parse_count, DateInput};
use crate::scraper::RenderSession;

/// `<number> followers` in English or Spanish page text.
pub static FOLLOWERS_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9.,]*[kmb]?)\s+(?:followers|seguidores)").expect("valid regex")
});

/// `<number> likes` in English or Spanish page text.
pub static LIKES_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9.,]*[kmb]?)\s+(?:likes|me gusta)").expect("valid regex")
});

static OG_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+property="og:title"\s+content="([^"]*)""#).expect("valid regex")
});

/// Where a source reads its raw string from.
#[derive(Debug, Clone)]
pub enum Probe {
    /// Visible text of the first matching selector.
    Text(&'static [&'static str]),
    /// Attribute of the first matching selector.
    Attribute {
        selectors: &'static [&'static str],
        name: &'static str,
    },
    /// The document title.
    Title,
    /// The raw page content.
    Content,
}

/// One way of obtaining a field's raw value.
#[derive(Clone)]
pub struct Source {
    probe: Probe,
    pattern: Option<&'static Regex>,
    refine: Option<fn(&str) -> Option<String>>,
}

impl Source {
    fn new(probe: Probe) -> Self {
        Self {
            probe,
            pattern: None,
            refine: None,
        }
    }

    pub fn text(selectors: &'static [&'static str]) -> Self {
        Self::new(Probe::Text(selectors))
    }

    pub fn attribute(selectors: &'static [&'static str], name: &'static str) -> Self {
        Self::new(Probe::Attribute { selectors, name })
    }

    pub fn title() -> Self {
        Self::new(Probe::Title)
    }

    pub fn content() -> Self {
        Self::new(Probe::Content)
    }

    /// `og:title` meta tag from the raw content, entity-decoded.
    pub fn og_title(refine: fn(&str) -> Option<String>) -> Self {
        Self::content().matching(&OG_TITLE).refine(refine)
    }

    /// Keep only the first capture group (or the whole match).
    pub fn matching(mut self, pattern: &'static Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Post-process the captured string; `None` rejects it.
    pub fn refine(mut self, refine: fn(&str) -> Option<String>) -> Self {
        self.refine = Some(refine);
        self
    }

    fn capture(&self, text: &str) -> Option<String> {
        let captured = match self.pattern {
            Some(pattern) => {
                let caps = pattern.captures(text)?;
                caps.get(1).or_else(|| caps.get(0))?.as_str()
            }
            None => text,
        };
        let captured = captured.trim();

        let refined = match self.refine {
            Some(refine) => refine(captured)?,
            None => captured.to_string(),
        };
        Some(refined).filter(|s| !s.is_empty())
    }

    async fn resolve(&self, session: &RenderSession) -> Result<Option<String>> {
        let raw = match &self.probe {
            Probe::Content => {
                let content = session.raw_content().await?;
                return Ok(self.capture(content));
            }
            Probe::Text(selectors) => session.query_text(selectors).await?,
            Probe::Attribute { selectors, name } => session.query_attribute(selectors, name).await?,
            Probe::Title => session.title().await?,
        };
        Ok(raw.and_then(|raw| self.capture(&raw)))
    }
}

/// Produces at most one field; the first source yielding a usable value wins.
#[derive(Clone)]
pub struct FieldExtractor {
    field: Field,
    sources: Vec<Source>,
}

impl FieldExtractor {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            sources: Vec::new(),
        }
    }

    /// Append a fallback source.
    pub fn or(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Try each source in order. Failures are logged and skipped, never
    /// propagated.
    pub async fn run(&self, session: &RenderSession, platform: Platform) -> Option<FieldValue> {
        for (index, source) in self.sources.iter().enumerate() {
            match source.resolve(session).await {
                Ok(Some(raw)) => match normalize(self.field, &raw) {
                    Some(value) => return Some(value),
                    None => debug!(
                        platform = %platform,
                        field = self.field.as_str(),
                        source = index,
                        raw = %raw,
                        "Unusable value"
                    ),
                },
                Ok(None) => debug!(
                    platform = %platform,
                    field = self.field.as_str(),
                    source = index,
                    "No match"
                ),
                Err(e) => debug!(
                    platform = %platform,
                    field = self.field.as_str(),
                    source = index,
                    "Source failed: {}",
                    e
                ),
            }
        }
        None
    }
}

/// Turn a raw string into the field's typed value.
fn normalize(field: Field, raw: &str) -> Option<FieldValue> {
    match field {
        Field::DisplayName => {
            let name = raw.trim();
            (!name.is_empty()).then(|| FieldValue::Text(name.to_string()))
        }
        Field::FollowerCount | Field::ViewCount | Field::InteractionCount => {
            try_parse_count(raw).map(FieldValue::Count)
        }
        Field::PublishDate => {
            to_canonical_day_month(Some(DateInput::from_raw(raw))).map(FieldValue::DayMonth)
        }
    }
}

/// Decode HTML entities left in values scraped from raw markup.
pub fn decode_entities(raw: &str) -> Option<String> {
    Some(html_escape::decode_html_entities(raw).trim().to_string())
}
