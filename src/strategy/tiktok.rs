use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Field, Platform};
use crate::strategy::field::{FieldExtractor, Source};
use crate::strategy::ExtractionStrategy;

static UNIQUE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""uniqueId":"([^"]+)""#).expect("valid regex"));

static FOLLOWER_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""followerCount":(\d+)"#).expect("valid regex"));

static PLAY_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""playCount":(\d+)"#).expect("valid regex"));

static DIGG_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""diggCount":(\d+)"#).expect("valid regex"));

/// Epoch seconds, quoted or not depending on the page build.
static CREATE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""createTime":"?(\d+)"#).expect("valid regex"));

const USERNAME: &[&str] = &[
    r#"[data-e2e="browse-username"]"#,
    r#"[data-e2e="user-subtitle"]"#,
    r#"[data-e2e="user-title"]"#,
];

/// Short-video platform: everything but the name comes from the
/// rehydration state embedded in the page.
pub struct TiktokStrategy {
    extractors: Vec<FieldExtractor>,
}

impl TiktokStrategy {
    pub fn new() -> Self {
        let extractors = vec![
            FieldExtractor::new(Field::DisplayName)
                .or(Source::text(USERNAME))
                .or(Source::content().matching(&UNIQUE_ID)),
            FieldExtractor::new(Field::FollowerCount)
                .or(Source::content().matching(&FOLLOWER_COUNT)),
            FieldExtractor::new(Field::ViewCount).or(Source::content().matching(&PLAY_COUNT)),
            FieldExtractor::new(Field::InteractionCount)
                .or(Source::content().matching(&DIGG_COUNT)),
            FieldExtractor::new(Field::PublishDate).or(Source::content().matching(&CREATE_TIME)),
        ];
        Self { extractors }
    }
}

impl Default for TiktokStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for TiktokStrategy {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    fn extractors(&self) -> &[FieldExtractor] {
        &self.extractors
    }
}
