use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Field, Platform};
use crate::strategy::field::{FieldExtractor, Source};
use crate::strategy::ExtractionStrategy;

static OWNER_CHANNEL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""ownerChannelName":"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

static VIEW_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""viewCount":"(\d+)""#).expect("valid regex"));

/// `Feb 12, 2026` style dates inside the info line.
static INFO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.? \d{1,2}, \d{4})")
        .expect("valid regex")
});

static PUBLISH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""publishDate":"([^"]+)""#).expect("valid regex"));

const CHANNEL_NAME: &[&str] = &[
    "ytd-video-owner-renderer ytd-channel-name #text",
    "#owner #channel-name #text",
    "ytd-channel-name #text",
    "#channel-name #text",
];
const GENERIC_LABEL: &[&str] = &[
    "#owner-name a",
    "#upload-info #channel-name a",
    "#text-container",
];
const SUBSCRIBERS: &[&str] = &["#owner-sub-count", "yt-formatted-string#subscriber-count"];
const VIEWS: &[&str] = &[
    "ytd-watch-info-text #info span",
    "#info-container #info span",
    "#count .view-count",
    ".view-count",
];
const LIKE_BUTTON: &[&str] = &[
    "like-button-view-model button",
    "#segmented-like-button button",
    "ytd-toggle-button-renderer#like-button button",
];
const INFO_TEXT: &[&str] = &[
    "ytd-watch-info-text #info",
    "#info-container #info",
    "#info-strings yt-formatted-string",
];
const DATE_PUBLISHED: &[&str] = &[
    r#"meta[itemprop="datePublished"]"#,
    r#"meta[itemprop="uploadDate"]"#,
];

/// Video platform: channel and engagement from the watch page DOM, with
/// embedded player JSON as a fallback.
pub struct YoutubeStrategy {
    extractors: Vec<FieldExtractor>,
}

impl YoutubeStrategy {
    pub fn new() -> Self {
        let extractors = vec![
            FieldExtractor::new(Field::DisplayName)
                .or(Source::text(CHANNEL_NAME))
                .or(Source::text(GENERIC_LABEL))
                .or(Source::content().matching(&OWNER_CHANNEL_NAME)),
            FieldExtractor::new(Field::FollowerCount).or(Source::text(SUBSCRIBERS)),
            FieldExtractor::new(Field::ViewCount)
                .or(Source::text(VIEWS))
                .or(Source::content().matching(&VIEW_COUNT)),
            FieldExtractor::new(Field::InteractionCount)
                .or(Source::attribute(LIKE_BUTTON, "aria-label")),
            FieldExtractor::new(Field::PublishDate)
                .or(Source::text(INFO_TEXT).matching(&INFO_DATE))
                .or(Source::attribute(DATE_PUBLISHED, "content"))
                .or(Source::content().matching(&PUBLISH_DATE)),
        ];
        Self { extractors }
    }
}

impl Default for YoutubeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for YoutubeStrategy {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn extractors(&self) -> &[FieldExtractor] {
        &self.extractors
    }
}
