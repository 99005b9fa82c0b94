use crate::domain::{Field, Platform};
use crate::strategy::field::{FieldExtractor, Source, FOLLOWERS_TEXT, LIKES_TEXT};
use crate::strategy::title::cut_title;
use crate::strategy::ExtractionStrategy;

/// `(3) Tacos El Güero | Facebook` → `Tacos El Güero`.
fn page_name(title: &str) -> Option<String> {
    cut_title(
        &html_escape::decode_html_entities(title),
        &[" | Facebook", " - Facebook", " | "],
        &["Facebook", "Log in to Facebook", "Log into Facebook"],
    )
}

/// Social network: the page title and visible follower text.
pub struct FacebookStrategy {
    extractors: Vec<FieldExtractor>,
}

impl FacebookStrategy {
    pub fn new() -> Self {
        let extractors = vec![
            FieldExtractor::new(Field::DisplayName)
                .or(Source::title().refine(page_name))
                .or(Source::og_title(page_name)),
            FieldExtractor::new(Field::FollowerCount)
                .or(Source::content().matching(&FOLLOWERS_TEXT)),
            FieldExtractor::new(Field::InteractionCount)
                .or(Source::content().matching(&LIKES_TEXT)),
        ];
        Self { extractors }
    }
}

impl Default for FacebookStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for FacebookStrategy {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn extractors(&self) -> &[FieldExtractor] {
        &self.extractors
    }
}
