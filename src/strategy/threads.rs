use crate::domain::{Field, Platform};
use crate::strategy::field::{FieldExtractor, Source};
use crate::strategy::title::cut_title;
use crate::strategy::ExtractionStrategy;

fn profile_name(title: &str) -> Option<String> {
    cut_title(
        &html_escape::decode_html_entities(title),
        &[" (@", " •", " on Threads"],
        &["Threads"],
    )
}

pub struct ThreadsStrategy {
    extractors: Vec<FieldExtractor>,
}

impl ThreadsStrategy {
    pub fn new() -> Self {
        let extractors = vec![FieldExtractor::new(Field::DisplayName)
            .or(Source::title().refine(profile_name))
            .or(Source::og_title(profile_name))];
        Self { extractors }
    }
}

impl Default for ThreadsStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for ThreadsStrategy {
    fn platform(&self) -> Platform {
        Platform::Threads
    }

    fn extractors(&self) -> &[FieldExtractor] {
        &self.extractors
    }
}
