use crate::domain::{Field, Platform};
use crate::strategy::field::{FieldExtractor, Source};
use crate::strategy::title::cut_title;
use crate::strategy::ExtractionStrategy;

/// `Jane Doe on X: "..."` and `Jane Doe (@jane) / X` → `Jane Doe`.
fn author_name(title: &str) -> Option<String> {
    cut_title(
        &html_escape::decode_html_entities(title),
        &[" on X:", " on Twitter:", " (@", " / X", " / Twitter"],
        &["X", "Twitter"],
    )
}

const POST_TIME: &[&str] = &["article time", "time"];
const FOLLOWERS: &[&str] = &[
    r#"a[href$="/verified_followers"] span"#,
    r#"a[href$="/followers"] span"#,
];

/// Microblogging platform: author from the title, date from the post's
/// `<time datetime>`.
pub struct TwitterStrategy {
    extractors: Vec<FieldExtractor>,
}

impl TwitterStrategy {
    pub fn new() -> Self {
        let extractors = vec![
            FieldExtractor::new(Field::DisplayName)
                .or(Source::title().refine(author_name))
                .or(Source::og_title(author_name)),
            FieldExtractor::new(Field::FollowerCount).or(Source::text(FOLLOWERS)),
            FieldExtractor::new(Field::PublishDate).or(Source::attribute(POST_TIME, "datetime")),
        ];
        Self { extractors }
    }
}

impl Default for TwitterStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for TwitterStrategy {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn extractors(&self) -> &[FieldExtractor] {
        &self.extractors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{to_canonical_day_month, DateInput};
    use crate::scraper::fake::{session_for, FakePage};

    #[test]
    fn test_author_name() {
        assert_eq!(
            author_name("Jane Doe on X: \"shipping today\" / X").as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(author_name("Jane Doe (@jane) / X").as_deref(), Some("Jane Doe"));
        assert_eq!(author_name("X"), None);
    }

    #[test]
    fn test_author_name_keeps_on_x_inside_name() {
        assert_eq!(
            author_name("Life on Xbox (@lifeonxbox) / X").as_deref(),
            Some("Life on Xbox")
        );
        assert_eq!(
            author_name("Life on Xbox on X: \"new trailer\" / X").as_deref(),
            Some("Life on Xbox")
        );
    }

    #[tokio::test]
    async fn test_status_page() {
        let page = FakePage::default()
            .with_title("Jane Doe on X: \"shipping today\" / X")
            .with_attribute("article time", "datetime", "2026-02-12T15:04:05.000Z");
        let session = session_for(page);

        let partial = TwitterStrategy::new().extract(&session).await;

        assert_eq!(partial.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            partial.publish_date,
            to_canonical_day_month(Some(DateInput::Text("2026-02-12T15:04:05.000Z")))
        );
        assert_eq!(partial.follower_count, None);
    }

    #[tokio::test]
    async fn test_profile_followers() {
        let page = FakePage::default()
            .with_title("Jane Doe (@jane) / X")
            .with_text(r#"a[href$="/followers"] span"#, "12.5K");
        let session = session_for(page);

        let partial = TwitterStrategy::new().extract(&session).await;

        assert_eq!(partial.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(partial.follower_count, Some(12_500));
        assert_eq!(partial.publish_date, None);
    }
}
