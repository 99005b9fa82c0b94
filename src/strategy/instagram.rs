use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Field, Platform};
use crate::strategy::field::{FieldExtractor, Source, FOLLOWERS_TEXT, LIKES_TEXT};
use crate::strategy::title::cut_title;
use crate::strategy::ExtractionStrategy;

static FOLLOWED_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""edge_followed_by":\{"count":(\d+)\}"#).expect("valid regex")
});

static VIDEO_VIEW_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""video_view_count":(\d+)"#).expect("valid regex"));

static PLAY_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""play_count":(\d+)"#).expect("valid regex"));

static PREVIEW_LIKES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""edge_media_preview_like":\{"count":(\d+)"#).expect("valid regex")
});

static TAKEN_AT_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""taken_at_timestamp":(\d+)"#).expect("valid regex"));

static TAKEN_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""taken_at":(\d+)"#).expect("valid regex"));

/// `Name (@handle) • Instagram photos and videos` → `Name`.
fn profile_name(title: &str) -> Option<String> {
    cut_title(
        &html_escape::decode_html_entities(title),
        &[" (@", " •", " on Instagram"],
        &["Instagram", "Login"],
    )
}

/// Photo platform: title for the name, embedded GraphQL JSON for counts,
/// and the meta description text when the JSON is absent.
pub struct InstagramStrategy {
    extractors: Vec<FieldExtractor>,
}

impl InstagramStrategy {
    pub fn new() -> Self {
        let extractors = vec![
            FieldExtractor::new(Field::DisplayName)
                .or(Source::title().refine(profile_name))
                .or(Source::og_title(profile_name)),
            FieldExtractor::new(Field::FollowerCount)
                .or(Source::content().matching(&FOLLOWED_BY))
                .or(Source::content().matching(&FOLLOWERS_TEXT)),
            FieldExtractor::new(Field::ViewCount)
                .or(Source::content().matching(&VIDEO_VIEW_COUNT))
                .or(Source::content().matching(&PLAY_COUNT)),
            FieldExtractor::new(Field::InteractionCount)
                .or(Source::content().matching(&PREVIEW_LIKES))
                .or(Source::content().matching(&LIKES_TEXT)),
            FieldExtractor::new(Field::PublishDate)
                .or(Source::content().matching(&TAKEN_AT_TIMESTAMP))
                .or(Source::content().matching(&TAKEN_AT)),
        ];
        Self { extractors }
    }
}

impl Default for InstagramStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for InstagramStrategy {
    fn platform(&self) -> Platform {
        Platform::Instagram
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
    fn test_profile_name() {
        assert_eq!(
            profile_name("Chef Ana (@chefana) • Instagram photos and videos").as_deref(),
            Some("Chef Ana")
        );
        assert_eq!(
            profile_name("Chef Ana on Instagram: \"New recipe\"").as_deref(),
            Some("Chef Ana")
        );
        assert_eq!(profile_name("Instagram"), None);
    }

    #[tokio::test]
    async fn test_graphql_json() {
        let page = FakePage::default()
            .with_title("Chef Ana (@chefana) • Instagram photos and videos")
            .with_content(
                r#"{"edge_followed_by":{"count":48213},"video_view_count":1500,
                    "edge_media_preview_like":{"count":320},"taken_at_timestamp":1770854400}"#,
            );
        let session = session_for(page);

        let partial = InstagramStrategy::new().extract(&session).await;

        assert_eq!(partial.display_name.as_deref(), Some("Chef Ana"));
        assert_eq!(partial.follower_count, Some(48_213));
        assert_eq!(partial.view_count, Some(1_500));
        assert_eq!(partial.interaction_count, Some(320));
        assert!(partial.publish_date.is_some());
    }

    #[tokio::test]
    async fn test_meta_description_text() {
        let page = FakePage::default().with_title("Instagram").with_content(
            r#"<meta property="og:title"
                     content="Chef Ana (@chefana) &#x2022; Instagram photos and videos" />
               <meta content="12K seguidores, 300 seguidos, 50 publicaciones"
                     name="description" />"#,
        );
        let session = session_for(page);

        let partial = InstagramStrategy::new().extract(&session).await;

        assert_eq!(partial.display_name.as_deref(), Some("Chef Ana"));
        assert_eq!(partial.follower_count, Some(12_000));
        assert_eq!(partial.view_count, None);
        assert_eq!(partial.publish_date, None);
    }

    #[tokio::test]
    async fn test_reel_counts_without_graphql_keys() {
        let page = FakePage::default().with_content(
            r#"{"play_count":2048,"taken_at":1770854400}
               <meta content="3,400 likes, 12 comments" name="description" />"#,
        );
        let session = session_for(page);

        let partial = InstagramStrategy::new().extract(&session).await;

        assert_eq!(partial.view_count, Some(2_048));
        assert_eq!(partial.interaction_count, Some(3_400));
        assert_eq!(
            partial.publish_date,
            to_canonical_day_month(Some(DateInput::EpochSeconds(1_770_854_400)))
        );
        assert_eq!(partial.follower_count, None);
    }
}
