use serde::{Deserialize, Serialize};

use crate::domain::Platform;

/// Placeholder name when no extractor finds one.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Normalized public metadata for one social URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub display_name: String,
    pub follower_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    pub platform: Platform,
}

impl ExtractionResult {
    /// Merge strategy output over defaults.
    ///
    /// `platform` always comes from the classifier. A view count is kept only
    /// for video-like platforms.
    pub fn assemble(platform: Platform, partial: PartialResult) -> Self {
        Self {
            display_name: partial
                .display_name
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            follower_count: partial.follower_count.unwrap_or(0),
            view_count: partial.view_count.filter(|_| platform.is_video_like()),
            interaction_count: partial.interaction_count,
            publish_date: partial.publish_date,
            platform,
        }
    }
}

/// Fields a strategy can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DisplayName,
    FollowerCount,
    ViewCount,
    InteractionCount,
    PublishDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::DisplayName => "displayName",
            Field::FollowerCount => "followerCount",
            Field::ViewCount => "viewCount",
            Field::InteractionCount => "interactionCount",
            Field::PublishDate => "publishDate",
        }
    }
}

/// A normalized value produced by one field extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Count(u64),
    DayMonth(String),
}

/// What a strategy found. Absent fields fall back to defaults on assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialResult {
    pub display_name: Option<String>,
    pub follower_count: Option<u64>,
    pub view_count: Option<u64>,
    pub interaction_count: Option<u64>,
    pub publish_date: Option<String>,
}

impl PartialResult {
    /// Build from extractor outcomes. A value whose shape does not fit its
    /// field is dropped.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (Field, FieldValue)>,
    {
        fields
            .into_iter()
            .fold(Self::default(), |partial, (field, value)| partial.with(field, value))
    }

    pub fn with(mut self, field: Field, value: FieldValue) -> Self {
        match (field, value) {
            (Field::DisplayName, FieldValue::Text(name)) => self.display_name = Some(name),
            (Field::FollowerCount, FieldValue::Count(n)) => self.follower_count = Some(n),
            (Field::ViewCount, FieldValue::Count(n)) => self.view_count = Some(n),
            (Field::InteractionCount, FieldValue::Count(n)) => self.interaction_count = Some(n),
            (Field::PublishDate, FieldValue::DayMonth(d)) => self.publish_date = Some(d),
            (field, value) => {
                tracing::debug!(field = field.as_str(), ?value, "Discarding mismatched value");
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_defaults() {
        let result = ExtractionResult::assemble(Platform::Other, PartialResult::default());
        assert_eq!(result.display_name, "Unknown");
        assert_eq!(result.follower_count, 0);
        assert_eq!(result.view_count, None);
        assert_eq!(result.interaction_count, None);
        assert_eq!(result.publish_date, None);
        assert_eq!(result.platform, Platform::Other);
    }

    #[test]
    fn test_assemble_overlays_partial() {
        let partial = PartialResult::from_fields([
            (Field::DisplayName, FieldValue::Text("Chef Ana".into())),
            (Field::FollowerCount, FieldValue::Count(1_200_000)),
            (Field::PublishDate, FieldValue::DayMonth("12/02".into())),
        ]);
        let result = ExtractionResult::assemble(Platform::Instagram, partial);
        assert_eq!(result.display_name, "Chef Ana");
        assert_eq!(result.follower_count, 1_200_000);
        assert_eq!(result.publish_date.as_deref(), Some("12/02"));
        assert_eq!(result.platform, Platform::Instagram);
    }

    #[test]
    fn test_view_count_only_for_video_like_platforms() {
        let partial = PartialResult::default().with(Field::ViewCount, FieldValue::Count(5));

        let result = ExtractionResult::assemble(Platform::Facebook, partial.clone());
        assert_eq!(result.view_count, None);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("viewCount").is_none());

        let result = ExtractionResult::assemble(Platform::Tiktok, partial);
        assert_eq!(result.view_count, Some(5));
    }

    #[test]
    fn test_mismatched_value_is_dropped() {
        let partial = PartialResult::default()
            .with(Field::FollowerCount, FieldValue::Text("lots".into()));
        assert!(partial.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let result = ExtractionResult {
            display_name: "x".into(),
            follower_count: 500_000,
            view_count: Some(10),
            interaction_count: None,
            publish_date: None,
            platform: Platform::Tiktok,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["displayName"], "x");
        assert_eq!(json["followerCount"], 500_000);
        assert_eq!(json["viewCount"], 10);
        assert_eq!(json["platform"], "tiktok");
        assert!(json.get("interactionCount").is_none());
        assert!(json.get("publishDate").is_none());
    }
}
