use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Social services recognized by URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
    Facebook,
    Twitter,
    Threads,
    Other,
}

/// Ordered URL substring rules. First match wins.
const URL_RULES: &[(&str, Platform)] = &[
    ("youtube.com", Platform::Youtube),
    ("youtu.be", Platform::Youtube),
    ("tiktok.com", Platform::Tiktok),
    ("instagram.com", Platform::Instagram),
    ("facebook.com", Platform::Facebook),
    ("fb.com", Platform::Facebook),
    ("fb.watch", Platform::Facebook),
    ("twitter.com", Platform::Twitter),
    ("//x.com", Platform::Twitter),
    (".x.com", Platform::Twitter),
    ("threads.net", Platform::Threads),
    ("threads.com", Platform::Threads),
];

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Youtube,
        Platform::Tiktok,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Threads,
        Platform::Other,
    ];

    /// Classify a URL. Total: anything unrecognized is [`Platform::Other`].
    pub fn classify(url: &str) -> Self {
        let url = url.to_ascii_lowercase();
        URL_RULES
            .iter()
            .find(|(needle, _)| url.contains(needle))
            .map(|(_, platform)| *platform)
            .unwrap_or(Platform::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Threads => "threads",
            Platform::Other => "other",
        }
    }

    /// Kind of service, independent of the brand.
    pub fn category(&self) -> &'static str {
        match self {
            Platform::Youtube => "video",
            Platform::Tiktok => "shortvideo",
            Platform::Instagram => "photo",
            Platform::Facebook => "social",
            Platform::Twitter => "microblog",
            Platform::Threads => "threads",
            Platform::Other => "other",
        }
    }

    /// Whether the result carries a view count for this platform.
    pub fn is_video_like(&self) -> bool {
        matches!(
            self,
            Platform::Youtube | Platform::Tiktok | Platform::Instagram
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s || p.category() == s)
            .ok_or_else(|| format!("Unknown platform: {}", s))
    }
}
