//! Social network platforms
//!
//! A closed set of six networks. Values outside the set are kept verbatim in
//! [`Platform::Unknown`] so lookups degrade to a generic label instead of
//! failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A social network a client account can live on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    Facebook,
    TikTok,
    Twitter,
    LinkedIn,
    YouTube,
    /// Raw value that matched none of the known networks
    Unknown(String),
}

impl Platform {
    /// Canonical order used by every per-platform view
    pub const ALL: [Platform; 6] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::TikTok,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::YouTube,
    ];

    /// Parse a backend value (case-insensitive, surrounding whitespace ignored)
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "facebook" => Platform::Facebook,
            "tiktok" => Platform::TikTok,
            "twitter" | "x" => Platform::Twitter,
            "linkedin" => Platform::LinkedIn,
            "youtube" => Platform::YouTube,
            _ => Platform::Unknown(value.to_string()),
        }
    }

    /// Storage key as written by the backend
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::TikTok => "tiktok",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::YouTube => "youtube",
            Platform::Unknown(raw) => raw.as_str(),
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::TikTok => "TikTok",
            Platform::Twitter => "X / Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::YouTube => "YouTube",
            Platform::Unknown(raw) if raw.trim().is_empty() => "Unknown",
            Platform::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Platform::Instagram => "📸",
            Platform::Facebook => "📘",
            Platform::TikTok => "🎵",
            Platform::Twitter => "🐦",
            Platform::LinkedIn => "💼",
            Platform::YouTube => "🎬",
            Platform::Unknown(_) => "🌐",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Platform::Unknown(_))
    }

    /// Position in [`Platform::ALL`], `None` for unknown platforms
    pub fn index(&self) -> Option<usize> {
        Platform::ALL.iter().position(|p| p == self)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Unknown(String::new())
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Platform::parse(&value)
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        Platform::parse(value)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_platforms() {
        for platform in Platform::ALL {
            assert_eq!(Platform::parse(platform.as_str()), platform);
        }
        assert_eq!(Platform::parse(" Instagram "), Platform::Instagram);
        assert_eq!(Platform::parse("X"), Platform::Twitter);
    }

    #[test]
    fn test_unknown_platform_falls_back() {
        let platform = Platform::parse("mastodon");
        assert_eq!(platform, Platform::Unknown("mastodon".to_string()));
        assert!(!platform.is_known());
        assert_eq!(platform.label(), "mastodon");
        assert_eq!(platform.emoji(), "🌐");
        assert_eq!(platform.index(), None);

        assert_eq!(Platform::default().label(), "Unknown");
    }

    #[test]
    fn test_serde_uses_storage_key() {
        let json = serde_json::to_string(&Platform::LinkedIn).unwrap();
        assert_eq!(json, r#""linkedin""#);

        let parsed: Platform = serde_json::from_str(r#""threads""#).unwrap();
        assert_eq!(parsed.as_str(), "threads");
    }

    #[test]
    fn test_canonical_order() {
        let keys: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            keys,
            ["instagram", "facebook", "tiktok", "twitter", "linkedin", "youtube"]
        );
        assert_eq!(Platform::YouTube.index(), Some(5));
    }
}
