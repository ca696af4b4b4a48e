//! Landing page configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for the upstream catalog endpoint and the rendered page.
///
/// Every field has a default, so an empty TOML document yields the
/// IELTS course page exactly as it is served in production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Base URL of the discovery service API.
    pub api_base: String,
    /// Product slug requested from the catalog.
    pub product_slug: String,
    /// Content language query parameter.
    pub lang: String,
    /// Value of the `X-TENMS-SOURCE-PLATFORM` request header.
    pub source_platform: String,
    /// Seconds a fetched product document stays fresh.
    pub revalidate_secs: u64,
    /// Image shown when the product has no media.
    pub fallback_image: String,
    /// Background image of the hero banner.
    pub hero_banner: String,
    /// Rating badge image next to the title.
    pub rating_badge: String,
    /// Caption shown beside the rating badge.
    pub rating_caption: String,
    /// Price label in the sidebar.
    pub price_label: String,
    /// Heading above the sidebar checklist.
    pub checklist_heading: String,
    /// Accessible title of the embedded trailer player.
    pub trailer_title: String,
    /// Log output format (`json` or `human`).
    pub log_format: String,
    /// Minimum log level.
    pub log_level: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.10minuteschool.com/discovery-service/api/v1".to_string(),
            product_slug: "ielts-course".to_string(),
            lang: "en".to_string(),
            source_platform: "web".to_string(),
            revalidate_secs: 60,
            fallback_image: "/fallback.jpg".to_string(),
            hero_banner: "https://cdn.10minuteschool.com/images/ui_%281%29_1716445506383.jpeg"
                .to_string(),
            rating_badge:
                "https://cdn.10minuteschool.com/images/Dev_Handoff_Q1_24_Frame_2_1725444418666.png"
                    .to_string(),
            rating_caption: "(82.6% শিক্ষার্থী কোর্স শেষে ৫ রেটিং দিয়েছেন)".to_string(),
            price_label: "৳1,000".to_string(),
            checklist_heading: "এই কোর্সে যা থাকছে".to_string(),
            trailer_title: "Course Trailer | IELTS Course by Munzereen Shahid".to_string(),
            log_format: "json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl LandingConfig {
    /// Keys that may be overridden one at a time (e.g. from platform variables).
    pub const KEYS: &'static [&'static str] = &[
        "api_base",
        "product_slug",
        "lang",
        "source_platform",
        "revalidate_secs",
        "fallback_image",
        "hero_banner",
        "rating_badge",
        "rating_caption",
        "price_label",
        "checklist_heading",
        "trailer_title",
        "log_format",
        "log_level",
    ];

    /// Parse a TOML document, filling missing keys with defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Override a single key with a string value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.to_string();
        match key {
            "api_base" => self.api_base = value,
            "product_slug" => self.product_slug = value,
            "lang" => self.lang = value,
            "source_platform" => self.source_platform = value,
            "revalidate_secs" => {
                self.revalidate_secs =
                    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("expected a number of seconds, got '{}'", value),
                    })?;
            }
            "fallback_image" => self.fallback_image = value,
            "hero_banner" => self.hero_banner = value,
            "rating_badge" => self.rating_badge = value,
            "rating_caption" => self.rating_caption = value,
            "price_label" => self.price_label = value,
            "checklist_heading" => self.checklist_heading = value,
            "trailer_title" => self.trailer_title = value,
            "log_format" => self.log_format = value,
            "log_level" => self.log_level = value,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Check values that would otherwise fail at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "api_base".to_string(),
                message: format!("must be an http(s) URL, got '{}'", self.api_base),
            });
        }
        if self.product_slug.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "product_slug".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Full URL of the product document.
    pub fn product_url(&self) -> String {
        format!(
            "{}/products/{}?lang={}",
            self.api_base.trim_end_matches('/'),
            self.product_slug,
            self.lang
        )
    }

    /// How long a fetched document stays fresh.
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    /// Cache key of the product document.
    pub fn cache_key(&self) -> String {
        format!("product:{}:{}", self.product_slug, self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builds_original_endpoint() {
        let config = LandingConfig::default();

        assert_eq!(
            config.product_url(),
            "https://api.10minuteschool.com/discovery-service/api/v1/products/ielts-course?lang=en"
        );
        assert_eq!(config.source_platform, "web");
        assert_eq!(config.revalidate(), Duration::from_secs(60));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LandingConfig::from_toml_str("").unwrap();
        assert_eq!(config, LandingConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = LandingConfig::from_toml_str(
            r#"
product_slug = "spoken-english"
lang = "bn"
revalidate_secs = 300
"#,
        )
        .unwrap();

        assert_eq!(config.product_slug, "spoken-english");
        assert_eq!(config.revalidate_secs, 300);
        assert!(config.product_url().ends_with("/products/spoken-english?lang=bn"));
        assert_eq!(config.cache_key(), "product:spoken-english:bn");
        // Untouched keys keep their defaults
        assert_eq!(config.fallback_image, "/fallback.jpg");
    }

    #[test]
    fn test_trailing_slash_in_api_base() {
        let mut config = LandingConfig::default();
        config.set("api_base", "https://example.com/api/").unwrap();

        assert_eq!(
            config.product_url(),
            "https://example.com/api/products/ielts-course?lang=en"
        );
    }

    #[test]
    fn test_invalid_toml() {
        let result = LandingConfig::from_toml_str("revalidate_secs = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_non_http_api_base() {
        let result = LandingConfig::from_toml_str("api_base = \"ftp://example.com\"");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_set_revalidate() {
        let mut config = LandingConfig::default();
        config.set("revalidate_secs", " 120 ").unwrap();
        assert_eq!(config.revalidate_secs, 120);

        let err = config.set("revalidate_secs", "often").unwrap_err();
        assert!(err.to_string().contains("revalidate_secs"));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = LandingConfig::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(key)) if key == "theme"
        ));
    }

    #[test]
    fn test_every_listed_key_is_settable() {
        let mut config = LandingConfig::default();
        for key in LandingConfig::KEYS {
            let value = if *key == "revalidate_secs" {
                "30"
            } else if *key == "api_base" {
                "https://example.com"
            } else {
                "x"
            };
            config.set(key, value).unwrap();
        }
    }
}
