//! Locale registry: which locales the site serves and how they are addressed.
//!
//! A site has two kinds of locales:
//!
//! - **default** locales are rendered at the site root with no path prefix
//! - **supported** locales live under their own first path segment (`/en`,
//!   `/ja`) and accept a set of browser language-tag variants
//!
//! One supported locale is the fallback for visitors whose browser language
//! matches nothing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Serialized shape of a [`LocaleConfig`], validated on conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocaleConfig {
    default_locales: BTreeSet<String>,
    supported_locales: BTreeMap<String, BTreeSet<String>>,
    fallback_locale: String,
}

impl TryFrom<RawLocaleConfig> for LocaleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawLocaleConfig) -> Result<Self, Self::Error> {
        LocaleConfig::new(
            raw.default_locales,
            raw.supported_locales,
            raw.fallback_locale,
        )
    }
}

/// Validated, immutable locale configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLocaleConfig")]
pub struct LocaleConfig {
    /// Locales served at the site root (e.g., "zh", "zh-CN")
    default_locales: BTreeSet<String>,

    /// Path-segment key to the browser language tags it accepts
    /// (e.g., "en" -> {"en", "en-US"})
    supported_locales: BTreeMap<String, BTreeSet<String>>,

    /// Supported key used when nothing else matches
    fallback_locale: String,
}

impl LocaleConfig {
    /// Build a configuration, checking that:
    /// - no tag is empty or contains `/`
    /// - no default locale is also a supported key
    /// - the fallback is a supported key
    pub fn new(
        default_locales: BTreeSet<String>,
        supported_locales: BTreeMap<String, BTreeSet<String>>,
        fallback_locale: String,
    ) -> Result<Self, ConfigError> {
        let all_tags = default_locales
            .iter()
            .chain(supported_locales.keys())
            .chain(supported_locales.values().flatten())
            .chain(std::iter::once(&fallback_locale));
        for tag in all_tags {
            validate_tag(tag)?;
        }

        if let Some(overlap) = default_locales
            .iter()
            .find(|tag| supported_locales.contains_key(*tag))
        {
            return Err(ConfigError::Overlap(overlap.clone()));
        }

        if !supported_locales.contains_key(&fallback_locale) {
            return Err(ConfigError::UnknownFallback(fallback_locale));
        }

        Ok(Self {
            default_locales,
            supported_locales,
            fallback_locale,
        })
    }

    /// Convenience constructor from string slices.
    ///
    /// # Example
    /// ```
    /// use locale_redirect::i18n::LocaleConfig;
    ///
    /// let config = LocaleConfig::from_tags(
    ///     &["zh", "zh-CN"],
    ///     &[("en", &["en", "en-US"]), ("ja", &["ja"])],
    ///     "en",
    /// )
    /// .unwrap();
    /// assert_eq!(config.supported_key_for("en-US"), Some("en"));
    /// ```
    pub fn from_tags(
        default_locales: &[&str],
        supported_locales: &[(&str, &[&str])],
        fallback_locale: &str,
    ) -> Result<Self, ConfigError> {
        Self::new(
            default_locales.iter().map(|s| s.to_string()).collect(),
            supported_locales
                .iter()
                .map(|(key, variants)| {
                    (
                        key.to_string(),
                        variants.iter().map(|v| v.to_string()).collect(),
                    )
                })
                .collect(),
            fallback_locale.to_string(),
        )
    }

    /// Check if a tag is rendered at the site root.
    pub fn is_default(&self, tag: &str) -> bool {
        self.default_locales.contains(tag)
    }

    /// Check if a tag is a supported-locale path segment.
    pub fn is_supported(&self, key: &str) -> bool {
        self.supported_locales.contains_key(key)
    }

    /// Browser language variants accepted by a supported key.
    pub fn variants(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.supported_locales.get(key)
    }

    /// Find the supported key whose variant list contains `language`.
    ///
    /// Matching is exact; keys are searched in sorted order.
    pub fn supported_key_for(&self, language: &str) -> Option<&str> {
        self.supported_locales
            .iter()
            .find(|(_, variants)| variants.contains(language))
            .map(|(key, _)| key.as_str())
    }

    pub fn default_locales(&self) -> impl Iterator<Item = &str> {
        self.default_locales.iter().map(String::as_str)
    }

    pub fn supported_keys(&self) -> impl Iterator<Item = &str> {
        self.supported_locales.keys().map(String::as_str)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback_locale
    }
}

impl Default for LocaleConfig {
    /// Chinese at the root, English and Japanese under their own prefix,
    /// English for everything else.
    fn default() -> Self {
        let supported = [
            ("en".to_string(), BTreeSet::from(["en".to_string()])),
            ("ja".to_string(), BTreeSet::from(["ja".to_string()])),
        ];
        Self {
            default_locales: BTreeSet::from(["zh".to_string(), "zh-CN".to_string()]),
            supported_locales: BTreeMap::from(supported),
            fallback_locale: "en".to_string(),
        }
    }
}

fn validate_tag(tag: &str) -> Result<(), ConfigError> {
    if tag.trim().is_empty() {
        return Err(ConfigError::EmptyLocale);
    }
    if tag.contains('/') {
        return Err(ConfigError::InvalidLocale(tag.to_string()));
    }
    Ok(())
}
