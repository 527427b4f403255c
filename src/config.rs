use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::error::ConfigError;
use crate::i18n::LocaleConfig;

/// Default persistence window for an explicit language choice.
pub const DEFAULT_TTL_MS: u64 = 100_000;

/// Default class marking the first child of a language switch link.
pub const DEFAULT_SWITCH_MARKER: &str = "multiple-language-switch";

#[derive(Debug, Clone)]
pub struct Config {
    // Locales
    pub locales: LocaleConfig,

    // Persistence
    pub ttl_ms: u64,
    pub storage_file: PathBuf,

    // Switch links
    pub switch_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: LocaleConfig::default(),
            ttl_ms: DEFAULT_TTL_MS,
            storage_file: PathBuf::from(".locale-storage.json"),
            switch_marker: DEFAULT_SWITCH_MARKER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Locales - a JSON file wins over the individual variables
            locales: match std::env::var("LOCALE_CONFIG_FILE") {
                Ok(path) => load_locale_file(&path)?,
                Err(_) => locales_from_env()?,
            },

            // Persistence
            ttl_ms: match std::env::var("LOCALE_TTL_MS") {
                Ok(v) => parse_ttl(&v).context("LOCALE_TTL_MS is invalid")?,
                Err(_) => DEFAULT_TTL_MS,
            },
            storage_file: std::env::var("LOCALE_STORAGE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".locale-storage.json")),

            // Switch links
            switch_marker: std::env::var("LOCALE_SWITCH_MARKER")
                .unwrap_or_else(|_| DEFAULT_SWITCH_MARKER.to_string()),
        })
    }
}

fn locales_from_env() -> Result<LocaleConfig> {
    let defaults = std::env::var("LOCALE_DEFAULTS").unwrap_or_else(|_| "zh,zh-CN".to_string());
    let supported = std::env::var("LOCALE_SUPPORTED").unwrap_or_else(|_| "en:en;ja:ja".to_string());
    let fallback = std::env::var("LOCALE_FALLBACK").unwrap_or_else(|_| "en".to_string());

    let supported = parse_supported(&supported).context("LOCALE_SUPPORTED is invalid")?;
    LocaleConfig::new(parse_locale_list(&defaults), supported, fallback.trim().to_string())
        .context("Locale configuration is invalid")
}

fn load_locale_file(path: &str) -> Result<LocaleConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read locale config file {}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse locale config file {}", path))
}

/// Parse a comma-separated list of locale tags: `zh, zh-CN`.
pub fn parse_locale_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse supported locales: `en:en|en-US;ja:ja`.
///
/// A bare key (`ja`) accepts only itself as a variant.
pub fn parse_supported(value: &str) -> Result<BTreeMap<String, BTreeSet<String>>, ConfigError> {
    let mut supported = BTreeMap::new();

    for entry in value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (key, variants) = match entry.split_once(':') {
            Some((key, variants)) => {
                let variants: BTreeSet<String> = variants
                    .split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                (key.trim(), variants)
            }
            None => (entry, BTreeSet::from([entry.to_string()])),
        };

        if key.is_empty() || variants.is_empty() {
            return Err(ConfigError::MalformedSupported(entry.to_string()));
        }
        supported.insert(key.to_string(), variants);
    }

    Ok(supported)
}

/// Parse a TTL in milliseconds; zero is rejected.
pub fn parse_ttl(value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(ttl) if ttl > 0 => Ok(ttl),
        _ => Err(ConfigError::InvalidTtl(value.to_string())),
    }
}
