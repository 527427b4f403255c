//! Locale-aware analysis of a URL path.

use crate::i18n::LocaleConfig;

/// What a URL path says about the locale of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    /// First non-empty path segment, or "" at the site root
    pub current_locale_segment: String,

    /// Path with any supported-locale prefix removed, without leading or
    /// trailing slashes ("" for a root page)
    pub remainder_path: String,

    /// Whether the page is the site root or a supported locale's own root
    pub is_root_level: bool,
}

impl PathState {
    /// Analyze a raw URL path such as `/ja/docs/`.
    ///
    /// Empty segments are ignored, so `/en/`, `/en` and `//en` are equivalent.
    pub fn analyze(path: &str, locales: &LocaleConfig) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let current_locale_segment = segments.first().copied().unwrap_or_default();
        let prefixed = locales.is_supported(current_locale_segment);

        let remainder = if prefixed { &segments[1..] } else { &segments[..] };

        // The root page itself counts as one level, so only a page with
        // nothing after the locale prefix is root level.
        let depth = remainder.len() + 1;

        Self {
            current_locale_segment: current_locale_segment.to_string(),
            remainder_path: remainder.join("/"),
            is_root_level: depth <= 1,
        }
    }
}
