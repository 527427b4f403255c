//! Redirect decision for a page load.
//!
//! [`decide`] is a pure function of the path, the persisted choice, the
//! browser language and the locale configuration. Rules are tried in order
//! and the first one that applies wins:
//!
//! 1. pages below the root level are never redirected
//! 2. a persisted choice of a known locale is honored
//! 3. otherwise the browser language is matched against the configuration,
//!    falling back to the fallback locale when nothing matches

use std::fmt;

use crate::i18n::{LocaleConfig, PathState};

/// Why a page load did not navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayReason {
    /// The page is below the site root or a locale root
    DeepPage,
    /// The page already shows the persisted locale
    PersistedLocaleActive,
    /// The browser language equals the current locale segment
    AlreadyAligned,
    /// Default-locale browser on a page without a locale prefix
    DefaultLocaleActive,
    /// The browser language belongs to the locale already shown
    SupportedLocaleActive,
    /// Unmatched browser language on the fallback locale
    FallbackActive,
}

/// Which rule produced a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateReason {
    PersistedChoice,
    BrowserLanguage,
    Fallback,
    /// Explicit choice through a language switch link
    Switch,
}

/// Outcome of one decision pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Stay(StayReason),
    Navigate { url: String, reason: NavigateReason },
}

impl Decision {
    pub fn url(&self) -> Option<&str> {
        match self {
            Decision::Navigate { url, .. } => Some(url.as_str()),
            Decision::Stay(_) => None,
        }
    }

    pub fn is_navigate(&self) -> bool {
        matches!(self, Decision::Navigate { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Stay(reason) => write!(f, "stay ({:?})", reason),
            Decision::Navigate { url, reason } => write!(f, "navigate to {} ({:?})", url, reason),
        }
    }
}

/// URL of a locale's root page: the site root for default locales,
/// `origin/<key>` otherwise.
pub fn locale_root_url(origin: &str, locale: &str, locales: &LocaleConfig) -> String {
    if locales.is_default(locale) {
        origin.to_string()
    } else {
        format!("{}/{}", origin, locale)
    }
}

/// Decide whether the page should navigate.
///
/// # Arguments
/// * `origin` - `protocol//host` of the current page
/// * `path` - analysis of the current URL path
/// * `persisted` - unexpired persisted locale choice, if any
/// * `browser_language` - language reported by the browser ("" if unknown)
/// * `locales` - site locale configuration
pub fn decide(
    origin: &str,
    path: &PathState,
    persisted: Option<&str>,
    browser_language: &str,
    locales: &LocaleConfig,
) -> Decision {
    if !path.is_root_level {
        return Decision::Stay(StayReason::DeepPage);
    }

    if let Some(decision) = persisted.and_then(|choice| apply_persisted(origin, path, choice, locales)) {
        return decision;
    }

    infer_from_browser(origin, path, browser_language, locales)
}

/// Apply a persisted choice; `None` if the choice names no known locale.
fn apply_persisted(
    origin: &str,
    path: &PathState,
    choice: &str,
    locales: &LocaleConfig,
) -> Option<Decision> {
    let current = path.current_locale_segment.as_str();

    if locales.is_default(choice) {
        if current.is_empty() {
            return Some(Decision::Stay(StayReason::PersistedLocaleActive));
        }
        return Some(Decision::Navigate {
            url: origin.to_string(),
            reason: NavigateReason::PersistedChoice,
        });
    }

    if locales.is_supported(choice) {
        if current == choice {
            return Some(Decision::Stay(StayReason::PersistedLocaleActive));
        }
        return Some(Decision::Navigate {
            url: locale_root_url(origin, choice, locales),
            reason: NavigateReason::PersistedChoice,
        });
    }

    None
}

fn infer_from_browser(
    origin: &str,
    path: &PathState,
    browser_language: &str,
    locales: &LocaleConfig,
) -> Decision {
    let current = path.current_locale_segment.as_str();

    if browser_language == current {
        return Decision::Stay(StayReason::AlreadyAligned);
    }

    if locales.is_default(browser_language) {
        if locales.is_supported(current) {
            return Decision::Navigate {
                url: origin.to_string(),
                reason: NavigateReason::BrowserLanguage,
            };
        }
        return Decision::Stay(StayReason::DefaultLocaleActive);
    }

    if let Some(key) = locales.supported_key_for(browser_language) {
        let on_locale =
            current == key || locales.variants(key).is_some_and(|v| v.contains(current));
        if on_locale {
            return Decision::Stay(StayReason::SupportedLocaleActive);
        }
        return Decision::Navigate {
            url: locale_root_url(origin, key, locales),
            reason: NavigateReason::BrowserLanguage,
        };
    }

    let fallback = locales.fallback();
    if current == fallback {
        return Decision::Stay(StayReason::FallbackActive);
    }
    Decision::Navigate {
        url: locale_root_url(origin, fallback, locales),
        reason: NavigateReason::Fallback,
    }
}
