//! The address of the page being loaded.

use std::fmt;

use crate::error::ConfigError;

/// Protocol, host and path of the current page, as a browser reports them.
///
/// `protocol` keeps its trailing colon (`https:`), matching
/// `window.location.protocol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub protocol: String,
    pub host: String,
    pub path: String,
}

impl PageLocation {
    /// Parse an absolute URL such as `https://example.com:8080/ja/docs?x=1#top`.
    ///
    /// Query and fragment are dropped; a missing path becomes `/`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidUrl(url.to_string());

        let (scheme, rest) = url.trim().split_once("://").ok_or_else(invalid)?;
        let scheme_ok = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !scheme_ok {
            return Err(invalid());
        }

        let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let host = &rest[..host_end];
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let path = strip_query_and_fragment(&rest[host_end..]);

        Ok(Self {
            protocol: format!("{}:", scheme.to_ascii_lowercase()),
            host: host.to_string(),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        })
    }

    /// `protocol//host`, the URL of the site root without a trailing slash.
    pub fn origin(&self) -> String {
        format!("{}//{}", self.protocol, self.host)
    }

    /// Storage key under which the persisted language choice for this
    /// origin is kept.
    pub fn storage_key(&self) -> String {
        format!("{}-language", self.origin())
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.path)
    }
}

/// Path component of an absolute or relative link URL.
///
/// `https://example.com/ja?x#y` -> `/ja`, `/en/` -> `/en/`, `ja` -> `ja`
pub fn link_path(href: &str) -> &str {
    let without_origin = match href.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => href,
    };
    strip_query_and_fragment(without_origin)
}

fn strip_query_and_fragment(s: &str) -> &str {
    s.find(['?', '#']).map_or(s, |i| &s[..i])
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse Tests ====================

    #[test]
    fn test_parse_full_url() {
        let location = PageLocation::parse("https://example.com/ja/docs/?tab=1#intro").unwrap();
        assert_eq!(location.protocol, "https:");
        assert_eq!(location.host, "example.com");
        assert_eq!(location.path, "/ja/docs/");
    }

    #[test]
    fn test_parse_keeps_port_in_host() {
        let location = PageLocation::parse("http://localhost:8080/en").unwrap();
        assert_eq!(location.host, "localhost:8080");
        assert_eq!(location.origin(), "http://localhost:8080");
    }

    #[test]
    fn test_parse_without_path() {
        assert_eq!(PageLocation::parse("https://example.com").unwrap().path, "/");
        assert_eq!(PageLocation::parse("https://example.com?x=1").unwrap().path, "/");
        assert_eq!(PageLocation::parse("https://example.com#top").unwrap().path, "/");
    }

    #[test]
    fn test_parse_lowercases_scheme() {
        let location = PageLocation::parse("HTTPS://Example.com/").unwrap();
        assert_eq!(location.protocol, "https:");
        assert_eq!(location.host, "Example.com");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for url in ["", "example.com/en", "://example.com", "https:///en", "1http://x", "https://a b/"] {
            assert_eq!(
                PageLocation::parse(url),
                Err(ConfigError::InvalidUrl(url.to_string())),
                "expected '{}' to be rejected",
                url
            );
        }
    }

    // ==================== Derived Value Tests ====================

    #[test]
    fn test_storage_key() {
        let location = PageLocation::parse("https://example.com/ja").unwrap();
        assert_eq!(location.storage_key(), "https://example.com-language");
    }

    #[test]
    fn test_display() {
        let location = PageLocation::parse("https://example.com/ja/docs?x").unwrap();
        assert_eq!(location.to_string(), "https://example.com/ja/docs");
    }

    // ==================== link_path Tests ====================

    #[test]
    fn test_link_path() {
        assert_eq!(link_path("https://example.com/ja?x=1#y"), "/ja");
        assert_eq!(link_path("https://example.com"), "");
        assert_eq!(link_path("/en/"), "/en/");
        assert_eq!(link_path("ja#top"), "ja");
    }
}
