//! Language switch links.
//!
//! A switch link is an anchor whose first child carries a marker class. The
//! locale it switches to is the last segment of its URL path, so
//! `<a href="/ja"><span class="multiple-language-switch">日本語</span></a>`
//! switches to `ja`.

use tracing::{debug, warn};

use crate::i18n::{link_path, LocaleConfig};

/// An anchor element that may be a language switch control.
pub trait SwitchElement {
    /// The link target, if the anchor has one.
    fn href(&self) -> Option<&str>;

    /// Whether the anchor's first child element has the given class.
    fn first_child_has_class(&self, class: &str) -> bool;
}

/// Plain anchor description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkElement {
    pub href: Option<String>,
    /// Classes of the first child element (empty if there is none)
    pub first_child_classes: Vec<String>,
}

impl LinkElement {
    pub fn new(href: &str, first_child_classes: &[&str]) -> Self {
        Self {
            href: Some(href.to_string()),
            first_child_classes: first_child_classes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SwitchElement for LinkElement {
    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn first_child_has_class(&self, class: &str) -> bool {
        self.first_child_classes.iter().any(|c| c == class)
    }
}

/// Default navigation state of a click, as `preventDefault` sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A switch handler attached to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchBinding {
    /// Position of the element in the list that was bound
    pub element: usize,
    /// Locale the link switches to
    pub target: String,
}

/// Handlers attached by one binding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchBindings {
    bindings: Vec<SwitchBinding>,
}

impl SwitchBindings {
    /// Attach a handler to every element whose first child carries `marker`.
    pub fn bind<E: SwitchElement>(elements: &[E], marker: &str) -> Self {
        let mut bindings = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            let Some(href) = element.href() else {
                continue;
            };
            if !element.first_child_has_class(marker) {
                continue;
            }

            match switch_target(href) {
                Some(target) => {
                    debug!(index, href, locale = target, "Bound language switch link");
                    bindings.push(SwitchBinding {
                        element: index,
                        target: target.to_string(),
                    });
                }
                None => warn!(index, href, "Switch link has no locale segment, not binding"),
            }
        }

        Self { bindings }
    }

    /// The binding for an element, if one was attached.
    pub fn for_element(&self, element: usize) -> Option<&SwitchBinding> {
        self.bindings.iter().find(|b| b.element == element)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Locale named by a switch link: the last non-empty segment of its path.
pub fn switch_target(href: &str) -> Option<&str> {
    link_path(href).split('/').filter(|s| !s.is_empty()).next_back()
}

/// Destination of a switch to `target` from a page whose path remainder is
/// `remainder`, so the visitor lands on the same page in the new locale.
///
/// Default locales live at `origin/<remainder>`, all others at
/// `origin/<target>/<remainder>`. On a root page this keeps the trailing
/// slash (`origin/`, `origin/ja/`), unlike the redirect URLs.
pub fn switch_destination(
    origin: &str,
    target: &str,
    remainder: &str,
    locales: &LocaleConfig,
) -> String {
    if locales.is_default(target) {
        format!("{}/{}", origin, remainder)
    } else {
        format!("{}/{}/{}", origin, target, remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "multiple-language-switch";
    const ORIGIN: &str = "https://example.com";

    // ==================== Target Extraction Tests ====================

    #[test]
    fn test_switch_target() {
        assert_eq!(switch_target("https://example.com/ja"), Some("ja"));
        assert_eq!(switch_target("https://example.com/ja/"), Some("ja"));
        assert_eq!(switch_target("/zh-CN?from=nav"), Some("zh-CN"));
        assert_eq!(switch_target("https://example.com/docs/en#top"), Some("en"));
        assert_eq!(switch_target("https://example.com/"), None);
        assert_eq!(switch_target(""), None);
    }

    // ==================== Binding Tests ====================

    #[test]
    fn test_bind_only_marked_links() {
        let elements = vec![
            LinkElement::new("https://example.com/en", &[MARKER]),
            LinkElement::new("https://example.com/about", &["nav-item"]),
            LinkElement::new("https://example.com/ja", &["icon", MARKER]),
            LinkElement {
                href: None,
                first_child_classes: vec![MARKER.to_string()],
            },
            LinkElement::new("https://example.com/", &[MARKER]),
        ];

        let bindings = SwitchBindings::bind(&elements, MARKER);

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.for_element(0).unwrap().target, "en");
        assert!(bindings.for_element(1).is_none());
        assert_eq!(bindings.for_element(2).unwrap().target, "ja");
        assert!(bindings.for_element(3).is_none());
        assert!(bindings.for_element(4).is_none());
    }

    #[test]
    fn test_bind_nothing() {
        let elements: Vec<LinkElement> = Vec::new();
        assert!(SwitchBindings::bind(&elements, MARKER).is_empty());
    }

    #[test]
    fn test_bindings_follow_element_positions() {
        let elements = vec![
            LinkElement::new("/ja", &[MARKER]),
            LinkElement::new("/en", &[MARKER]),
        ];
        let bindings = SwitchBindings::bind(&elements, MARKER);
        assert_eq!(bindings.for_element(0).unwrap().target, "ja");
        assert_eq!(bindings.for_element(1).unwrap().target, "en");
    }

    // ==================== Destination Tests ====================

    #[test]
    fn test_destination_supported_keeps_subpage() {
        let config = LocaleConfig::default();
        assert_eq!(
            switch_destination(ORIGIN, "en", "docs", &config),
            "https://example.com/en/docs"
        );
    }

    #[test]
    fn test_destination_default_drops_prefix() {
        let config = LocaleConfig::default();
        assert_eq!(
            switch_destination(ORIGIN, "zh", "docs/guide", &config),
            "https://example.com/docs/guide"
        );
        assert_eq!(switch_destination(ORIGIN, "zh", "", &config), "https://example.com/");
    }

    #[test]
    fn test_destination_locale_root() {
        let config = LocaleConfig::default();
        assert_eq!(switch_destination(ORIGIN, "ja", "", &config), "https://example.com/ja/");
    }

    // ==================== ClickEvent Tests ====================

    #[test]
    fn test_click_event_prevent_default() {
        let mut event = ClickEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
