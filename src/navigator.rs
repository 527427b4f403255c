//! Page navigation capability.

use std::cell::RefCell;

use tracing::info;

/// Performs a full-page navigation.
///
/// In a browser this abandons the current page; callers must issue at most one
/// navigation per run.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// Navigator that records every requested URL instead of leaving the page.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All URLs navigated to, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        info!(url, "Navigating");
        self.visited.borrow_mut().push(url.to_string());
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate(&self, url: &str) {
        (**self).navigate(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_keeps_order() {
        let navigator = RecordingNavigator::new();
        assert!(navigator.last().is_none());

        navigator.navigate("https://example.com/en");
        navigator.navigate("https://example.com");

        assert_eq!(
            navigator.visited(),
            vec!["https://example.com/en", "https://example.com"]
        );
        assert_eq!(navigator.last().as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_navigator_by_reference() {
        let navigator = RecordingNavigator::new();
        let by_ref = &navigator;
        by_ref.navigate("https://example.com/ja");
        assert_eq!(navigator.visited().len(), 1);
    }
}
