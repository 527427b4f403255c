//! Page-load orchestration.
//!
//! A [`LocaleRouter`] is created once per page load. It binds the language
//! switch links, then runs the redirect decision once. Each operation issues
//! at most one navigation.

use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::Config;
use crate::expiring::ExpiringStore;
use crate::i18n::{PageLocation, PathState};
use crate::navigator::Navigator;
use crate::redirect::{decide, Decision, NavigateReason, StayReason};
use crate::storage::StorageBackend;
use crate::switch::{switch_destination, ClickEvent, SwitchBindings, SwitchElement};

pub struct LocaleRouter<S, C, N> {
    config: Config,
    location: PageLocation,
    store: ExpiringStore<S, C>,
    navigator: N,
}

impl<S, C, N> LocaleRouter<S, C, N>
where
    S: StorageBackend,
    C: Clock,
    N: Navigator,
{
    pub fn new(
        config: Config,
        location: PageLocation,
        store: ExpiringStore<S, C>,
        navigator: N,
    ) -> Self {
        Self {
            config,
            location,
            store,
            navigator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn store(&self) -> &ExpiringStore<S, C> {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Locale analysis of the current page path.
    pub fn path_state(&self) -> PathState {
        PathState::analyze(&self.location.path, &self.config.locales)
    }

    /// The unexpired persisted locale choice for this origin.
    pub fn persisted_choice(&self) -> Option<String> {
        self.store.get(&self.location.storage_key())
    }

    /// Run the redirect decision for this page load and navigate if needed.
    ///
    /// `browser_language` is the language the browser reports; `None` is
    /// treated as an empty tag. Inferred redirects are not persisted; only
    /// an explicit switch stores a choice.
    pub fn check_and_redirect(&self, browser_language: Option<&str>) -> Decision {
        let browser_language = browser_language.unwrap_or_default();
        let state = self.path_state();

        debug!(
            location = %self.location,
            browser_language,
            current_locale = %state.current_locale_segment,
            remainder = %state.remainder_path,
            root_level = state.is_root_level,
            "Checking language redirect"
        );

        // Storage is only consulted for pages eligible for a redirect.
        if !state.is_root_level {
            debug!("Not a root-level page, skipping redirect");
            return Decision::Stay(StayReason::DeepPage);
        }

        let persisted = self.persisted_choice();
        if let Some(choice) = &persisted {
            debug!(choice = %choice, "Found persisted language choice");
        }

        let decision = decide(
            &self.location.origin(),
            &state,
            persisted.as_deref(),
            browser_language,
            &self.config.locales,
        );

        match &decision {
            Decision::Navigate { url, reason } => {
                info!(url = %url, reason = ?reason, "Redirecting to locale");
                self.navigator.navigate(url);
            }
            Decision::Stay(reason) => debug!(reason = ?reason, "No redirect needed"),
        }

        decision
    }

    /// Attach switch handlers to every marked element.
    pub fn bind_switch_links<E: SwitchElement>(&self, elements: &[E]) -> SwitchBindings {
        let bindings = SwitchBindings::bind(elements, &self.config.switch_marker);
        debug!(count = bindings.len(), "Bound language switch links");
        bindings
    }

    /// Dispatch a click on `element`.
    ///
    /// If the element has a switch binding, the default navigation is
    /// prevented and the switch runs. Returns the switch decision, or `None`
    /// when the element is not a switch link.
    pub fn handle_click(
        &self,
        bindings: &SwitchBindings,
        element: usize,
        event: &mut ClickEvent,
    ) -> Option<Decision> {
        let binding = bindings.for_element(element)?;
        event.prevent_default();
        Some(self.switch_language(&binding.target))
    }

    /// Persist `target` as the visitor's choice and navigate to the
    /// equivalent page in that locale.
    pub fn switch_language(&self, target: &str) -> Decision {
        self.store
            .set(&self.location.storage_key(), target, self.config.ttl_ms);

        let state = self.path_state();
        let url = switch_destination(
            &self.location.origin(),
            target,
            &state.remainder_path,
            &self.config.locales,
        );

        info!(locale = target, url = %url, "Switching language");
        self.navigator.navigate(&url);

        Decision::Navigate {
            url,
            reason: NavigateReason::Switch,
        }
    }
}
