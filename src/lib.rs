//! Language negotiation and locale redirects for a statically hosted,
//! multi-locale website.
//!
//! On each page load the [`router::LocaleRouter`] decides whether the visitor
//! should be sent to a locale-prefixed URL, based on a persisted language
//! choice, the browser language and the locale segment already in the path.
//! Language switch links persist an explicit choice and navigate directly.
//!
//! Browser facilities are injected: storage through
//! [`storage::StorageBackend`], time through [`clock::Clock`] and page
//! navigation through [`navigator::Navigator`].

pub mod clock;
pub mod config;
pub mod error;
pub mod expiring;
pub mod i18n;
pub mod navigator;
pub mod redirect;
pub mod router;
pub mod storage;
pub mod switch;

pub use error::{ConfigError, StorageError};
pub use redirect::{Decision, NavigateReason, StayReason};
pub use router::LocaleRouter;
