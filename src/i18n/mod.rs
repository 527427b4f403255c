//! Locale model for a multi-locale static site.
//!
//! # Architecture
//!
//! - `registry`: which locales exist and how each is addressed in URLs
//! - `location`: the protocol, host and path of the page being loaded
//! - `path`: locale prefix and remainder derived from a URL path
//!
//! # Example
//!
//! ```
//! use locale_redirect::i18n::{LocaleConfig, PathState};
//!
//! let config = LocaleConfig::default();
//! let state = PathState::analyze("/ja/docs/", &config);
//!
//! assert_eq!(state.current_locale_segment, "ja");
//! assert_eq!(state.remainder_path, "docs");
//! assert!(!state.is_root_level);
//! ```

mod location;
mod path;
mod registry;

pub use location::{link_path, PageLocation};
pub use path::PathState;
pub use registry::LocaleConfig;
