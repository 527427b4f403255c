//! Simulate one page load of a multi-locale site.
//!
//! Usage:
//!   locale-redirect <url>                          # Run the redirect check
//!   locale-redirect <url> --lang ja                # With a given browser language
//!   locale-redirect <url> --switch <link-url>      # Click a language switch link
//!
//! The persisted language choice lives in LOCALE_STORAGE_FILE, so successive
//! runs behave like successive page loads in one browser. The browser
//! language defaults to the operating system locale.
//!
//! Optional environment variables:
//! - LOCALE_DEFAULTS (defaults to zh,zh-CN)
//! - LOCALE_SUPPORTED (defaults to en:en;ja:ja)
//! - LOCALE_FALLBACK (defaults to en)
//! - LOCALE_CONFIG_FILE (JSON locale config, overrides the three above)
//! - LOCALE_TTL_MS (defaults to 100000)
//! - LOCALE_SWITCH_MARKER (defaults to multiple-language-switch)
//! - LOCALE_STORAGE_FILE (defaults to .locale-storage.json)

use anyhow::{bail, Context, Result};
use tracing::info;

use locale_redirect::clock::SystemClock;
use locale_redirect::config::Config;
use locale_redirect::expiring::ExpiringStore;
use locale_redirect::i18n::PageLocation;
use locale_redirect::navigator::RecordingNavigator;
use locale_redirect::storage::FileStorage;
use locale_redirect::switch::{ClickEvent, LinkElement};
use locale_redirect::LocaleRouter;

struct Args {
    url: String,
    lang: Option<String>,
    switch: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut url = None;
    let mut lang = None;
    let mut switch = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => lang = Some(args.next().context("--lang requires a value")?),
            "--switch" => switch = Some(args.next().context("--switch requires a value")?),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ if url.is_none() => url = Some(arg.clone()),
            _ => bail!("Unexpected argument: {}", arg),
        }
    }

    Ok(Args {
        url: url.context("Usage: locale-redirect <url> [--lang <tag>] [--switch <link-url>]")?,
        lang,
        switch,
    })
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_redirect=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;
    let location = PageLocation::parse(&args.url)
        .with_context(|| format!("Invalid page URL: {}", args.url))?;

    info!("Loading {}", location);
    info!(
        "Default locales: {}; supported locales: {}; fallback: {}",
        config.locales.default_locales().collect::<Vec<_>>().join(", "),
        config.locales.supported_keys().collect::<Vec<_>>().join(", "),
        config.locales.fallback()
    );

    let store = ExpiringStore::new(FileStorage::new(&config.storage_file), SystemClock);
    let marker = config.switch_marker.clone();
    let router = LocaleRouter::new(config, location, store, RecordingNavigator::new());

    let decision = match args.switch {
        Some(href) => {
            let links = vec![LinkElement::new(&href, &[marker.as_str()])];
            let bindings = router.bind_switch_links(&links);
            let mut event = ClickEvent::new();
            match router.handle_click(&bindings, 0, &mut event) {
                Some(decision) => decision,
                None => bail!("Switch link {} names no locale", href),
            }
        }
        None => {
            let lang = args.lang.or_else(sys_locale::get_locale);
            router.check_and_redirect(lang.as_deref())
        }
    };

    info!("Decision: {}", decision);
    if let Some(url) = decision.url() {
        println!("{}", url);
    }

    Ok(())
}
