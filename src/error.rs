use thiserror::Error;

/// Failures reported by a storage backend.
///
/// The expiring store never hands these to its callers; they are logged and
/// the read or write is treated as if nothing was stored.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Invalid locale configuration or page location.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("locale tag must not be empty")]
    EmptyLocale,

    #[error("locale tag '{0}' must not contain '/'")]
    InvalidLocale(String),

    #[error("locale '{0}' is listed as both a default and a supported locale")]
    Overlap(String),

    #[error("fallback locale '{0}' is not a supported locale key")]
    UnknownFallback(String),

    #[error("malformed supported locale entry '{0}', expected key:variant|variant")]
    MalformedSupported(String),

    #[error("invalid TTL '{0}', expected a positive number of milliseconds")]
    InvalidTtl(String),

    #[error("invalid page URL '{0}'")]
    InvalidUrl(String),
}
