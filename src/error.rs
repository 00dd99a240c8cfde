//! Error types.
//!
//! Each concern has its own error enum; [`Error`] wraps them for the CLI.
//! Address and backend-lookup failures are recovered by the resolver and
//! never reach the caller; everything else in [`ResolveError`] is fatal.

use thiserror::Error;

/// Malformed `sem://` address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address: must start with '{0}'")]
    MissingPrefix(&'static str),

    #[error("invalid address: missing required fields (expected '<platform>:<service>/<account>/<secret>')")]
    MissingFields,
}

/// Failure navigating a JSON value with a dotted key path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("key '{segment}' not found at path position {position}")]
    KeyNotFound { segment: String, position: usize },

    #[error("array index '{segment}' out of bounds for length {len} at path position {position}")]
    IndexOutOfBounds {
        segment: String,
        len: usize,
        position: usize,
    },

    #[error("invalid array index '{segment}' at path position {position}")]
    InvalidIndex { segment: String, position: usize },

    #[error("cannot navigate into a scalar at path position {position}")]
    NotNavigable { position: usize },
}

/// Failure reported by a secret backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{platform} client setup failed: {reason}")]
    Client {
        platform: &'static str,
        reason: String,
    },

    #[error("{platform} request failed: {reason}")]
    Request {
        platform: &'static str,
        reason: String,
    },

    #[error("secret '{0}' has no string value")]
    EmptyValue(String),

    #[error("secret not found: {0}")]
    NotFound(String),
}

/// Fatal resolution failure, tagged with the originating line.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("failed to retrieve secret for line {line} ({address}): {source}")]
    SecretFetchFailed {
        line: usize,
        address: String,
        #[source]
        source: BackendError,
    },

    #[error("line {line}: cannot read key '{key}' from {address}: secret is not JSON")]
    NotJson {
        line: usize,
        address: String,
        key: String,
    },

    #[error("line {line}: key '{key}' does not exist in {address}: {source}")]
    KeyNotFound {
        line: usize,
        address: String,
        key: String,
        #[source]
        source: PathError,
    },
}

impl ResolveError {
    /// Line number of the entry that failed.
    pub fn line(&self) -> usize {
        match self {
            Self::SecretFetchFailed { line, .. }
            | Self::NotJson { line, .. }
            | Self::KeyNotFound { line, .. } => *line,
        }
    }
}

/// The input stream could not be read.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("error scanning input: {0}")]
    Read(#[from] std::io::Error),
}

/// Cache file errors.
#[derive(Error, Debug)]
pub enum CacheFileError {
    #[error("cache file not found: {0}")]
    NotFound(String),

    #[error("cache file '{0}' is not ignored by git")]
    NotIgnored(String),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error checking git ignore status: {0}")]
    Git(String),
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    CacheFile(#[from] CacheFileError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
