//! Constants used throughout sem.
//!
//! Centralizes magic strings and configuration values.

/// Prefix every secret address starts with.
pub const URI_PREFIX: &str = "sem://";

/// AWS Secrets Manager platform name.
pub const AWS_PLATFORM: &str = "aws";

/// Google Cloud Secret Manager platform name.
pub const GOOGLE_CLOUD_PLATFORM: &str = "googlecloud";

/// Version stage used for `aws` addresses without `?version=`.
pub const AWS_DEFAULT_VERSION: &str = "AWSCURRENT";

/// Version used for `googlecloud` addresses without `?version=`.
pub const GOOGLE_CLOUD_DEFAULT_VERSION: &str = "latest";

/// Region used for `aws` addresses without `?region=`.
pub const AWS_DEFAULT_REGION: &str = "ap-northeast-1";

/// Separator between cache key components.
pub const CACHE_KEY_SEPARATOR: &str = "|";

/// Separator between a prefix and an expanded JSON member or index.
pub const EXPANSION_SEPARATOR: char = '_';

/// Default input file.
pub const ENV_FILE: &str = ".env";

/// Cache files are named `.cache.<input>` (or `.cache<input>` for dotfiles).
pub const CACHE_FILE_PREFIX: &str = ".cache";

/// Owner read/write only.
#[cfg(unix)]
pub const CACHE_FILE_MODE: u32 = 0o600;

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SEM_LOG";

/// Environment variable naming the fixture file for the test backend.
#[cfg(feature = "test-backend")]
pub const TEST_SECRETS_ENV: &str = "SEM_TEST_SECRETS";

/// Default version label for a platform, empty when it has none.
pub fn default_version(platform: &str) -> &'static str {
    match platform {
        AWS_PLATFORM => AWS_DEFAULT_VERSION,
        GOOGLE_CLOUD_PLATFORM => GOOGLE_CLOUD_DEFAULT_VERSION,
        _ => "",
    }
}

/// Default region for a platform, empty when it has none.
pub fn default_region(platform: &str) -> &'static str {
    match platform {
        AWS_PLATFORM => AWS_DEFAULT_REGION,
        _ => "",
    }
}
