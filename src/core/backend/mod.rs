//! Secret backends.
//!
//! A backend fetches the raw string value of one secret for one platform.
//! [`Backends`] keeps the registered backends keyed by platform name and
//! memoizes every successful fetch in a per-backend [`SecretCache`].
//!
//! Cloud backends are compiled in with cargo features:
//!
//! - `aws`: AWS Secrets Manager via the AWS SDK
//! - `gcp`: Google Cloud Secret Manager via the `gcloud` CLI
//!
//! [`StaticBackend`] serves secrets from memory and is always available.

#[cfg(feature = "aws")]
pub mod aws;
#[cfg(feature = "gcp")]
pub mod gcp;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use tracing::debug;

use crate::core::domain::SecretAddress;
use crate::error::BackendError;

/// Fetches raw secret values for one platform
pub trait SecretBackend: Send + Sync {
    /// Platform name this backend serves, e.g. `aws`
    fn platform(&self) -> &'static str;

    /// Fetch the raw value of the secret at `address`.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` if the secret cannot be retrieved.
    fn fetch(&self, address: &SecretAddress) -> Result<String, BackendError>;
}

/// Process-lifetime cache of fetched secret values
///
/// Entries are keyed by [`SecretAddress::cache_key`] and never evicted.
#[derive(Debug, Default)]
pub struct SecretCache {
    entries: RwLock<HashMap<String, String>>,
}

impl SecretCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached value
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let hit = entries.get(key).cloned();
        if hit.is_some() {
            debug!(key = %key, "cache hit for secret");
        }
        hit
    }

    /// Store a value
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        debug!(key = %key, "caching secret");
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Registered {
    backend: Box<dyn SecretBackend>,
    cache: SecretCache,
}

/// Registry of backends keyed by platform
#[derive(Default)]
pub struct Backends {
    entries: HashMap<&'static str, Registered>,
}

impl Backends {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend, replacing any previous one for the same platform
    pub fn register(&mut self, backend: impl SecretBackend + 'static) {
        let platform = backend.platform();
        debug!(platform, "registering secret backend");
        self.entries.insert(
            platform,
            Registered {
                backend: Box::new(backend),
                cache: SecretCache::new(),
            },
        );
    }

    /// Builder form of [`Backends::register`]
    pub fn with(mut self, backend: impl SecretBackend + 'static) -> Self {
        self.register(backend);
        self
    }

    /// Whether a backend serves `platform`
    pub fn contains(&self, platform: &str) -> bool {
        self.entries.contains_key(platform)
    }

    /// Registered platform names, sorted
    pub fn platforms(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch a secret through the platform's cache.
    ///
    /// Returns `None` when no backend serves the address's platform.
    pub fn fetch(&self, address: &SecretAddress) -> Option<Result<String, BackendError>> {
        let registered = self.entries.get(address.platform())?;
        let key = address.cache_key();

        if let Some(value) = registered.cache.get(&key) {
            return Some(Ok(value));
        }

        let result = registered.backend.fetch(address);
        if let Ok(value) = &result {
            registered.cache.insert(key, value.as_str());
        }
        Some(result)
    }

    /// Number of cached values for `platform`
    pub fn cached(&self, platform: &str) -> usize {
        self.entries
            .get(platform)
            .map(|r| r.cache.len())
            .unwrap_or(0)
    }

    /// Build the registry for the command line.
    ///
    /// Registers every backend compiled into this binary. `endpoint_url`
    /// overrides the AWS service endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend cannot be constructed.
    #[allow(unused_variables, unused_mut)]
    pub fn from_environment(endpoint_url: Option<&str>) -> Result<Self, BackendError> {
        let mut backends = Self::new();

        #[cfg(feature = "aws")]
        backends.register(aws::AwsSecretsManager::new(endpoint_url.map(String::from))?);

        #[cfg(feature = "gcp")]
        backends.register(gcp::GcloudSecretManager::new());

        #[cfg(feature = "test-backend")]
        {
            if let Some(path) = std::env::var_os(crate::core::constants::TEST_SECRETS_ENV) {
                for backend in StaticBackend::load_fixture(std::path::Path::new(&path))? {
                    backends.register(backend);
                }
            }
        }

        Ok(backends)
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("platforms", &self.platforms())
            .finish()
    }
}

/// In-memory backend
///
/// Looks secrets up by cache key first, then by secret name.
#[derive(Debug)]
pub struct StaticBackend {
    platform: &'static str,
    secrets: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl StaticBackend {
    pub fn new(platform: &'static str) -> Self {
        Self {
            platform,
            secrets: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Add a secret keyed by cache key or secret name
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), value.into());
        self
    }

    /// Number of calls to `fetch` so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Load a JSON fixture for every known platform.
    ///
    /// The file maps cache keys or secret names to values. String values are
    /// used verbatim; any other JSON value is stored as its JSON text.
    #[cfg(feature = "test-backend")]
    pub fn load_fixture(path: &std::path::Path) -> Result<Vec<Self>, BackendError> {
        use crate::core::constants::{AWS_PLATFORM, GOOGLE_CLOUD_PLATFORM};

        let fixture_error = |reason: String| BackendError::Client {
            platform: "static",
            reason,
        };

        let text = std::fs::read_to_string(path)
            .map_err(|e| fixture_error(format!("cannot read {}: {}", path.display(), e)))?;
        let map: HashMap<String, serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| fixture_error(format!("invalid fixture {}: {}", path.display(), e)))?;

        let secrets: HashMap<String, String> = map
            .into_iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect();

        debug!(path = %path.display(), secrets = secrets.len(), "loaded secret fixture");

        Ok([AWS_PLATFORM, GOOGLE_CLOUD_PLATFORM]
            .into_iter()
            .map(|platform| Self {
                platform,
                secrets: secrets.clone(),
                fetches: AtomicUsize::new(0),
            })
            .collect())
    }
}

impl SecretBackend for StaticBackend {
    fn platform(&self) -> &'static str {
        self.platform
    }

    fn fetch(&self, address: &SecretAddress) -> Result<String, BackendError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.secrets
            .get(&address.cache_key())
            .or_else(|| self.secrets.get(address.secret_name()))
            .cloned()
            .ok_or_else(|| BackendError::NotFound(address.secret_name().to_string()))
    }
}

impl<T: SecretBackend + ?Sized> SecretBackend for std::sync::Arc<T> {
    fn platform(&self) -> &'static str {
        (**self).platform()
    }

    fn fetch(&self, address: &SecretAddress) -> Result<String, BackendError> {
        (**self).fetch(address)
    }
}
