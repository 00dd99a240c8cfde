//! Secret address type.
//!
//! A parsed `sem://platform:service/account/secret?version=&key=&region=`
//! reference to one versioned secret.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::core::constants::{self, CACHE_KEY_SEPARATOR, URI_PREFIX};
use crate::error::AddressError;

/// A reference to a secret held by a cloud backend
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretAddress {
    platform: String,
    service: String,
    account: String,
    secret_name: String,
    version: String,
    key: Option<String>,
    region: Option<String>,
}

impl SecretAddress {
    /// Build an address from its required components.
    ///
    /// Version and region take the platform defaults.
    pub fn new(
        platform: impl Into<String>,
        service: impl Into<String>,
        account: impl Into<String>,
        secret_name: impl Into<String>,
    ) -> Self {
        let platform = platform.into();
        let version = constants::default_version(&platform).to_string();
        let region = non_empty(constants::default_region(&platform));

        Self {
            platform,
            service: service.into(),
            account: account.into(),
            secret_name: secret_name.into(),
            version,
            key: None,
            region,
        }
    }

    /// Parse an address string.
    ///
    /// Surrounding whitespace and trailing line breaks are ignored. Unknown
    /// query parameters are skipped.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::MissingPrefix` when the text does not start
    /// with `sem://`, and `AddressError::MissingFields` when any of platform,
    /// service, account or secret name is absent.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let cleaned = text.trim().trim_end_matches(['\r', '\n']);
        let rest = cleaned
            .strip_prefix(URI_PREFIX)
            .ok_or(AddressError::MissingPrefix(URI_PREFIX))?;

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        let mut parts = path.splitn(3, '/');
        let (Some(head), Some(account), Some(secret_name)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(AddressError::MissingFields);
        };
        let (platform, service) = head.split_once(':').ok_or(AddressError::MissingFields)?;

        if [platform, service, account, secret_name]
            .iter()
            .any(|part| part.is_empty())
        {
            return Err(AddressError::MissingFields);
        }

        let mut address = Self::new(platform, service, account, secret_name);
        let mut version = None;
        let mut key = None;
        let mut region = None;

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match name.as_ref() {
                "version" => &mut version,
                "key" => &mut key,
                "region" => &mut region,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        if let Some(version) = version.filter(|v| !v.is_empty()) {
            address.version = version;
        }
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            address.region = Some(region);
        }
        address.key = key.filter(|k| !k.is_empty());

        Ok(address)
    }

    /// Return a copy with an explicit version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Return a copy requesting one key from a JSON secret.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = non_empty(&key.into());
        self
    }

    /// Return a copy with an explicit region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = non_empty(&region.into());
        self
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Account scope: AWS profile or Google Cloud project.
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Version label. Empty for platforms without a default.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Dotted JSON key path, if one was requested.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether a JSON key path was requested.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Whether all required components are present.
    pub fn is_complete(&self) -> bool {
        !self.platform.is_empty()
            && !self.service.is_empty()
            && !self.account.is_empty()
            && !self.secret_name.is_empty()
    }

    /// Memoization key for backend fetches.
    ///
    /// Joins account, service, secret name, version and region. The platform
    /// is not part of the key because every backend keeps its own cache.
    pub fn cache_key(&self) -> String {
        [
            self.account.as_str(),
            self.service.as_str(),
            self.secret_name.as_str(),
            self.version.as_str(),
            self.region.as_deref().unwrap_or(""),
        ]
        .join(CACHE_KEY_SEPARATOR)
    }
}

impl FromStr for SecretAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SecretAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}/{}/{}",
            URI_PREFIX, self.platform, self.service, self.account, self.secret_name
        )?;

        let params: Vec<String> = [
            ("version", Some(self.version.as_str())),
            ("key", self.key.as_deref()),
            ("region", self.region.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}", name, escape(v)))
        })
        .collect();

        if !params.is_empty() {
            write!(f, "?{}", params.join("&"))?;
        }
        Ok(())
    }
}

/// Whether a string looks like a secret address (prefix check only).
pub fn is_address(s: &str) -> bool {
    s.starts_with(URI_PREFIX)
}

fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
