//! AWS Secrets Manager backend.
//!
//! Enable with `--features aws`.
//!
//! The address account is used as the shared-config profile name and the
//! region comes from the address (default `ap-northeast-1`). Credentials are
//! resolved through the default provider chain for that profile.
//!
//! With a custom endpoint (for example LocalStack) static `test`/`test`
//! credentials are used instead.

use std::collections::HashMap;
use std::sync::RwLock;

use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::{Credentials, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use tracing::{debug, trace};

use super::SecretBackend;
use crate::core::constants::{self, AWS_PLATFORM};
use crate::core::domain::SecretAddress;
use crate::error::BackendError;

/// AWS Secrets Manager backend
///
/// Drives the async SDK on a private current-thread runtime and keeps one
/// client per `profile:region:endpoint`.
pub struct AwsSecretsManager {
    runtime: tokio::runtime::Runtime,
    endpoint_url: Option<String>,
    clients: RwLock<HashMap<String, Client>>,
}

impl AwsSecretsManager {
    /// Create the backend, optionally pointing at a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Client` if the async runtime cannot be built.
    pub fn new(endpoint_url: Option<String>) -> Result<Self, BackendError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::Client {
                platform: AWS_PLATFORM,
                reason: format!("failed to create runtime: {}", e),
            })?;

        Ok(Self {
            runtime,
            endpoint_url: endpoint_url.filter(|url| !url.is_empty()),
            clients: RwLock::new(HashMap::new()),
        })
    }

    fn client(&self, profile: &str, region: &str) -> Client {
        let endpoint = self.endpoint_url.as_deref().unwrap_or("");
        let cache_key = format!("{}:{}:{}", profile, region, endpoint);

        if let Some(client) = self
            .clients
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&cache_key)
        {
            return client.clone();
        }

        debug!(profile, region, endpoint, "creating AWS Secrets Manager client");

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()));
        loader = match self.endpoint_url.as_deref() {
            Some(url) => loader
                .endpoint_url(url)
                .credentials_provider(Credentials::new("test", "test", None, None, "static")),
            None if !profile.is_empty() => loader.profile_name(profile),
            None => loader,
        };

        let config = self.runtime.block_on(loader.load());
        let client = Client::new(&config);

        self.clients
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(cache_key, client.clone());
        client
    }
}

impl SecretBackend for AwsSecretsManager {
    fn platform(&self) -> &'static str {
        AWS_PLATFORM
    }

    fn fetch(&self, address: &SecretAddress) -> Result<String, BackendError> {
        let region = address
            .region()
            .unwrap_or_else(|| constants::default_region(AWS_PLATFORM));

        trace!(
            secret = %address.secret_name(),
            version = %address.version(),
            region,
            "fetching from AWS Secrets Manager"
        );

        let client = self.client(address.account(), region);

        let mut request = client.get_secret_value().secret_id(address.secret_name());
        if !address.version().is_empty() {
            request = request.version_stage(address.version());
        }

        let output = self.runtime.block_on(request.send()).map_err(|e| {
            let not_found = e
                .as_service_error()
                .map(|se| se.is_resource_not_found_exception())
                .unwrap_or(false);
            if not_found {
                BackendError::NotFound(address.secret_name().to_string())
            } else {
                BackendError::Request {
                    platform: AWS_PLATFORM,
                    reason: DisplayErrorContext(&e).to_string(),
                }
            }
        })?;

        let value = output
            .secret_string()
            .ok_or_else(|| BackendError::EmptyValue(address.secret_name().to_string()))?;

        trace!(value_len = value.len(), "fetched from AWS Secrets Manager");
        Ok(value.to_string())
    }
}
