//! Google Cloud Secret Manager backend.
//!
//! Reads secrets through the gcloud CLI. Built by default (feature `gcp`).
//!
//! ## Requirements
//!
//! - `gcloud` CLI must be installed and authenticated
//! - User must have `secretmanager.versions.access` on the secret
//!
//! The address account is the Google Cloud project id.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::trace;

use super::SecretBackend;
use crate::core::constants::{self, GOOGLE_CLOUD_PLATFORM};
use crate::core::domain::SecretAddress;
use crate::error::BackendError;

/// Google Cloud Secret Manager backend using the gcloud CLI
#[derive(Debug, Default)]
pub struct GcloudSecretManager {
    program: Option<PathBuf>,
}

impl GcloudSecretManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific gcloud executable instead of searching `PATH`
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn gcloud(&self) -> Result<PathBuf, BackendError> {
        if let Some(program) = &self.program {
            return Ok(program.clone());
        }
        which::which("gcloud").map_err(|_| BackendError::Client {
            platform: GOOGLE_CLOUD_PLATFORM,
            reason: "gcloud CLI not found. Install it from https://cloud.google.com/sdk/docs/install"
                .to_string(),
        })
    }
}

impl SecretBackend for GcloudSecretManager {
    fn platform(&self) -> &'static str {
        GOOGLE_CLOUD_PLATFORM
    }

    fn fetch(&self, address: &SecretAddress) -> Result<String, BackendError> {
        let version = match address.version() {
            "" => constants::default_version(GOOGLE_CLOUD_PLATFORM),
            v => v,
        };

        trace!(
            project = %address.account(),
            secret = %address.secret_name(),
            version,
            "fetching from Google Cloud Secret Manager"
        );

        let output = Command::new(self.gcloud()?)
            .args([
                "secrets",
                "versions",
                "access",
                version,
                &format!("--secret={}", address.secret_name()),
                &format!("--project={}", address.account()),
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| BackendError::Client {
                platform: GOOGLE_CLOUD_PLATFORM,
                reason: format!("failed to spawn gcloud: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("NOT_FOUND") {
                return Err(BackendError::NotFound(address.secret_name().to_string()));
            }
            return Err(BackendError::Request {
                platform: GOOGLE_CLOUD_PLATFORM,
                reason: format!("gcloud secrets versions access failed: {}", stderr.trim()),
            });
        }

        if output.stdout.is_empty() {
            return Err(BackendError::EmptyValue(address.secret_name().to_string()));
        }

        let value = String::from_utf8(output.stdout).map_err(|e| BackendError::Request {
            platform: GOOGLE_CLOUD_PLATFORM,
            reason: format!("UTF-8 error: {}", e),
        })?;

        trace!(value_len = value.len(), "fetched from Google Cloud Secret Manager");
        Ok(value)
    }
}
