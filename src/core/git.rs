//! Git ignore checks.
//!
//! The resolved cache file holds plaintext secrets, so `sem update` refuses
//! to write it unless git ignores it.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::error::CacheFileError;

/// Result of asking git whether a path is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreStatus {
    Ignored,
    NotIgnored,
    /// Not inside a git work tree, or git is not installed
    Untracked,
}

/// Run `git check-ignore` for `path` from `dir`.
///
/// # Errors
///
/// Returns `CacheFileError::Git` if git fails for any reason other than the
/// path not being ignored or the directory not being a repository.
pub fn check_ignore(dir: &Path, path: &Path) -> Result<IgnoreStatus, CacheFileError> {
    let Ok(git) = which::which("git") else {
        debug!("git not found, skipping ignore check");
        return Ok(IgnoreStatus::Untracked);
    };

    trace!(path = %path.display(), "running git check-ignore");

    let output = Command::new(git)
        .arg("check-ignore")
        .arg("--quiet")
        .arg(path)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| CacheFileError::Git(e.to_string()))?;

    match output.status.code() {
        Some(0) => Ok(IgnoreStatus::Ignored),
        Some(1) => Ok(IgnoreStatus::NotIgnored),
        _ => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") {
                debug!(dir = %dir.display(), "not a git repository");
                Ok(IgnoreStatus::Untracked)
            } else {
                Err(CacheFileError::Git(stderr.trim().to_string()))
            }
        }
    }
}
