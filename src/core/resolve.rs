//! Secret resolution.
//!
//! Walks parsed entries in file order and turns each one into output
//! variables: literal entries pass through, secret addresses are fetched
//! through [`Backends`] and expanded.
//!
//! Problems with a single entry's address, or a platform with no backend,
//! keep the entry as a literal. A failed fetch or an unreadable requested
//! key stops the whole run.

use tracing::{debug, info};

use crate::core::backend::Backends;
use crate::core::domain::address::is_address;
use crate::core::domain::{Entry, SecretAddress, Variables};
use crate::core::expand::{self, ExtractError};
use crate::core::format::{self, FormatOptions};
use crate::error::ResolveError;

/// Options for a resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Keep JSON secrets as one value instead of flattening them
    pub no_expand_json: bool,
}

/// Resolves entries against a set of backends
#[derive(Debug)]
pub struct Resolver<'a> {
    backends: &'a Backends,
    options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(backends: &'a Backends, options: ResolveOptions) -> Self {
        Self { backends, options }
    }

    /// Resolve all entries in order, later variables replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Returns the first hard [`ResolveError`]; no partial result is
    /// produced.
    pub fn resolve(&self, entries: &[Entry]) -> Result<Variables, ResolveError> {
        let mut vars = Variables::new();
        for entry in entries {
            vars.extend(self.resolve_entry(entry)?);
        }
        debug!(entries = entries.len(), variables = vars.len(), "resolved entries");
        Ok(vars)
    }

    /// Resolve a single entry.
    pub fn resolve_entry(&self, entry: &Entry) -> Result<Variables, ResolveError> {
        if entry.is_empty() {
            debug!(line = entry.index(), "skipping blank entry");
            return Ok(Variables::new());
        }

        let address = match SecretAddress::parse(entry.candidate()) {
            Ok(address) => address,
            Err(e) => {
                if is_address(entry.candidate()) {
                    info!(line = entry.index(), key = %entry.key(), reason = %e, "line skipped");
                }
                return Ok(literal(entry));
            }
        };

        let raw = match self.backends.fetch(&address) {
            Some(Ok(raw)) => raw,
            Some(Err(source)) => {
                return Err(ResolveError::SecretFetchFailed {
                    line: entry.index(),
                    address: address.to_string(),
                    source,
                })
            }
            None => {
                info!(
                    line = entry.index(),
                    key = %entry.key(),
                    platform = %address.platform(),
                    "line skipped: no backend for platform"
                );
                return Ok(literal(entry));
            }
        };

        debug!(line = entry.index(), address = %address, "fetched secret");
        self.expand(entry, &address, &raw)
    }

    fn expand(
        &self,
        entry: &Entry,
        address: &SecretAddress,
        raw: &str,
    ) -> Result<Variables, ResolveError> {
        let prefix = entry.prefix();

        if !self.options.no_expand_json && !address.has_key() {
            return Ok(expand::expand_secret(prefix, address.secret_name(), raw));
        }

        let value = expand::extract_scalar(raw, address.key()).map_err(|e| {
            let key = address.key().unwrap_or_default().to_string();
            match e {
                ExtractError::NotJson => ResolveError::NotJson {
                    line: entry.index(),
                    address: address.to_string(),
                    key,
                },
                ExtractError::Path(source) => ResolveError::KeyNotFound {
                    line: entry.index(),
                    address: address.to_string(),
                    key,
                    source,
                },
            }
        })?;

        let name = if !prefix.is_empty() {
            prefix
        } else {
            address.key().unwrap_or_else(|| address.secret_name())
        };

        let mut vars = Variables::new();
        vars.insert(name, value);
        Ok(vars)
    }
}

/// The entry's own key and value. Entries without a key produce nothing.
fn literal(entry: &Entry) -> Variables {
    let mut vars = Variables::new();
    if entry.key().is_empty() {
        debug!(line = entry.index(), "skipping entry without a key");
    } else {
        vars.insert(entry.key(), entry.value());
    }
    vars
}

/// Resolve entries and format the result in one step.
///
/// # Errors
///
/// Returns the first hard [`ResolveError`].
pub fn resolve_configuration(
    entries: &[Entry],
    backends: &Backends,
    options: ResolveOptions,
    format_options: &FormatOptions,
) -> Result<Vec<String>, ResolveError> {
    let vars = Resolver::new(backends, options).resolve(entries)?;
    Ok(format::format(&vars, format_options))
}
