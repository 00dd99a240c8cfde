//! Update command.
//!
//! Resolves every secret reference in the input file and writes the result
//! to the cache file.

use std::path::Path;

use tracing::debug;

use crate::cli::output;
use crate::core::backend::Backends;
use crate::core::cache_file;
use crate::core::domain::address::is_address;
use crate::core::format::{self, FormatOptions};
use crate::core::git::{self, IgnoreStatus};
use crate::core::parser;
use crate::core::resolve::{ResolveOptions, Resolver};
use crate::error::{CacheFileError, Error, Result};

/// Arguments for `sem update`
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    pub input: String,
    pub endpoint_url: Option<String>,
    pub no_quotes: bool,
    pub no_expand_json: bool,
}

/// Resolve the input file into its cache file.
pub fn execute(args: UpdateArgs) -> Result<()> {
    let cache_name = cache_file::cache_file_name(&args.input);
    let cwd = std::env::current_dir()?;

    match git::check_ignore(&cwd, Path::new(&cache_name))? {
        IgnoreStatus::Ignored => {}
        IgnoreStatus::NotIgnored => return Err(CacheFileError::NotIgnored(cache_name).into()),
        IgnoreStatus::Untracked => output::warn(&format!(
            "not inside a git repository, make sure {} is never committed",
            output::path(&cache_name)
        )),
    }

    debug!(input = %args.input, "reading input file");
    let file = std::fs::File::open(&args.input).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::InputNotFound(args.input.clone())
        } else {
            e.into()
        }
    })?;
    let entries = parser::parse_reader(file)?;
    debug!(entries = entries.len(), "found entries in input file");

    let backends = Backends::from_environment(args.endpoint_url.as_deref())?;
    if backends.is_empty() {
        output::warn(
            "no secret backends compiled in, sem:// references are kept as-is \
             (rebuild with --features aws,gcp)",
        );
    }

    let options = ResolveOptions {
        no_expand_json: args.no_expand_json,
    };
    let vars = Resolver::new(&backends, options).resolve(&entries)?;

    for key in vars.keys().filter(|k| !is_address(k) && !format::is_shell_name(k)) {
        output::warn(&format!(
            "'{}' is not a valid shell variable name, `sem load -e` will skip it",
            key.escape_debug()
        ));
    }

    let format_options = FormatOptions {
        use_quotes: !args.no_quotes,
        compact_json: args.no_expand_json,
        preferred_order: entries.iter().map(|e| e.key().to_string()).collect(),
        ..FormatOptions::default()
    };
    let lines = format::format(&vars, &format_options);

    cache_file::write(Path::new(&cache_name), &lines)?;

    output::success(&format!(
        "updated {} environment variables in {}",
        lines.len(),
        output::path(&cache_name)
    ));
    Ok(())
}
