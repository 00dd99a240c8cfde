//! Load command.
//!
//! Prints the cache file's variables for the shell, e.g.
//! `eval "$(sem load -e)"`.

use std::path::Path;

use crate::core::cache_file;
use crate::core::domain::Variables;
use crate::core::format::{self, FormatOptions};
use crate::error::Result;

/// Print variables from the cache file of `input`.
pub fn execute(input: &str, with_export: bool, only_unset: bool) -> Result<()> {
    let cache_name = cache_file::cache_file_name(input);
    let mut vars = cache_file::read(Path::new(&cache_name))?;

    if only_unset {
        vars = unset_only(vars);
    }

    let options = FormatOptions {
        export: with_export,
        ..FormatOptions::default()
    };
    for line in format::format(&vars, &options) {
        println!("{}", line);
    }
    Ok(())
}

fn unset_only(vars: Variables) -> Variables {
    vars.into_iter()
        .filter(|(key, _)| !is_set(key))
        .collect()
}

fn is_set(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && std::env::var_os(key).is_some()
}
