//! Cache file handling.
//!
//! `sem update` writes resolved variables next to the input file's working
//! directory as `.cache.<input>`; `sem load` reads them back.
//!
//! The file holds one variable per line. Backslash, line feed and carriage
//! return are written as `\\`, `\n` and `\r` so multi-line values survive.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::core::constants::CACHE_FILE_PREFIX;
use crate::core::domain::Variables;
use crate::core::parser;
use crate::error::{CacheFileError, Result};

/// Cache file name for an input path.
///
/// Path separators become `_`. A name starting with `.` is appended
/// directly to `.cache`, anything else after a `.`:
///
/// ```
/// use sem::core::cache_file::cache_file_name;
///
/// assert_eq!(cache_file_name(".env"), ".cache.env");
/// assert_eq!(cache_file_name("config/app.env"), ".cache.config_app.env");
/// ```
pub fn cache_file_name(input: &str) -> String {
    let safe = input.replace(['/', '\\'], "_");
    if safe.starts_with('.') {
        format!("{}{}", CACHE_FILE_PREFIX, safe)
    } else {
        format!("{}.{}", CACHE_FILE_PREFIX, safe)
    }
}

/// Write formatted lines to `path`, readable only by the owner.
///
/// # Errors
///
/// Returns `CacheFileError::Write` if the file cannot be written.
pub fn write(path: &Path, lines: &[String]) -> Result<()> {
    let encoded: Vec<String> = lines.iter().map(|line| encode(line)).collect();
    let mut content = encoded.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    let write_error = |source| CacheFileError::Write {
        path: path.display().to_string(),
        source,
    };

    #[cfg(unix)]
    {
        use crate::core::constants::CACHE_FILE_MODE;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(CACHE_FILE_MODE)
            .open(path)
            .map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.flush().map_err(write_error)?;

        // Existing files keep their old mode on open.
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(CACHE_FILE_MODE))
            .map_err(write_error)?;
    }

    #[cfg(not(unix))]
    {
        let mut file = std::fs::File::create(path).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
    }

    debug!(path = %path.display(), lines = lines.len(), "wrote cache file");
    Ok(())
}

/// Read variables back from a cache file.
///
/// # Errors
///
/// Returns `CacheFileError::NotFound` if the file does not exist,
/// `CacheFileError::Read` for other I/O failures.
pub fn read(path: &Path) -> Result<Variables> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CacheFileError::NotFound(path.display().to_string())
        } else {
            CacheFileError::Read {
                path: path.display().to_string(),
                source,
            }
        }
    })?;

    let vars: Variables = parser::parse_all(&bytes)
        .into_iter()
        .filter(|entry| !entry.key().is_empty())
        .map(|entry| (decode(entry.key()), decode(entry.value())))
        .collect();

    debug!(path = %path.display(), variables = vars.len(), "read cache file");
    Ok(vars)
}

fn encode(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

// Unknown escapes are kept as written.
fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
