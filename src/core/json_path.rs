//! Dotted key path navigation over JSON values.
//!
//! Path segments address object members by name and array elements by
//! index. Array indices may be `N`, `-N` (counted from the end) or `-`
//! (the last element).

use serde_json::Value;

use crate::error::PathError;

/// Split a dotted path into segments.
///
/// Empty segments are kept, so `"a."` looks up member `""` of `a`.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Walk `path` from `root` and return the value found there.
///
/// An empty path returns `root`.
///
/// # Errors
///
/// Returns the first [`PathError`] encountered; `position` is the 0-based
/// index of the failing segment.
pub fn navigate<'a>(root: &'a Value, path: &[&str]) -> Result<&'a Value, PathError> {
    path.iter()
        .enumerate()
        .try_fold(root, |current, (position, segment)| {
            step(current, segment, position)
        })
}

fn step<'a>(current: &'a Value, segment: &str, position: usize) -> Result<&'a Value, PathError> {
    match current {
        Value::Object(map) => map.get(segment).ok_or_else(|| PathError::KeyNotFound {
            segment: segment.to_string(),
            position,
        }),
        Value::Array(items) => {
            let index = array_index(segment, items.len(), position)?;
            Ok(&items[index])
        }
        _ => Err(PathError::NotNavigable { position }),
    }
}

fn array_index(segment: &str, len: usize, position: usize) -> Result<usize, PathError> {
    let out_of_bounds = || PathError::IndexOutOfBounds {
        segment: segment.to_string(),
        len,
        position,
    };
    let invalid = || PathError::InvalidIndex {
        segment: segment.to_string(),
        position,
    };

    if segment == "-" {
        return len.checked_sub(1).ok_or_else(out_of_bounds);
    }

    if let Some(back) = segment.strip_prefix('-') {
        let n: i64 = back.parse().map_err(|_| invalid())?;
        return match usize::try_from(n) {
            Ok(n) if n > 0 && n <= len => Ok(len - n),
            _ => Err(out_of_bounds()),
        };
    }

    let n: usize = segment.parse().map_err(|_| invalid())?;
    if n < len {
        Ok(n)
    } else {
        Err(out_of_bounds())
    }
}
