//! Line-oriented configuration parser.
//!
//! Turns `.env`-style text into [`Entry`] values. Classification is total:
//! every line maps to exactly one [`LineKind`], and only a stream that
//! cannot be read fails the parse.

use std::borrow::Cow;
use std::io::Read;

use tracing::{info, trace};

use crate::core::constants::URI_PREFIX;
use crate::core::domain::Entry;
use crate::error::ScanError;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Classification of a single trimmed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    Comment,
    /// Starts with `sem://`
    SecretAddress,
    /// Contains `=`
    KeyValue,
    KeyOnly,
}

impl LineKind {
    /// Classify a line. The input is trimmed first.
    pub fn classify(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Self::Empty
        } else if line.starts_with('#') {
            Self::Comment
        } else if line.starts_with(URI_PREFIX) {
            Self::SecretAddress
        } else if line.contains('=') {
            Self::KeyValue
        } else {
            Self::KeyOnly
        }
    }

    /// Whether lines of this kind become entries
    pub fn is_entry(self) -> bool {
        !matches!(self, Self::Empty | Self::Comment)
    }
}

/// Classify and convert one line.
///
/// Returns `None` for empty and comment lines.
pub fn parse_line(content: &str, index: usize) -> Option<Entry> {
    let line = content.trim();
    match LineKind::classify(line) {
        LineKind::Empty | LineKind::Comment => None,
        LineKind::SecretAddress | LineKind::KeyOnly => Some(Entry::new(index, line, "")),
        LineKind::KeyValue => {
            let (key, value) = line.split_once('=')?;
            Some(Entry::new(index, key.trim(), value))
        }
    }
}

/// Parse a whole document.
///
/// Strips a leading UTF-8 byte order mark and treats CRLF and bare CR as
/// line breaks. Lines are numbered from 1. Bytes that are not valid UTF-8
/// are replaced with U+FFFD on their own line; the rest of the document is
/// unaffected.
pub fn parse_all(input: &[u8]) -> Vec<Entry> {
    let input = input.strip_prefix(BOM).unwrap_or(input);
    let normalized = normalize_line_breaks(input);

    let entries: Vec<Entry> = normalized
        .split(|&b| b == b'\n')
        .enumerate()
        .filter_map(|(i, bytes)| {
            let line = String::from_utf8_lossy(bytes);
            if matches!(line, Cow::Owned(_)) {
                info!(line = i + 1, "line is not valid UTF-8, invalid bytes replaced");
            }
            parse_line(&line, i + 1)
        })
        .collect();

    trace!(entries = entries.len(), "parsed input");
    entries
}

/// Read a stream to the end and parse it.
///
/// # Errors
///
/// Returns `ScanError::Read` if the stream fails.
pub fn parse_reader(mut reader: impl Read) -> Result<Vec<Entry>, ScanError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(parse_all(&buf))
}

// 0x0D never occurs inside a multi-byte UTF-8 sequence, so this is safe to
// do before decoding.
fn normalize_line_breaks(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        if b == b'\r' {
            if bytes.peek() == Some(&b'\n') {
                bytes.next();
            }
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    out
}
