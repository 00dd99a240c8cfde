//! Core library components.
//!
//! This module contains the resolution engine: address parsing, the line
//! parser, JSON navigation and expansion, secret backends, and output
//! formatting.

pub mod backend;
pub mod cache_file;
pub mod constants;
pub mod domain;
pub mod expand;
pub mod format;
pub mod git;
pub mod json_path;
pub mod parser;
pub mod resolve;
