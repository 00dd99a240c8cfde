//! Test support utilities for sem integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and a home dir holding the secret
/// fixture. Child processes use `.current_dir()`, so tests can run in
/// parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new environment with an empty secret fixture.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        let t = Self { dir, home };
        t.secrets("{}");
        t
    }

    /// Create an environment inside a git repository that ignores cache files.
    ///
    /// Returns `None` when git is not installed.
    pub fn git() -> Option<Self> {
        let t = Self::new();
        let status = std::process::Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(t.dir.path())
            .status()
            .ok()?;
        if !status.success() {
            return None;
        }
        t.write(".gitignore", ".cache.*\n");
        Some(t)
    }

    /// Path to the secret fixture read by the test backend.
    pub fn secrets_path(&self) -> PathBuf {
        self.home.path().join("secrets.json")
    }

    /// Replace the secret fixture.
    pub fn secrets(&self, json: &str) {
        std::fs::write(self.secrets_path(), json).expect("failed to write secret fixture");
    }

    /// Write a file relative to the project dir.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, content).expect("failed to write file");
    }

    /// Read a file relative to the project dir.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("failed to read file")
    }

    /// Whether a file exists in the project dir.
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}
