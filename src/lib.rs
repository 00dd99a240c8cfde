//! sem - resolve cloud secret references in .env files.
//!
//! An input file mixes literal assignments with references to secrets held
//! by a cloud secret store:
//!
//! ```text
//! APP_ENV=production
//! DB_PASSWORD=sem://aws:secretsmanager/dev/db/creds?key=password
//! sem://googlecloud:secretmanager/my-project/api-keys
//! ```
//!
//! `sem update` resolves every reference and writes a flat cache file;
//! `sem load` prints it for the shell.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── update        # Resolve input into the cache file
//! │   ├── load          # Print cached variables
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── domain/       # SecretAddress, Entry, Variables
//!     ├── parser        # Line classifier and entry parser
//!     ├── json_path     # Dotted path navigation
//!     ├── expand        # JSON flattening and scalar extraction
//!     ├── backend/      # SecretBackend trait, registry and cache
//!     │   ├── aws       # AWS Secrets Manager (feature `aws`)
//!     │   └── gcp       # Google Cloud Secret Manager (feature `gcp`, default)
//!     ├── resolve       # Resolution pipeline
//!     ├── format        # Sorting, quoting and export lines
//!     ├── cache_file    # Cache file naming and I/O
//!     └── git           # git check-ignore guard
//! ```
//!
//! # Library use
//!
//! ```
//! use sem::core::backend::{Backends, StaticBackend};
//! use sem::core::format::FormatOptions;
//! use sem::core::parser;
//! use sem::core::resolve::{resolve_configuration, ResolveOptions};
//!
//! let entries = parser::parse_all(b"CFG=sem://aws:secretsmanager/dev/cfg\n");
//! let backends = Backends::new()
//!     .with(StaticBackend::new("aws").with_secret("cfg", r#"{"a":1,"b":[10,20]}"#));
//!
//! let lines = resolve_configuration(
//!     &entries,
//!     &backends,
//!     ResolveOptions::default(),
//!     &FormatOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(lines, vec!["CFG_a=1", "CFG_b_0=10", "CFG_b_1=20"]);
//! ```

pub mod cli;
pub mod core;
pub mod error;
