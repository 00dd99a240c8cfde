//! sem - resolve cloud secret references in .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sem::cli::output;
use sem::cli::{execute, Cli};
use sem::core::constants::LOG_ENV;
use sem::error::{CacheFileError, Error, ResolveError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sem=debug")
        } else {
            EnvFilter::new("sem=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::CacheFile(CacheFileError::NotFound(_)) => Some("run: sem update".to_string()),
            Error::CacheFile(CacheFileError::NotIgnored(name)) => {
                Some(format!("add \"{}\" to .gitignore and commit it", name))
            }
            Error::InputNotFound(_) => Some("create the file or pass --input <path>".to_string()),
            Error::Resolve(ResolveError::SecretFetchFailed { .. }) => {
                Some("check your cloud credentials and the secret address".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
