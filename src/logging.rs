//! Tracing setup.
//!
//! The TUI owns the terminal, so the binary logs to a file; stderr output is
//! only used when no file is given (one-shot commands, tests).

use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Error, Result};

/// Map a `-v` count to a level name (0=error, 1=warn, 2=info, 3=debug, 4+=trace).
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keyrate={level}")));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match log_file {
        None => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(verbosity >= 3)
                    .with_line_number(verbosity >= 3),
            )
            .try_init(),
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(verbosity >= 3)
                        .with_line_number(verbosity >= 3),
                )
                .try_init()
        }
    };

    installed.map_err(|e| Error::Logging {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "error");
        assert_eq!(level_for(2), "info");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn second_init_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs").join("keyrate.log");
        // another test may have installed a subscriber first; either way the
        // second call in this process must fail cleanly
        let _ = init_logging(1, Some(&log));
        assert!(init_logging(1, None).is_err());
    }
}
