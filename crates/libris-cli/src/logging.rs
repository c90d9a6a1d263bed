//! Log setup
//!
//! Verbosity comes from `LIBRIS_LOG` (an `EnvFilter` directive such as
//! `libris_core=debug`) and defaults to warnings only. Logs go to stderr
//! unless `log_file` is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use libris_core::Config;

const LOG_ENV: &str = "LIBRIS_LOG";
const DEFAULT_LEVEL: &str = "warn";

pub fn init(config: &Config) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let Some(log_path) = config.log_file.as_ref() else {
        // Ignore error if already initialized
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    debug!("Logging to {:?}", log_path);
}
