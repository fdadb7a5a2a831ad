//! Tracing subscriber bootstrap shared by every binary
//!
//! Diagnostics go to stderr so the tools' stdout stays a clean report.
//! The subscriber is installed before the config is read so config loading
//! can itself log; the configured level is applied afterwards.
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

const DEFAULT_LEVEL: &str = "info";

/// Handle for adjusting the installed filter once the config is known
#[derive(Clone)]
pub struct LogHandle {
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

/// Install the global tracing subscriber at `RUST_LOG` or `info`
///
/// Safe to call more than once; later calls get an inert handle.
pub fn init() -> LogHandle {
    let (filter, handle) = reload::Layer::new(initial_filter());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    LogHandle {
        filter: installed.then_some(handle),
    }
}

fn initial_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

impl LogHandle {
    /// Switch to the configured level unless `RUST_LOG` is set
    pub fn apply_level(&self, level: &str) {
        let Some(handle) = &self.filter else {
            return;
        };
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return;
        }

        match EnvFilter::try_new(level) {
            Ok(filter) => {
                if let Err(e) = handle.reload(filter) {
                    tracing::warn!("Could not apply log level {:?}: {}", level, e);
                }
            }
            Err(e) => {
                tracing::warn!("Invalid log level {:?}, keeping {}: {}", level, DEFAULT_LEVEL, e)
            }
        }
    }
}
