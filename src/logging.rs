//! Structured logging setup on the `tracing` stack.
//!
//! Level precedence: CLI flag, then the `SKILLSYNC_LOG` environment variable,
//! then a quiet default. Output goes to stderr so command output on stdout
//! stays machine-consumable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "SKILLSYNC_LOG";

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging(verbose: bool, level: Option<&str>) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_level)),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
