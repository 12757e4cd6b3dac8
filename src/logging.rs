//! Logging setup for the `tt` binary.
//!
//! Diagnostics go to stderr so `--json` output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Verbosity: `-q` errors only, default warnings (graph anomalies),
/// `-v` debug, `-vv` trace. `RUST_LOG` overrides the computed level.
pub fn init(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
