//! Telemetry initialization.
//!
//! Events go to stderr so stdout stays clean for snapshot JSON. Verbosity is
//! read from `DEPSNAP_LOG`, then `RUST_LOG`, defaulting to `warn`:
//! - `DEPSNAP_LOG=debug` → pipeline counts and export shadowing
//! - `DEPSNAP_LOG=depsnap=info` → one span per snapshot build

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::config::LogFormat;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "DEPSNAP_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// Calling this twice is harmless: the second subscriber is not installed.
pub fn init(format: LogFormat) {
    let filter = env_filter();
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("warning: telemetry already initialized: {e}");
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
