//! Logging setup shared by the dashboard binaries.
//!
//! Library code logs through `tracing` and `log`; `log` records are bridged
//! into the `tracing` subscriber installed here. Output goes to stderr so
//! rendered views on stdout stay clean.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{Result, UiError};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "sbomer_ui=info,sbomer_dash=info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryOptions {
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
    /// `-v` count: 1 enables debug, 2 or more enables trace.
    pub verbosity: u8,
}

/// Default filter directive for a verbosity level.
pub fn filter_directive(verbosity: u8) -> String {
    match verbosity {
        0 => DEFAULT_FILTER.to_string(),
        1 => "sbomer_ui=debug,sbomer_dash=debug".to_string(),
        _ => "sbomer_ui=trace,sbomer_dash=trace".to_string(),
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity default.
pub fn init(options: TelemetryOptions) -> Result<()> {
    tracing_log::LogTracer::init()
        .map_err(|e| UiError::Telemetry(format!("Failed to bridge log records: {}", e)))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(options.verbosity)));

    let output = if options.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(options.verbosity > 0)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(output);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| UiError::Telemetry(format!("Failed to install subscriber: {}", e)))?;

    tracing::debug!("Logging initialized (json: {})", options.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_by_verbosity() {
        assert_eq!(filter_directive(0), DEFAULT_FILTER);
        assert!(filter_directive(1).contains("sbomer_ui=debug"));
        assert!(filter_directive(5).contains("sbomer_dash=trace"));
    }

    #[test]
    fn test_filter_directives_parse() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(filter_directive(verbosity)).is_ok());
        }
    }
}
