use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// A bare level like `debug` would also open the floodgates on the HTTP
/// stack underneath axum, so scope those crates down; an explicit directive
/// string is passed through untouched.
fn fallback_directives(configured: &str) -> String {
    if configured.contains('=') || configured.contains(',') {
        configured.to_string()
    } else {
        format!("{configured},hyper=warn,tower=warn")
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured
/// fallback level when both are present.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback_directives(&config.log_level)).map_err(
            |source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            },
        )?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_quiet_the_http_stack() {
        assert_eq!(fallback_directives("debug"), "debug,hyper=warn,tower=warn");
        assert_eq!(fallback_directives("info"), "info,hyper=warn,tower=warn");
    }

    #[test]
    fn explicit_directive_strings_pass_through() {
        assert_eq!(
            fallback_directives("edu_assess=trace,hyper=info"),
            "edu_assess=trace,hyper=info"
        );
        assert_eq!(fallback_directives("warn,csv=debug"), "warn,csv=debug");
    }
}
