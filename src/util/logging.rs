use tracing_subscriber::EnvFilter;

use super::LoggerConfig;

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured
/// verbosity when set. Does nothing if a subscriber is already installed.
pub fn init_tracing(config: &LoggerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.to_string()));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use crate::util::Verbosity;

    use super::*;

    #[test]
    fn verbosity_renders_as_filter_directive() {
        assert_eq!(Verbosity::Trace.to_string(), "trace");
        assert_eq!(Verbosity::Warn.to_string(), "warn");
    }

    #[test]
    fn init_is_idempotent() {
        let config = LoggerConfig {
            verbosity: Verbosity::Debug,
        };
        init_tracing(&config);
        init_tracing(&config);
    }
}
