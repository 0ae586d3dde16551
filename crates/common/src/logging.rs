//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over everything. Otherwise the configured level applies,
//! and `--verbose` raises only the Pinchpoint crates to `debug` so click
//! transitions show up without drowning in dependency output.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{PinchpointError, PinchpointResult};

/// Log targets of the crates that emit controller events.
const PINCHPOINT_TARGETS: &[&str] = &[
    "pinchpoint",
    "pinchpoint_cli",
    "pinchpoint_common",
    "pinchpoint_gesture_core",
    "pinchpoint_pointer_control",
];

/// Filter directives for the given configuration.
pub fn filter_directives(config: &LoggingConfig, verbose: bool) -> String {
    let mut directives = vec![config.level.trim().to_string()];
    if verbose {
        directives.extend(PINCHPOINT_TARGETS.iter().map(|target| format!("{target}=debug")));
    }
    directives.join(",")
}

fn build_filter(config: &LoggingConfig, verbose: bool) -> PinchpointResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = filter_directives(config, verbose);
    EnvFilter::try_new(&directives).map_err(|e| {
        PinchpointError::config(format!("invalid logging level '{}': {e}", config.level))
    })
}

/// Install the global subscriber.
///
/// Fails only when the configured level is not a valid filter.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> PinchpointResult<()> {
    let env_filter = build_filter(config, verbose)?;

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(verbose)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            json: false,
        }
    }

    #[test]
    fn test_quiet_uses_configured_level() {
        assert_eq!(filter_directives(&level("warn"), false), "warn");
    }

    #[test]
    fn test_verbose_raises_only_pinchpoint_targets() {
        let directives = filter_directives(&level("warn"), true);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("pinchpoint_gesture_core=debug"));
        assert!(directives.contains("pinchpoint_pointer_control=debug"));
        assert!(!directives.contains("tokio"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let directives = filter_directives(&level("pinchpoint=loud"), false);
        assert!(EnvFilter::try_new(&directives).is_err());
    }
}
