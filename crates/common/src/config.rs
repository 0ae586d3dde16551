//! Application configuration.
//!
//! Read once at startup. Invalid controller constants are rejected by
//! [`ControllerConfig::validate`] before any frame is processed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PinchpointError, PinchpointResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture-to-pointer tuning constants.
    pub controller: ControllerConfig,

    /// Host loop behaviour.
    pub runtime: RuntimeConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// What the controller does when the hand disappears mid-hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HandLossPolicy {
    /// Keep the button held until the hand comes back and opens.
    #[default]
    Retain,
    /// Release the button on the first frame without a hand.
    Release,
}

/// Tuning constants for smoothing and pinch detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Divisor applied to each frame's positional delta. Must be > 0.
    pub smoothening_factor: f64,

    /// Pinch distance below which the button is pressed.
    pub click_distance: f64,

    /// Pinch distance above which a held button is released.
    /// Must be greater than `click_distance`.
    pub release_distance: f64,

    /// Seed the smoother from the first observed position instead of
    /// gliding in from the screen origin.
    pub seed_from_first_observation: bool,

    /// Behaviour when tracking is lost while the button is held.
    pub hand_loss: HandLossPolicy,
}

/// Host loop parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Frame pacing target when replaying in real time (0 disables pacing).
    pub frame_rate_hz: u32,

    /// Mirror landmarks horizontally so motion matches a selfie view.
    pub mirror_horizontal: bool,

    /// Abort when a move targets the top-left corner region.
    pub failsafe: bool,

    /// Size of the fail-safe corner region in pixels.
    pub failsafe_margin_px: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "pinchpoint=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            smoothening_factor: 5.0,
            click_distance: 0.025,
            release_distance: 0.045,
            seed_from_first_observation: false,
            hand_loss: HandLossPolicy::Retain,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 30,
            mirror_horizontal: true,
            failsafe: true,
            failsafe_margin_px: 0.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ControllerConfig {
    /// Reject constants that would make smoothing or hysteresis meaningless.
    pub fn validate(&self) -> PinchpointResult<()> {
        validate_smoothening_factor(self.smoothening_factor)?;
        validate_thresholds(self.click_distance, self.release_distance)
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> PinchpointResult<()> {
        if !self.failsafe_margin_px.is_finite() || self.failsafe_margin_px < 0.0 {
            return Err(PinchpointError::config(format!(
                "failsafe_margin_px must be a non-negative number, got {}",
                self.failsafe_margin_px
            )));
        }
        Ok(())
    }
}

/// `smoothening_factor` must be a finite number strictly greater than zero.
pub fn validate_smoothening_factor(factor: f64) -> PinchpointResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PinchpointError::config(format!(
            "smoothening_factor must be > 0, got {factor}"
        )));
    }
    Ok(())
}

/// Thresholds must be finite, non-negative, and strictly ordered.
pub fn validate_thresholds(click_distance: f64, release_distance: f64) -> PinchpointResult<()> {
    if !click_distance.is_finite() || !release_distance.is_finite() {
        return Err(PinchpointError::config(format!(
            "pinch thresholds must be finite, got click={click_distance} release={release_distance}"
        )));
    }
    if click_distance < 0.0 {
        return Err(PinchpointError::config(format!(
            "click_distance must be >= 0, got {click_distance}"
        )));
    }
    if click_distance >= release_distance {
        return Err(PinchpointError::config(format!(
            "click_distance ({click_distance}) must be less than release_distance ({release_distance})"
        )));
    }
    Ok(())
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// A file that exists but cannot be read is not masked: the defaults
    /// come back alongside the error so the caller can report it once
    /// logging is up.
    pub fn load() -> (Self, Option<PinchpointError>) {
        let config_path = config_file_path();
        if !config_path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(&config_path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from an explicit path. Errors are returned, not masked.
    pub fn load_from(path: &Path) -> PinchpointResult<Self> {
        if !path.exists() {
            return Err(PinchpointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Validate every section that has startup constraints.
    pub fn validate(&self) -> PinchpointResult<()> {
        self.controller.validate()?;
        self.runtime.validate()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> PinchpointResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> PinchpointResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pinchpoint").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = ControllerConfig::default();
        assert_eq!(config.smoothening_factor, 5.0);
        assert_eq!(config.click_distance, 0.025);
        assert_eq!(config.release_distance, 0.045);
        assert_eq!(config.hand_loss, HandLossPolicy::Retain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_smoothening() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ControllerConfig {
                smoothening_factor: factor,
                ..ControllerConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(PinchpointError::Config { .. })),
                "factor {factor} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_inverted_or_equal_thresholds() {
        assert!(validate_thresholds(0.045, 0.025).is_err());
        assert!(validate_thresholds(0.03, 0.03).is_err());
        assert!(validate_thresholds(-0.01, 0.03).is_err());
        assert!(validate_thresholds(0.025, 0.045).is_ok());
    }

    #[test]
    fn test_runtime_rejects_negative_margin() {
        let runtime = RuntimeConfig {
            failsafe_margin_px: -2.0,
            ..RuntimeConfig::default()
        };
        assert!(runtime.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"controller":{"smoothening_factor":3.0,"hand_loss":"release"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.controller.smoothening_factor, 3.0);
        assert_eq!(config.controller.click_distance, 0.025);
        assert_eq!(config.controller.hand_loss, HandLossPolicy::Release);
        assert_eq!(config.runtime, RuntimeConfig::default());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join("pinchpoint_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.runtime.mirror_horizontal = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_reports_malformed_standard_file() {
        let dir = std::env::temp_dir().join("pinchpoint_test_xdg_malformed");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("pinchpoint")).unwrap();
        std::fs::write(
            dir.join("pinchpoint").join("config.json"),
            r#"{"controller": {"smoothening_factor": "five""#,
        )
        .unwrap();

        let previous = std::env::var_os("XDG_CONFIG_HOME");
        std::env::set_var("XDG_CONFIG_HOME", &dir);
        let (config, error) = AppConfig::load();
        match previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(config, AppConfig::default());
        assert!(matches!(error, Some(PinchpointError::Json(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_path() {
        let path = std::env::temp_dir().join("pinchpoint_no_such_config.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(PinchpointError::FileNotFound { .. })
        ));
    }
}
