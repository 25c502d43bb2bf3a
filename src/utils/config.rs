use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::core::{RegionDelta, FIT_DELAY_MS};
use crate::display::{EdgePadding, FitOptions, Viewport};
use crate::provider::WatchOptions;

pub const DEFAULT_TITLE: &str = "GuideDog Navigation (Demo)";

/// Screen-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Header text of the map frame
    pub title: String,
    /// Zoom span of the region created from the first fix
    pub region_delta: RegionDelta,
    /// Live subscription settings
    pub watch: WatchOptions,
    /// Camera fit after a destination is submitted
    pub fit: FitConfig,
    /// Destination input handling
    pub destination: DestinationConfig,
    /// Map widget size, used by the headless display
    pub viewport: Viewport,
}

/// Camera fit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Wait between submission and fit (milliseconds)
    pub delay_ms: u64,
    pub edge_padding: EdgePadding,
    pub animated: bool,
}

/// Destination input settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    /// Reject latitudes outside ±90 and longitudes outside ±180
    pub validate_range: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            region_delta: RegionDelta::default(),
            watch: WatchOptions::default(),
            fit: FitConfig::default(),
            destination: DestinationConfig::default(),
            viewport: Viewport::default(),
        }
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            delay_ms: FIT_DELAY_MS,
            edge_padding: EdgePadding::default(),
            animated: true,
        }
    }
}

impl FitConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn options(&self) -> FitOptions {
        FitOptions {
            edge_padding: self.edge_padding,
            animated: self.animated,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("Configuration error: invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    #[error("I/O error: {message}")]
    IoError { message: String },
    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Longest camera fit delay accepted from a file or a setter
pub const MAX_FIT_DELAY_MS: u64 = 5_000;

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl ScreenConfig {
    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_region_delta(&self.region_delta)?;
        validate_fit_delay(self.fit.delay_ms)?;

        if self.watch.min_interval_ms == 0 {
            return Err(invalid(
                "watch.min_interval_ms",
                self.watch.min_interval_ms,
                "Update interval must be positive",
            ));
        }
        if !self.watch.min_distance_m.is_finite() || self.watch.min_distance_m < 0.0 {
            return Err(invalid(
                "watch.min_distance_m",
                self.watch.min_distance_m,
                "Update distance must be a non-negative number of meters",
            ));
        }

        if self.viewport.width_px == 0 || self.viewport.height_px == 0 {
            return Err(invalid(
                "viewport",
                format!("{}x{}", self.viewport.width_px, self.viewport.height_px),
                "Viewport must have a non-zero size",
            ));
        }

        let padding = &self.fit.edge_padding;
        if padding.horizontal() >= u64::from(self.viewport.width_px) {
            return Err(invalid(
                "fit.edge_padding",
                padding.horizontal(),
                "Horizontal padding leaves no room inside the viewport",
            ));
        }
        if padding.vertical() >= u64::from(self.viewport.height_px) {
            return Err(invalid(
                "fit.edge_padding",
                padding.vertical(),
                "Vertical padding leaves no room inside the viewport",
            ));
        }

        Ok(())
    }
}

fn validate_fit_delay(delay_ms: u64) -> Result<(), ConfigError> {
    if delay_ms > MAX_FIT_DELAY_MS {
        return Err(invalid(
            "fit.delay_ms",
            delay_ms,
            "Fit delay too long for an interactive screen",
        ));
    }
    Ok(())
}

fn validate_region_delta(delta: &RegionDelta) -> Result<(), ConfigError> {
    for (parameter, value) in [
        ("region_delta.latitude", delta.latitude),
        ("region_delta.longitude", delta.longitude),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(parameter, value, "Zoom span must be a positive number of degrees"));
        }
    }
    Ok(())
}

/// Loads, validates, adjusts and saves the screen configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigurationManager {
    config: ScreenConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: ScreenConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from JSON file; missing fields keep their defaults
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: ScreenConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        config.validate()?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    // Runtime Parameter Adjustment Methods

    /// Update the camera fit delay, returning the previous value
    pub fn set_fit_delay(&mut self, delay_ms: u64) -> Result<u64, ConfigError> {
        validate_fit_delay(delay_ms)?;

        let old_value = self.config.fit.delay_ms;
        self.config.fit.delay_ms = delay_ms;
        self.is_modified = true;
        Ok(old_value)
    }

    /// Update the initial zoom span, returning the previous value
    pub fn set_region_delta(&mut self, delta: RegionDelta) -> Result<RegionDelta, ConfigError> {
        validate_region_delta(&delta)?;

        let old_value = self.config.region_delta;
        self.config.region_delta = delta;
        self.is_modified = true;
        Ok(old_value)
    }

    /// Toggle destination range validation, returning the previous setting
    pub fn set_validate_range(&mut self, enabled: bool) -> bool {
        let old_value = self.config.destination.validate_range;
        self.config.destination.validate_range = enabled;
        self.is_modified = true;
        old_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Accuracy;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("guidedog_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_screen_config() {
        let config = ScreenConfig::default();
        assert_eq!(config.title, "GuideDog Navigation (Demo)");
        assert_eq!(config.region_delta.latitude, 0.01);
        assert_eq!(config.watch.accuracy, Accuracy::High);
        assert_eq!(config.watch.min_interval_ms, 1000);
        assert_eq!(config.fit.delay_ms, 300);
        assert_eq!(config.fit.edge_padding, EdgePadding { top: 80, right: 50, bottom: 80, left: 50 });
        assert!(config.fit.animated);
        assert!(!config.destination.validate_range);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configuration_manager_creation() {
        let manager = ConfigurationManager::new();
        assert_eq!(manager.get_config(), &ScreenConfig::default());
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_invalid_region_delta() {
        let mut config = ScreenConfig::default();
        config.region_delta.longitude = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { parameter, .. }) if parameter == "region_delta.longitude"
        ));
    }

    #[test]
    fn test_padding_must_fit_viewport() {
        let mut config = ScreenConfig::default();
        config.viewport = Viewport {
            width_px: 100,
            height_px: 1000,
        };
        assert!(config.validate().is_err());

        let mut manager = ConfigurationManager::new();
        assert!(manager.update_config(config).is_err());
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_oversized_padding_is_rejected_without_overflow() {
        let temp_path = temp_path("padding_overflow");
        fs::write(
            &temp_path,
            r#"{ "fit": { "edge_padding": { "top": 80, "right": 2, "bottom": 80, "left": 4294967295 } } }"#,
        )
        .unwrap();

        let result = ConfigurationManager::from_file(&temp_path);
        let _ = fs::remove_file(&temp_path);

        match result {
            Err(ConfigError::InvalidParameter { parameter, value, .. }) => {
                assert_eq!(parameter, "fit.edge_padding");
                assert_eq!(value, "4294967297");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_loaded_fit_delay_uses_setter_limit() {
        let mut config = ScreenConfig::default();
        config.fit.delay_ms = MAX_FIT_DELAY_MS;
        assert!(config.validate().is_ok());

        config.fit.delay_ms = MAX_FIT_DELAY_MS + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "fit.delay_ms"
        ));
    }

    #[test]
    fn test_zero_watch_interval_rejected() {
        let mut config = ScreenConfig::default();
        config.watch.min_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let mut manager = ConfigurationManager::new();
        manager.set_fit_delay(120).unwrap();
        manager.set_validate_range(true);
        assert!(manager.is_modified());

        let temp_path = temp_path("roundtrip");
        manager.save_to_file(&temp_path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&temp_path).unwrap();
        assert_eq!(loaded.get_config().fit.delay_ms, 120);
        assert!(loaded.get_config().destination.validate_range);

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp_path = temp_path("partial");
        fs::write(&temp_path, r#"{ "title": "Walk", "fit": { "delay_ms": 50 } }"#).unwrap();

        let manager = ConfigurationManager::from_file(&temp_path).unwrap();
        assert_eq!(manager.get_config().title, "Walk");
        assert_eq!(manager.get_config().fit.delay_ms, 50);
        assert_eq!(manager.get_config().fit.edge_padding, EdgePadding::default());
        assert_eq!(manager.get_config().watch, WatchOptions::default());

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_malformed_config_file() {
        let temp_path = temp_path("malformed");
        fs::write(&temp_path, "{ not json").unwrap();

        assert!(matches!(
            ConfigurationManager::from_file(&temp_path),
            Err(ConfigError::SerializationError { .. })
        ));

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            ConfigurationManager::from_file(temp_path("does_not_exist")),
            Err(ConfigError::IoError { .. })
        ));
    }

    #[test]
    fn test_runtime_adjustments() {
        let mut manager = ConfigurationManager::new();

        assert_eq!(manager.set_fit_delay(500).unwrap(), 300);
        assert!(manager.set_fit_delay(60_000).is_err());
        assert_eq!(manager.get_config().fit.delay_ms, 500);

        let delta = RegionDelta {
            latitude: 0.05,
            longitude: 0.05,
        };
        assert_eq!(manager.set_region_delta(delta).unwrap(), RegionDelta::default());
        assert!(manager
            .set_region_delta(RegionDelta {
                latitude: -1.0,
                longitude: 0.05
            })
            .is_err());
        assert_eq!(manager.get_config().region_delta, delta);

        assert!(manager.save().is_err());
    }
}
