//! Virtualizer configuration
//!
//! Loaded from and saved to JSON or TOML, chosen by file extension. Every
//! field has a default, so partial files are accepted.

use std::path::Path;

use gcodesim_core::{ConfigError, Result};
use serde::{Deserialize, Serialize};

use crate::virtualizer::estimator::ACCELERATION;
use crate::virtualizer::ROTARY_CURVE_THRESHOLD;

/// Engine options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualizerConfig {
    /// Collect tools, speeds, feeds and axes for [`crate::FileStats`]
    pub collect_statistics: bool,
    /// Compute the Z minimum against the X minimum, as older previews did
    pub legacy_z_min_bound: bool,
    /// Acceleration used by the time estimate, mm/s²
    pub acceleration: f64,
    /// Rotary travel in degrees above which a G0/G1 move is reported as a
    /// curve
    pub rotary_curve_threshold: f64,
}

impl Default for VirtualizerConfig {
    fn default() -> Self {
        Self {
            collect_statistics: false,
            legacy_z_min_bound: false,
            acceleration: ACCELERATION,
            rotary_curve_threshold: ROTARY_CURVE_THRESHOLD,
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )
        .into()),
    }
}

impl VirtualizerConfig {
    /// Configuration with statistics collection enabled
    pub fn with_statistics() -> Self {
        Self {
            collect_statistics: true,
            ..Self::default()
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::Corrupted(format!("Invalid JSON config: {}", e)))?,
            Format::Toml => toml::from_str(&content)
                .map_err(|e| ConfigError::Corrupted(format!("Invalid TOML config: {}", e)))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Corrupted(format!("Failed to serialize config: {}", e)))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Corrupted(format!("Failed to serialize config: {}", e)))?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.acceleration.is_finite() || self.acceleration <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "acceleration".to_string(),
                value: self.acceleration.to_string(),
            }
            .into());
        }

        if !self.rotary_curve_threshold.is_finite() || self.rotary_curve_threshold < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "rotary_curve_threshold".to_string(),
                value: self.rotary_curve_threshold.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcodesim_core::Error;

    #[test]
    fn test_defaults() {
        let config = VirtualizerConfig::default();
        assert!(!config.collect_statistics);
        assert!(!config.legacy_z_min_bound);
        assert_eq!(config.acceleration, 750.0);
        assert_eq!(config.rotary_curve_threshold, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: VirtualizerConfig = toml::from_str("collect_statistics = true").unwrap();
        assert!(config.collect_statistics);
        assert_eq!(config.acceleration, 750.0);
    }

    #[test]
    fn test_validate_rejects_bad_acceleration() {
        let config = VirtualizerConfig {
            acceleration: 0.0,
            ..VirtualizerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("acceleration"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = VirtualizerConfig::load_from_file(Path::new("settings.yaml")).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }
}
