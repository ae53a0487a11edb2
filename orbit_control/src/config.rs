//! Controller configuration.
//!
//! Everything here is fixed when an [`crate::OrbitController`] is built;
//! nothing is mutated mid-gesture.  Files are YAML, and every section is
//! optional:
//!
//! ```yaml
//! pinch:
//!   threshold: 0.8
//! rotate:
//!   degrees_per_meter: 300.0
//!   smoothing: 16.0
//!   pitch_min: -70.0
//!   pitch_max: 70.0
//! zoom:
//!   scale_board: true
//!   min_scale: 0.05
//!   max_scale: 2.0
//!   smoothing: 16.0
//! tracking:
//!   pinch_space: provider_local
//! reset:
//!   hold_seconds: 0.8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ════════════════════════════════════════════════════════════════════════════
// OrbitConfig
// ════════════════════════════════════════════════════════════════════════════

/// Full controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrbitConfig {
    pub pinch:    PinchConfig,
    pub rotate:   RotateConfig,
    pub zoom:     ZoomConfig,
    pub tracking: TrackingConfig,
    pub reset:    ResetConfig,
}

/// Pinch classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// A hand pinches when its pinch strength is at least this (0.0–1.0).
    pub threshold: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self { threshold: 0.8 }
    }
}

/// One-hand rotate gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateConfig {
    /// Degrees of yaw/pitch per metre of camera-relative hand travel.
    pub degrees_per_meter: f32,
    /// Exponential convergence rate of the orientation (1/s).
    pub smoothing: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            degrees_per_meter: 300.0,
            smoothing:         16.0,
            pitch_min:         -70.0,
            pitch_max:         70.0,
        }
    }
}

/// Two-hand zoom gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// When false, zoom is still recognised (and still wins over rotate)
    /// but leaves the scale target alone.
    pub scale_board: bool,
    pub min_scale:   f32,
    pub max_scale:   f32,
    /// Exponential convergence rate of the scale (1/s).
    pub smoothing:   f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scale_board: true,
            min_scale:   0.05,
            max_scale:   2.0,
            smoothing:   16.0,
        }
    }
}

/// Coordinate frame of raw pinch positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PinchSpace {
    /// Samples are in the tracking provider's local frame and must be
    /// transformed by the provider pose.
    #[default]
    ProviderLocal,
    /// Samples are already in world space.
    World,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrackingConfig {
    pub pinch_space: PinchSpace,
}

/// Hands-free reset trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    /// How long the reset pose must be held before the board snaps home.
    pub hold_seconds: f32,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self { hold_seconds: 0.8 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Loading / validation
// ════════════════════════════════════════════════════════════════════════════

impl OrbitConfig {
    /// Load and validate a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails [`OrbitConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML or invalid values.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: OrbitConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialise to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every value for range and consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.pinch.threshold) {
            return Err(Error::Config(format!(
                "pinch.threshold must be in [0, 1], got {}",
                self.pinch.threshold
            )));
        }

        non_negative("rotate.degrees_per_meter", self.rotate.degrees_per_meter)?;
        non_negative("rotate.smoothing", self.rotate.smoothing)?;
        non_negative("zoom.smoothing", self.zoom.smoothing)?;
        non_negative("reset.hold_seconds", self.reset.hold_seconds)?;

        finite("rotate.pitch_min", self.rotate.pitch_min)?;
        finite("rotate.pitch_max", self.rotate.pitch_max)?;
        if self.rotate.pitch_min > self.rotate.pitch_max {
            return Err(Error::Config(format!(
                "rotate.pitch_min ({}) exceeds rotate.pitch_max ({})",
                self.rotate.pitch_min, self.rotate.pitch_max
            )));
        }

        finite("zoom.min_scale", self.zoom.min_scale)?;
        finite("zoom.max_scale", self.zoom.max_scale)?;
        if self.zoom.min_scale <= 0.0 {
            return Err(Error::Config(format!(
                "zoom.min_scale must be positive, got {}",
                self.zoom.min_scale
            )));
        }
        if self.zoom.min_scale > self.zoom.max_scale {
            return Err(Error::Config(format!(
                "zoom.min_scale ({}) exceeds zoom.max_scale ({})",
                self.zoom.min_scale, self.zoom.max_scale
            )));
        }

        Ok(())
    }
}

fn finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(format!("{field} must be finite, got {value}")))
    }
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(Error::Config(format!("{field} must not be negative, got {value}")));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = OrbitConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.pinch.threshold, 0.8);
        assert_eq!(cfg.rotate.degrees_per_meter, 300.0);
        assert_eq!(cfg.rotate.pitch_min, -70.0);
        assert_eq!(cfg.rotate.pitch_max, 70.0);
        assert_eq!(cfg.zoom.max_scale, 2.0);
        assert_eq!(cfg.tracking.pinch_space, PinchSpace::ProviderLocal);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg = OrbitConfig::from_yaml("zoom:\n  max_scale: 1.2\n").unwrap();
        assert_eq!(cfg.zoom.max_scale, 1.2);
        assert_eq!(cfg.zoom.min_scale, 0.05);
        assert_eq!(cfg.rotate, RotateConfig::default());
    }

    #[test]
    fn pinch_space_snake_case() {
        let cfg = OrbitConfig::from_yaml("tracking:\n  pinch_space: world\n").unwrap();
        assert_eq!(cfg.tracking.pinch_space, PinchSpace::World);
    }

    #[test]
    fn yaml_round_trip() {
        let mut cfg = OrbitConfig::default();
        cfg.rotate.degrees_per_meter = 120.0;
        cfg.zoom.scale_board = false;
        let text = cfg.to_yaml().unwrap();
        assert_eq!(OrbitConfig::from_yaml(&text).unwrap(), cfg);
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let mut cfg = OrbitConfig::default();
        cfg.pinch.threshold = 1.5;
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_inverted_pitch_range() {
        let mut cfg = OrbitConfig::default();
        cfg.rotate.pitch_min = 10.0;
        cfg.rotate.pitch_max = -10.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_min_scale() {
        let mut cfg = OrbitConfig::default();
        cfg.zoom.min_scale = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_smoothing() {
        let mut cfg = OrbitConfig::default();
        cfg.zoom.smoothing = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = OrbitConfig::from_yaml("pinch: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = OrbitConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
