use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for target selection. Every field has a default, so `{}` is a
/// valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Initial half field of view, degrees.
    pub default_fov_deg: f64,
    pub min_fov_deg: f64,
    pub max_fov_deg: f64,
    /// Half-angle change per zoom command, degrees.
    pub zoom_step_deg: f64,
    /// Offset change per nudge command, meters.
    pub nudge_step_m: f64,
    /// Clamp the field of view when a zoom command is applied, not only when
    /// the pose is next resolved.
    pub clamp_on_zoom: bool,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            default_fov_deg: 30.0,
            min_fov_deg: 5.0,
            max_fov_deg: 70.0,
            zoom_step_deg: 5.0,
            nudge_step_m: 0.1,
            clamp_on_zoom: true,
        }
    }
}

impl FramingConfig {
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&payload)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_fov_deg > 0.0 && self.max_fov_deg < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "fov bounds must lie in (0, 90): [{}, {}]",
                self.min_fov_deg, self.max_fov_deg
            )));
        }
        if self.min_fov_deg > self.max_fov_deg {
            return Err(ConfigError::Invalid(format!(
                "min_fov_deg {} exceeds max_fov_deg {}",
                self.min_fov_deg, self.max_fov_deg
            )));
        }
        if !(self.min_fov_deg..=self.max_fov_deg).contains(&self.default_fov_deg) {
            return Err(ConfigError::Invalid(format!(
                "default_fov_deg {} outside [{}, {}]",
                self.default_fov_deg, self.min_fov_deg, self.max_fov_deg
            )));
        }
        if !(self.zoom_step_deg.is_finite() && self.nudge_step_m.is_finite()) {
            return Err(ConfigError::Invalid("step sizes must be finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FramingConfig;
    use crate::error::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_gives_defaults() {
        let config = FramingConfig::from_json("{}").unwrap();
        assert_eq!(config, FramingConfig::default());
        assert_eq!(config.default_fov_deg, 30.0);
        assert!(config.clamp_on_zoom);
    }

    #[test]
    fn partial_override() {
        let config = FramingConfig::from_json(r#"{ "zoom_step_deg": 2.5 }"#).unwrap();
        assert_eq!(config.zoom_step_deg, 2.5);
        assert_eq!(config.max_fov_deg, 70.0);
    }

    #[test]
    fn rejects_inverted_and_out_of_range_bounds() {
        let inverted = r#"{ "min_fov_deg": 50, "max_fov_deg": 10, "default_fov_deg": 20 }"#;
        assert!(matches!(
            FramingConfig::from_json(inverted),
            Err(ConfigError::Invalid(_))
        ));
        let default_outside = r#"{ "default_fov_deg": 80 }"#;
        assert!(matches!(
            FramingConfig::from_json(default_outside),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FramingConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
