use std::fs;
use std::path::Path;

use framing::{ConfigError, DEFAULT_CAMERA_FLAGS, FramingConfig};
use serde::{Deserialize, Serialize};

/// Render parameters applied around the camera blit while night vision is on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightVisionParams {
    pub brightness: [f32; 4],
    pub gamma: [f32; 4],
    pub noise: [f32; 4],
}

impl Default for NightVisionParams {
    fn default() -> Self {
        Self {
            brightness: [0.0, 4.0, 0.0, 1.0],
            gamma: [0.5, 0.5, 0.5, 1.0],
            noise: [0.0, 0.3, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decorative texture loaded while graphics are available.
    pub texture_path: String,
    pub font_face: String,
    /// Overlay font height is the panel width divided by this.
    pub font_height_divisor: u32,
    pub camera_flags: u32,
    pub night_vision: NightVisionParams,
    pub framing: FramingConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            texture_path: "DG/dg_instr.dds".to_string(),
            font_face: "Arial".to_string(),
            font_height_divisor: 20,
            camera_flags: DEFAULT_CAMERA_FLAGS,
            night_vision: NightVisionParams::default(),
            framing: FramingConfig::default(),
        }
    }
}

impl DisplayConfig {
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
        if self.font_height_divisor == 0 {
            return Err(ConfigError::Invalid(
                "font_height_divisor must be non-zero".to_string(),
            ));
        }
        self.framing.validate()
    }
}
