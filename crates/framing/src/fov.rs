use foundation::math::deg_to_rad;

use crate::config::FramingConfig;

/// Half field of view in degrees, with its allowed range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FieldOfView {
    half_deg: f64,
    min_deg: f64,
    max_deg: f64,
}

impl FieldOfView {
    pub fn new(half_deg: f64, min_deg: f64, max_deg: f64) -> Self {
        Self {
            half_deg,
            min_deg,
            max_deg,
        }
    }

    pub fn from_config(config: &FramingConfig) -> Self {
        Self::new(
            config.default_fov_deg,
            config.min_fov_deg,
            config.max_fov_deg,
        )
    }

    pub fn half_deg(&self) -> f64 {
        self.half_deg
    }

    /// The full angle shown to the user.
    pub fn full_deg(&self) -> f64 {
        self.half_deg * 2.0
    }

    /// Half angle in radians, what the camera sink expects as aperture.
    pub fn aperture_rad(&self) -> f64 {
        deg_to_rad(self.half_deg)
    }

    /// Pulls the half angle into range. With inverted bounds the upper one
    /// wins; a config is only checked when loaded, so this must not panic.
    pub fn clamp(&mut self) {
        self.half_deg = self.half_deg.max(self.min_deg).min(self.max_deg);
    }

    /// Changes the half angle by `delta_deg`; negative zooms in.
    pub fn adjust(&mut self, delta_deg: f64, clamp: bool) {
        self.half_deg += delta_deg;
        if clamp {
            self.clamp();
        }
    }
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self::from_config(&FramingConfig::default())
    }
}
