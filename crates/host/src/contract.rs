use foundation::math::Vec3;

use crate::handles::{
    AnchorHandle, CameraHandle, FontHandle, SurfaceHandle, TextureHandle, VesselHandle,
};
use crate::surface::{FontSpec, SurfaceFlags, SurfaceSize};

/// Raw pose of an attachment point or docking port in the vessel's local frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnchorPose {
    pub position: Vec3,
    /// Forward (approach/boresight) direction.
    pub direction: Vec3,
    /// Up vector, perpendicular to `direction`.
    pub up: Vec3,
}

impl AnchorPose {
    pub fn new(position: Vec3, direction: Vec3, up: Vec3) -> Self {
        Self {
            position,
            direction,
            up,
        }
    }
}

impl Default for AnchorPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }
}

/// Everything the host needs to aim a custom camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSetup {
    pub vessel: VesselHandle,
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    /// Half of the vertical field of view, radians.
    pub aperture_rad: f64,
    pub surface: SurfaceHandle,
    /// Host-specific render flags (which scene elements to draw).
    pub flags: u32,
}

/// Live queries against vessels. Counts are never cached by callers; the host
/// may add or remove anchors at any time.
pub trait VesselQuery {
    fn vessel_name(&self, vessel: VesselHandle) -> Option<String>;

    /// Number of attachment points; `parent` selects the parent-facing set
    /// instead of the child-facing one.
    fn attachment_count(&self, vessel: VesselHandle, parent: bool) -> usize;
    fn attachment_handle(
        &self,
        vessel: VesselHandle,
        parent: bool,
        index: usize,
    ) -> Option<AnchorHandle>;
    fn attachment_params(&self, vessel: VesselHandle, anchor: AnchorHandle) -> Option<AnchorPose>;

    fn dock_count(&self, vessel: VesselHandle) -> usize;
    fn dock_handle(&self, vessel: VesselHandle, index: usize) -> Option<AnchorHandle>;
    fn dock_params(&self, vessel: VesselHandle, anchor: AnchorHandle) -> Option<AnchorPose>;
}

pub trait VesselDirectory {
    fn find_vessel_by_name(&self, name: &str) -> Option<VesselHandle>;
}

/// Custom camera resources. A camera renders continuously into its surface
/// until destroyed.
pub trait CameraSink {
    /// Creates a camera when `existing` is `None`, otherwise re-aims the
    /// existing one and returns the same handle.
    fn create_or_update_camera(
        &mut self,
        existing: Option<CameraHandle>,
        setup: &CameraSetup,
    ) -> Option<CameraHandle>;

    fn destroy_camera(&mut self, camera: CameraHandle);
}

/// Surface, texture and font lifecycle. These resources are opaque to the
/// display; it only creates, passes through and releases them.
pub trait Graphics {
    /// Whether the rendering capability needed for camera views is present.
    fn graphics_available(&self) -> bool;

    fn create_surface(&mut self, size: SurfaceSize, flags: SurfaceFlags) -> Option<SurfaceHandle>;
    fn clear_surface(&mut self, surface: SurfaceHandle);
    fn destroy_surface(&mut self, surface: SurfaceHandle);

    fn load_texture(&mut self, path: &str) -> Option<TextureHandle>;
    fn release_texture(&mut self, texture: TextureHandle);

    fn create_font(&mut self, spec: &FontSpec) -> Option<FontHandle>;
    fn release_font(&mut self, font: FontHandle);
}

/// The full host surface used by a camera display.
pub trait Host: VesselQuery + VesselDirectory + CameraSink + Graphics {}

impl<T: VesselQuery + VesselDirectory + CameraSink + Graphics + ?Sized> Host for T {}
