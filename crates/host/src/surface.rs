use bitflags::bitflags;

bitflags! {
    /// Capabilities requested when creating a render surface.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u32 {
        /// Target of a 3D scene render.
        const RENDER3D = 1 << 0;
        /// Can be sampled or blitted as a texture.
        const TEXTURE = 1 << 1;
        const RENDER_TARGET = 1 << 2;
        const NO_MIPMAPS = 1 << 3;
    }
}

impl SurfaceFlags {
    /// What a camera view surface needs: render into it in 3D, then blit it
    /// into the display panel.
    pub fn camera_view() -> Self {
        Self::RENDER3D | Self::TEXTURE | Self::RENDER_TARGET | Self::NO_MIPMAPS
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Font request for the overlay text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub height: u32,
    pub face: String,
    pub bold: bool,
    pub italic: bool,
    /// Character weight, 100..=900.
    pub weight: u32,
}
