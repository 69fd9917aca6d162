use foundation::handles::Handle;

/// A vessel owned by the host. The display only ever borrows it by handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VesselHandle(pub Handle);

/// An attachment point or docking port on a vessel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AnchorHandle(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CameraHandle(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FontHandle(pub Handle);

impl VesselHandle {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}

impl AnchorHandle {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}
