//! Anchor pose lookup and camera pose derivation.

use host::{AnchorPose, CameraSetup, SurfaceHandle, VesselHandle, VesselQuery};

use crate::error::FramingError;
use crate::fov::FieldOfView;
use crate::mode::BrowseMode;

/// Where an anchor is looked up: list, index and attachment side.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub mode: BrowseMode,
    pub index: usize,
    /// Only meaningful for attachments.
    pub parent: bool,
}

/// The camera pose pushed to the host. Derived on every resolution, never
/// stored as the source of truth.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub vessel: VesselHandle,
    pub pose: AnchorPose,
    pub aperture_rad: f64,
    pub surface: SurfaceHandle,
}

impl CameraPose {
    pub fn to_setup(&self, flags: u32) -> CameraSetup {
        CameraSetup {
            vessel: self.vessel,
            position: self.pose.position,
            direction: self.pose.direction,
            up: self.pose.up,
            aperture_rad: self.aperture_rad,
            surface: self.surface,
            flags,
        }
    }
}

/// Fetches the raw anchor pose in the vessel's local frame.
pub fn anchor_pose<Q>(
    host: &Q,
    vessel: VesselHandle,
    anchor: AnchorRef,
) -> Result<AnchorPose, FramingError>
where
    Q: VesselQuery + ?Sized,
{
    let failed = FramingError::AnchorLookupFailed {
        mode: anchor.mode,
        index: anchor.index,
    };
    match anchor.mode {
        BrowseMode::Attachment => {
            let handle = host
                .attachment_handle(vessel, anchor.parent, anchor.index)
                .ok_or_else(|| failed.clone())?;
            host.attachment_params(vessel, handle).ok_or(failed)
        }
        BrowseMode::Dock => {
            let handle = host
                .dock_handle(vessel, anchor.index)
                .ok_or_else(|| failed.clone())?;
            host.dock_params(vessel, handle).ok_or(failed)
        }
    }
}

/// Pushes the anchor `offset_m` along its own forward axis. Direction and up
/// are unchanged.
pub fn apply_offset(pose: AnchorPose, offset_m: f64) -> AnchorPose {
    AnchorPose {
        position: pose.position.offset_along(pose.direction, offset_m),
        ..pose
    }
}

/// Full resolution: lookup, offset, aperture.
pub fn resolve_camera_pose<Q>(
    host: &Q,
    vessel: VesselHandle,
    anchor: AnchorRef,
    offset_m: f64,
    fov: &FieldOfView,
    surface: SurfaceHandle,
) -> Result<CameraPose, FramingError>
where
    Q: VesselQuery + ?Sized,
{
    let raw = anchor_pose(host, vessel, anchor)?;
    Ok(CameraPose {
        vessel,
        pose: apply_offset(raw, offset_m),
        aperture_rad: fov.aperture_rad(),
        surface,
    })
}

#[cfg(test)]
mod tests {
    use super::{AnchorRef, anchor_pose, apply_offset};
    use crate::error::FramingError;
    use crate::mode::BrowseMode;
    use foundation::math::Vec3;
    use host::AnchorPose;
    use host::sim::{SimHost, VesselSpec, anchor_at};

    #[test]
    fn offset_moves_along_direction_only() {
        let pose = AnchorPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Y);
        let moved = apply_offset(pose, 0.5);
        assert_eq!(moved.position, Vec3::new(1.5, 2.0, 3.0));
        assert_eq!(moved.direction, Vec3::X);
        assert_eq!(moved.up, Vec3::Y);
        assert_eq!(apply_offset(pose, 0.0), pose);
    }

    #[test]
    fn looks_up_attachment_on_requested_side() {
        let mut host = SimHost::new(true);
        let v = host.add_vessel(&VesselSpec::named("V"));
        host.add_attachment(v, false, anchor_at(1.0));
        host.add_attachment(v, true, anchor_at(-4.0));

        let child = AnchorRef {
            mode: BrowseMode::Attachment,
            index: 0,
            parent: false,
        };
        let parent = AnchorRef {
            parent: true,
            ..child
        };
        assert_eq!(anchor_pose(&host, v, child).unwrap().position.z, 1.0);
        assert_eq!(anchor_pose(&host, v, parent).unwrap().position.z, -4.0);
    }

    #[test]
    fn missing_handle_is_lookup_failure() {
        let mut host = SimHost::new(true);
        let v = host.add_vessel(&VesselSpec::named("V"));
        let anchor = AnchorRef {
            mode: BrowseMode::Dock,
            index: 2,
            parent: false,
        };
        assert_eq!(
            anchor_pose(&host, v, anchor),
            Err(FramingError::AnchorLookupFailed {
                mode: BrowseMode::Dock,
                index: 2
            })
        );
    }
}
