use host::{CameraHandle, CameraSink, SurfaceHandle, VesselDirectory, VesselHandle, VesselQuery};
use tracing::{debug, info, warn};

use crate::config::FramingConfig;
use crate::error::FramingError;
use crate::fov::FieldOfView;
use crate::mode::{BrowseMode, CycleDirection, wrap_index};
use crate::pose::{AnchorRef, CameraPose, anchor_pose, resolve_camera_pose};

/// Default render flags passed to the camera sink: draw everything.
pub const DEFAULT_CAMERA_FLAGS: u32 = 0xFF;

/// Result of the most recent resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    /// Nothing resolved yet.
    #[default]
    Pending,
    Framed(CameraPose),
    Skipped(FramingError),
}

/// The framing state machine.
///
/// Invariants held after every operation:
/// - `index` is inside the active list whenever that list is non-empty;
/// - `mode` never names an empty list while the other one has entries;
/// - the camera handle, once created, is reused for every later update.
#[derive(Debug)]
pub struct TargetSelector {
    config: FramingConfig,
    target: VesselHandle,
    mode: BrowseMode,
    index: usize,
    offset_m: f64,
    fov: FieldOfView,
    parent_frame: bool,
    night_vision: bool,
    surface: Option<SurfaceHandle>,
    camera: Option<CameraHandle>,
    camera_flags: u32,
    last: Outcome,
}

impl TargetSelector {
    /// A selector observing `target`. Nothing is resolved until the first
    /// command or refresh.
    pub fn new(target: VesselHandle, config: FramingConfig) -> Self {
        Self {
            config,
            target,
            mode: BrowseMode::Attachment,
            index: 0,
            offset_m: 0.0,
            fov: FieldOfView::from_config(&config),
            parent_frame: false,
            night_vision: false,
            surface: None,
            camera: None,
            camera_flags: DEFAULT_CAMERA_FLAGS,
            last: Outcome::Pending,
        }
    }

    /// Render surface the camera draws into. Without one every resolution
    /// ends in [`FramingError::GraphicsUnavailable`].
    pub fn with_surface(mut self, surface: Option<SurfaceHandle>) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_camera_flags(mut self, flags: u32) -> Self {
        self.camera_flags = flags;
        self
    }

    pub fn target(&self) -> VesselHandle {
        self.target
    }

    pub fn mode(&self) -> BrowseMode {
        self.mode
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset_m(&self) -> f64 {
        self.offset_m
    }

    pub fn fov(&self) -> FieldOfView {
        self.fov
    }

    pub fn parent_frame(&self) -> bool {
        self.parent_frame
    }

    pub fn night_vision(&self) -> bool {
        self.night_vision
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    pub fn camera(&self) -> Option<CameraHandle> {
        self.camera
    }

    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    pub fn last_outcome(&self) -> &Outcome {
        &self.last
    }

    /// Hands the camera over for disposal. Later resolutions would create a
    /// new one, so callers only do this when closing.
    pub fn take_camera(&mut self) -> Option<CameraHandle> {
        self.camera.take()
    }

    /// Points the selector at `vessel` and re-aims the camera.
    ///
    /// A different vessel resets the offset and index and starts browsing
    /// attachments again.
    pub fn select_vessel<H>(
        &mut self,
        host: &mut H,
        vessel: VesselHandle,
        requested: BrowseMode,
    ) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        self.resolve(host, vessel, requested, 0)
    }

    pub fn cycle<H>(
        &mut self,
        host: &mut H,
        mode: BrowseMode,
        direction: CycleDirection,
    ) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        self.resolve(host, self.target, mode, direction.step())
    }

    /// Moves the camera along the anchor's forward axis. The offset has no
    /// bound and accumulates.
    pub fn nudge<H>(&mut self, host: &mut H, delta_m: f64) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        self.offset_m += delta_m;
        self.refresh(host)
    }

    /// Changes the half field of view by `delta_deg` (negative zooms in).
    pub fn set_field_of_view<H>(
        &mut self,
        host: &mut H,
        delta_deg: f64,
    ) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        self.fov.adjust(delta_deg, self.config.clamp_on_zoom);
        self.refresh(host)
    }

    /// Switches between the parent- and child-facing attachment sets.
    pub fn toggle_parent_frame<H>(&mut self, host: &mut H) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        self.parent_frame = !self.parent_frame;
        self.refresh(host)
    }

    /// Render-only flag; the pose is untouched. Returns the new value.
    pub fn toggle_night_vision(&mut self) -> bool {
        self.night_vision = !self.night_vision;
        self.night_vision
    }

    /// Switches to the vessel called `name`. Returns `false` and leaves all
    /// state alone when the host knows no such vessel.
    pub fn select_target_by_name<H>(&mut self, host: &mut H, name: &str) -> bool
    where
        H: VesselQuery + VesselDirectory + CameraSink + ?Sized,
    {
        let Some(vessel) = host.find_vessel_by_name(name) else {
            debug!(name, "{}", FramingError::UnknownVesselName(name.to_string()));
            return false;
        };
        // Resolution failures after a successful lookup are reported through
        // the outcome, not the return value.
        let _ = self.select_vessel(host, vessel, self.mode);
        true
    }

    /// Re-resolves against the live target, following its anchors as they move.
    pub fn refresh<H>(&mut self, host: &mut H) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        self.resolve(host, self.target, self.mode, 0)
    }

    fn resolve<H>(
        &mut self,
        host: &mut H,
        vessel: VesselHandle,
        requested: BrowseMode,
        step: isize,
    ) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        let result = self.resolve_inner(host, vessel, requested, step);
        self.last = match &result {
            Ok(pose) => Outcome::Framed(*pose),
            Err(err) => Outcome::Skipped(err.clone()),
        };
        result
    }

    fn resolve_inner<H>(
        &mut self,
        host: &mut H,
        vessel: VesselHandle,
        mut requested: BrowseMode,
        step: isize,
    ) -> Result<CameraPose, FramingError>
    where
        H: VesselQuery + CameraSink + ?Sized,
    {
        let mut step = step;
        if vessel != self.target {
            info!(from = self.target.index(), to = vessel.index(), "target switched");
            self.target = vessel;
            self.offset_m = 0.0;
            self.index = 0;
            self.mode = BrowseMode::Attachment;
            requested = BrowseMode::Attachment;
            step = 0;
        }

        let attach_count = host.attachment_count(vessel, self.parent_frame);
        let dock_count = host.dock_count(vessel);

        // Both lists empty: keep mode and index, drop any pending step.
        let Some(mode) = requested.effective(attach_count, dock_count) else {
            debug!(vessel = vessel.index(), "nothing to frame");
            return Err(FramingError::NoFramingTargets);
        };
        self.mode = mode;
        self.fov.clamp();

        let count = match mode {
            BrowseMode::Attachment => attach_count,
            BrowseMode::Dock => dock_count,
        };
        self.index = wrap_index(self.index as isize + step, count);

        let anchor = AnchorRef {
            mode,
            index: self.index,
            parent: self.parent_frame,
        };
        let Some(surface) = self.surface else {
            // Lookup failures still take precedence.
            anchor_pose(&*host, vessel, anchor)?;
            return Err(FramingError::GraphicsUnavailable);
        };

        let pose = resolve_camera_pose(&*host, vessel, anchor, self.offset_m, &self.fov, surface)
            .map_err(|err| {
                warn!(vessel = vessel.index(), "{err}");
                err
            })?;

        let previous = self.camera;
        match host.create_or_update_camera(previous, &pose.to_setup(self.camera_flags)) {
            Some(camera) => {
                if let Some(old) = previous.filter(|&old| old != camera) {
                    warn!("camera sink replaced the camera handle");
                    host.destroy_camera(old);
                }
                self.camera = Some(camera);
            }
            None => {
                warn!(vessel = vessel.index(), "camera sink refused the camera setup");
                return Err(FramingError::GraphicsUnavailable);
            }
        }

        debug!(
            vessel = vessel.index(),
            mode = mode.label(),
            index = self.index,
            offset_m = self.offset_m,
            fov_deg = self.fov.half_deg(),
            "camera aimed"
        );
        Ok(pose)
    }
}
