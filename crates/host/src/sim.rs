//! In-memory host used by tests and the console app.
//!
//! Every resource call is appended to an ordered call log so callers can check
//! lifecycle ordering (camera before surface) and camera identity.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use foundation::handles::Handle;
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::{
    AnchorPose, CameraSetup, CameraSink, Graphics, VesselDirectory, VesselQuery,
};
use crate::handles::{
    AnchorHandle, CameraHandle, FontHandle, SurfaceHandle, TextureHandle, VesselHandle,
};
use crate::surface::{FontSpec, SurfaceFlags, SurfaceSize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub position: [f64; 3],
    #[serde(default = "default_direction")]
    pub direction: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
}

fn default_direction() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

impl AnchorSpec {
    pub fn pose(&self) -> AnchorPose {
        AnchorPose::new(self.position.into(), self.direction.into(), self.up.into())
    }
}

impl From<AnchorPose> for AnchorSpec {
    fn from(pose: AnchorPose) -> Self {
        Self {
            position: pose.position.into(),
            direction: pose.direction.into(),
            up: pose.up.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselSpec {
    pub name: String,
    #[serde(default)]
    pub docks: Vec<AnchorSpec>,
    #[serde(default)]
    pub child_attachments: Vec<AnchorSpec>,
    #[serde(default)]
    pub parent_attachments: Vec<AnchorSpec>,
}

impl VesselSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A set of vessels loaded into a [`SimHost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_graphics")]
    pub graphics: bool,
    pub vessels: Vec<VesselSpec>,
}

fn default_graphics() -> bool {
    true
}

#[derive(Debug)]
pub enum ScenarioError {
    Parse(serde_json::Error),
    NoVessels,
    DuplicateName(String),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Parse(err) => write!(f, "scenario parse error: {err}"),
            ScenarioError::NoVessels => write!(f, "scenario defines no vessels"),
            ScenarioError::DuplicateName(name) => write!(f, "duplicate vessel name: {name}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl Scenario {
    pub fn from_json(payload: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(payload).map_err(ScenarioError::Parse)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.vessels.is_empty() {
            return Err(ScenarioError::NoVessels);
        }
        let mut seen = BTreeSet::new();
        for vessel in &self.vessels {
            if !seen.insert(vessel.name.as_str()) {
                return Err(ScenarioError::DuplicateName(vessel.name.clone()));
            }
        }
        Ok(())
    }
}

/// One host call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CameraCreated(CameraHandle),
    CameraUpdated(CameraHandle),
    CameraDestroyed(CameraHandle),
    SurfaceCreated(SurfaceHandle),
    SurfaceCleared(SurfaceHandle),
    SurfaceDestroyed(SurfaceHandle),
    TextureLoaded(TextureHandle, String),
    TextureReleased(TextureHandle),
    FontCreated(FontHandle),
    FontReleased(FontHandle),
}

#[derive(Debug, Clone, Copy)]
struct SimAnchor {
    id: u32,
    pose: AnchorPose,
}

#[derive(Debug, Clone)]
struct SimVessel {
    name: String,
    docks: Vec<SimAnchor>,
    child_attachments: Vec<SimAnchor>,
    parent_attachments: Vec<SimAnchor>,
    failing_lookups: bool,
}

impl SimVessel {
    fn attachments(&self, parent: bool) -> &[SimAnchor] {
        if parent {
            &self.parent_attachments
        } else {
            &self.child_attachments
        }
    }

    fn attachments_mut(&mut self, parent: bool) -> &mut Vec<SimAnchor> {
        if parent {
            &mut self.parent_attachments
        } else {
            &mut self.child_attachments
        }
    }
}

#[derive(Debug, Default)]
pub struct SimHost {
    graphics: bool,
    vessels: Vec<SimVessel>,
    next_anchor: u32,
    next_resource: u32,
    cameras: BTreeMap<u32, CameraSetup>,
    surfaces: BTreeMap<u32, (SurfaceSize, SurfaceFlags)>,
    textures: BTreeSet<u32>,
    fonts: BTreeSet<u32>,
    calls: Vec<HostCall>,
    reissue_cameras: bool,
}

impl SimHost {
    pub fn new(graphics: bool) -> Self {
        Self {
            graphics,
            ..Self::default()
        }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut host = Self::new(scenario.graphics);
        for vessel in &scenario.vessels {
            host.add_vessel(vessel);
        }
        host
    }

    pub fn add_vessel(&mut self, spec: &VesselSpec) -> VesselHandle {
        let handle = VesselHandle(Handle::new(self.vessels.len() as u32, 0));
        let mut vessel = SimVessel {
            name: spec.name.clone(),
            docks: Vec::new(),
            child_attachments: Vec::new(),
            parent_attachments: Vec::new(),
            failing_lookups: false,
        };
        for dock in &spec.docks {
            let anchor = self.new_anchor(dock.pose());
            vessel.docks.push(anchor);
        }
        for att in &spec.child_attachments {
            let anchor = self.new_anchor(att.pose());
            vessel.child_attachments.push(anchor);
        }
        for att in &spec.parent_attachments {
            let anchor = self.new_anchor(att.pose());
            vessel.parent_attachments.push(anchor);
        }
        debug!(
            name = %vessel.name,
            docks = vessel.docks.len(),
            attachments = vessel.child_attachments.len(),
            "sim vessel added"
        );
        self.vessels.push(vessel);
        handle
    }

    pub fn add_dock(&mut self, vessel: VesselHandle, pose: AnchorPose) -> Option<AnchorHandle> {
        let anchor = self.new_anchor(pose);
        let v = self.vessel_mut(vessel)?;
        v.docks.push(anchor);
        Some(AnchorHandle(Handle::new(anchor.id, 0)))
    }

    pub fn remove_dock(&mut self, vessel: VesselHandle, index: usize) -> bool {
        match self.vessel_mut(vessel) {
            Some(v) if index < v.docks.len() => {
                v.docks.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn add_attachment(
        &mut self,
        vessel: VesselHandle,
        parent: bool,
        pose: AnchorPose,
    ) -> Option<AnchorHandle> {
        let anchor = self.new_anchor(pose);
        let v = self.vessel_mut(vessel)?;
        v.attachments_mut(parent).push(anchor);
        Some(AnchorHandle(Handle::new(anchor.id, 0)))
    }

    /// Makes handle lookups on `vessel` return `None` while counts stay
    /// unchanged, as when anchors are removed between the two host calls.
    pub fn set_failing_lookups(&mut self, vessel: VesselHandle, failing: bool) {
        if let Some(v) = self.vessel_mut(vessel) {
            v.failing_lookups = failing;
        }
    }

    /// Makes the camera sink hand out a fresh handle on every setup, even
    /// when the existing camera is still live.
    pub fn set_reissue_cameras(&mut self, reissue: bool) {
        self.reissue_cameras = reissue;
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of create/update calls made to the camera sink.
    pub fn camera_setup_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::CameraCreated(_) | HostCall::CameraUpdated(_)))
            .count()
    }

    pub fn camera(&self, camera: CameraHandle) -> Option<&CameraSetup> {
        self.cameras.get(&camera.0.index())
    }

    pub fn live_cameras(&self) -> usize {
        self.cameras.len()
    }

    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_fonts(&self) -> usize {
        self.fonts.len()
    }

    fn new_anchor(&mut self, pose: AnchorPose) -> SimAnchor {
        let id = self.next_anchor;
        self.next_anchor += 1;
        SimAnchor { id, pose }
    }

    fn next_handle(&mut self) -> Handle {
        let h = Handle::new(self.next_resource, 0);
        self.next_resource += 1;
        h
    }

    fn vessel(&self, vessel: VesselHandle) -> Option<&SimVessel> {
        self.vessels.get(vessel.index() as usize)
    }

    fn vessel_mut(&mut self, vessel: VesselHandle) -> Option<&mut SimVessel> {
        self.vessels.get_mut(vessel.index() as usize)
    }

    fn find_anchor(list: &[SimAnchor], anchor: AnchorHandle) -> Option<AnchorPose> {
        list.iter()
            .find(|a| a.id == anchor.index())
            .map(|a| a.pose)
    }
}

impl VesselQuery for SimHost {
    fn vessel_name(&self, vessel: VesselHandle) -> Option<String> {
        self.vessel(vessel).map(|v| v.name.clone())
    }

    fn attachment_count(&self, vessel: VesselHandle, parent: bool) -> usize {
        self.vessel(vessel).map_or(0, |v| v.attachments(parent).len())
    }

    fn attachment_handle(
        &self,
        vessel: VesselHandle,
        parent: bool,
        index: usize,
    ) -> Option<AnchorHandle> {
        let v = self.vessel(vessel)?;
        if v.failing_lookups {
            return None;
        }
        v.attachments(parent)
            .get(index)
            .map(|a| AnchorHandle(Handle::new(a.id, 0)))
    }

    fn attachment_params(&self, vessel: VesselHandle, anchor: AnchorHandle) -> Option<AnchorPose> {
        let v = self.vessel(vessel)?;
        Self::find_anchor(&v.child_attachments, anchor)
            .or_else(|| Self::find_anchor(&v.parent_attachments, anchor))
    }

    fn dock_count(&self, vessel: VesselHandle) -> usize {
        self.vessel(vessel).map_or(0, |v| v.docks.len())
    }

    fn dock_handle(&self, vessel: VesselHandle, index: usize) -> Option<AnchorHandle> {
        let v = self.vessel(vessel)?;
        if v.failing_lookups {
            return None;
        }
        v.docks.get(index).map(|a| AnchorHandle(Handle::new(a.id, 0)))
    }

    fn dock_params(&self, vessel: VesselHandle, anchor: AnchorHandle) -> Option<AnchorPose> {
        let v = self.vessel(vessel)?;
        Self::find_anchor(&v.docks, anchor)
    }
}

impl VesselDirectory for SimHost {
    fn find_vessel_by_name(&self, name: &str) -> Option<VesselHandle> {
        self.vessels
            .iter()
            .position(|v| v.name == name)
            .map(|i| VesselHandle(Handle::new(i as u32, 0)))
    }
}

impl CameraSink for SimHost {
    fn create_or_update_camera(
        &mut self,
        existing: Option<CameraHandle>,
        setup: &CameraSetup,
    ) -> Option<CameraHandle> {
        if !self.surfaces.contains_key(&setup.surface.0.index()) {
            return None;
        }
        match existing {
            Some(camera)
                if !self.reissue_cameras && self.cameras.contains_key(&camera.0.index()) =>
            {
                self.cameras.insert(camera.0.index(), *setup);
                self.calls.push(HostCall::CameraUpdated(camera));
                Some(camera)
            }
            _ => {
                let camera = CameraHandle(self.next_handle());
                self.cameras.insert(camera.0.index(), *setup);
                self.calls.push(HostCall::CameraCreated(camera));
                Some(camera)
            }
        }
    }

    fn destroy_camera(&mut self, camera: CameraHandle) {
        if self.cameras.remove(&camera.0.index()).is_some() {
            self.calls.push(HostCall::CameraDestroyed(camera));
        }
    }
}

impl Graphics for SimHost {
    fn graphics_available(&self) -> bool {
        self.graphics
    }

    fn create_surface(&mut self, size: SurfaceSize, flags: SurfaceFlags) -> Option<SurfaceHandle> {
        if !self.graphics || size.width == 0 || size.height == 0 {
            return None;
        }
        let surface = SurfaceHandle(self.next_handle());
        self.surfaces.insert(surface.0.index(), (size, flags));
        self.calls.push(HostCall::SurfaceCreated(surface));
        Some(surface)
    }

    fn clear_surface(&mut self, surface: SurfaceHandle) {
        if self.surfaces.contains_key(&surface.0.index()) {
            self.calls.push(HostCall::SurfaceCleared(surface));
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceHandle) {
        let index = surface.0.index();
        if self.surfaces.remove(&index).is_some() {
            // Cameras still pointing at the surface would render into freed memory.
            if self.cameras.values().any(|c| c.surface == surface) {
                tracing::error!(surface = index, "surface destroyed while a camera targets it");
            }
            self.calls.push(HostCall::SurfaceDestroyed(surface));
        }
    }

    fn load_texture(&mut self, path: &str) -> Option<TextureHandle> {
        if !self.graphics || path.is_empty() {
            return None;
        }
        let texture = TextureHandle(self.next_handle());
        self.textures.insert(texture.0.index());
        self.calls
            .push(HostCall::TextureLoaded(texture, path.to_string()));
        Some(texture)
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture.0.index()) {
            self.calls.push(HostCall::TextureReleased(texture));
        }
    }

    fn create_font(&mut self, spec: &FontSpec) -> Option<FontHandle> {
        if spec.height == 0 {
            return None;
        }
        let font = FontHandle(self.next_handle());
        self.fonts.insert(font.0.index());
        self.calls.push(HostCall::FontCreated(font));
        Some(font)
    }

    fn release_font(&mut self, font: FontHandle) {
        if self.fonts.remove(&font.0.index()) {
            self.calls.push(HostCall::FontReleased(font));
        }
    }
}

/// Straight-ahead anchor pose at `z` meters along the vessel axis.
pub fn anchor_at(z: f64) -> AnchorPose {
    AnchorPose::new(Vec3::new(0.0, 0.0, z), Vec3::Z, Vec3::Y)
}
