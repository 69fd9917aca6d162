use framing::{BrowseMode, CameraPose, CycleDirection, FramingError, TargetSelector};
use host::{FontHandle, FontSpec, Host, SurfaceFlags, SurfaceSize, TextureHandle, VesselHandle};
use runtime::{EventBus, Frame, FrameGate, Metrics};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::DisplayConfig;
use crate::draw::{DrawCommand, DrawList, Rect, TextAlign};
use crate::mode::{DisplayMode, InputPrompt, InputRequest};
use crate::status::StatusReadout;

pub const NO_GRAPHICS_MESSAGE: &str = "No Graphics API";
pub const NO_POINTS_MESSAGE: &str = "No Dock/Attachment points";

/// Translucent black behind the header and footer text.
const BAR_ARGB: u32 = 0x8000_0000;
const BAR_HEIGHT: i32 = 25;

pub const EVENT_CAMERA_SETUP: &str = "camera.setup";
pub const EVENT_FRAMING_SKIPPED: &str = "framing.skipped";
pub const EVENT_TARGET_SWITCH: &str = "target.switch";
pub const EVENT_UNKNOWN_VESSEL: &str = "target.unknown";

/// One open camera panel.
///
/// Owns the render surface, the camera, the decorative texture and the
/// overlay font for its whole lifetime and releases them in [`Self::close`].
#[derive(Debug)]
pub struct CameraDisplay {
    config: DisplayConfig,
    width: u32,
    height: u32,
    selector: TargetSelector,
    texture: Option<TextureHandle>,
    font: Option<FontHandle>,
    gate: FrameGate,
    frame: Frame,
    events: EventBus,
    metrics: Metrics,
    pending_input: Option<InputRequest>,
}

impl CameraDisplay {
    /// Opens a panel of `width` x `height` pixels looking at `vessel`.
    ///
    /// Without graphics no surface or texture is created; the panel then only
    /// shows a fallback message.
    pub fn open<H>(
        host: &mut H,
        config: DisplayConfig,
        width: u32,
        height: u32,
        vessel: VesselHandle,
    ) -> Self
    where
        H: Host + ?Sized,
    {
        let font = host.create_font(&FontSpec {
            height: width / config.font_height_divisor.max(1),
            face: config.font_face.clone(),
            bold: true,
            italic: true,
            weight: 450,
        });

        let mut texture = None;
        let mut surface = None;
        if host.graphics_available() {
            texture = host.load_texture(&config.texture_path);
            surface = host.create_surface(
                SurfaceSize::new(width, height),
                SurfaceFlags::camera_view(),
            );
            match surface {
                Some(s) => host.clear_surface(s),
                None => warn!(width, height, "render surface could not be created"),
            }
        } else {
            warn!("{}", FramingError::GraphicsUnavailable);
        }

        let selector = TargetSelector::new(vessel, config.framing)
            .with_surface(surface)
            .with_camera_flags(config.camera_flags);

        let mut display = Self {
            config,
            width,
            height,
            selector,
            texture,
            font,
            gate: FrameGate::new(),
            frame: Frame::new(0, 0.0),
            events: EventBus::new(),
            metrics: Metrics::new(),
            pending_input: None,
        };
        info!(
            vessel = vessel.index(),
            width,
            height,
            graphics = surface.is_some(),
            "camera display opened"
        );

        let initial = display
            .selector
            .select_vessel(host, vessel, BrowseMode::Attachment);
        display.record(initial);
        display
    }

    /// Releases owned resources. The camera goes before the surface it
    /// renders into.
    pub fn close<H>(mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        if let Some(font) = self.font.take() {
            host.release_font(font);
        }
        if let Some(camera) = self.selector.take_camera() {
            host.destroy_camera(camera);
        }
        if let Some(surface) = self.selector.surface() {
            host.destroy_surface(surface);
        }
        if let Some(texture) = self.texture.take() {
            host.release_texture(texture);
        }
        info!(
            camera_updates = self.metrics.counter("camera.updates"),
            "camera display closed"
        );
    }

    pub fn selector(&self) -> &TargetSelector {
        &self.selector
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn status<H>(&self, host: &H) -> StatusReadout
    where
        H: Host + ?Sized,
    {
        StatusReadout::read(&self.selector, host)
    }

    /// Re-resolves at most once per frame.
    pub fn update<H>(&mut self, host: &mut H, frame: Frame)
    where
        H: Host + ?Sized,
    {
        self.frame = frame;
        if !self.gate.try_enter(frame) {
            return;
        }
        match self.selector.refresh(host) {
            Ok(_) => self.metrics.inc_counter("camera.updates", 1),
            Err(_) => self.metrics.inc_counter("framing.skipped", 1),
        }
    }

    fn record(&mut self, result: Result<CameraPose, FramingError>) {
        match result {
            Ok(pose) => {
                self.metrics.inc_counter("camera.updates", 1);
                self.events.emit(
                    self.frame,
                    EVENT_CAMERA_SETUP,
                    format!(
                        "{}({}) at {:?}",
                        self.selector.mode().label(),
                        self.selector.index(),
                        pose.pose.position
                    ),
                );
            }
            Err(err) => {
                self.metrics.inc_counter("framing.skipped", 1);
                self.events
                    .emit(self.frame, EVENT_FRAMING_SKIPPED, err.to_string());
            }
        }
        self.metrics
            .set_gauge("selection.index", self.selector.index() as i64);
    }

    fn draw<H>(&self, host: &H) -> DrawList
    where
        H: Host + ?Sized,
    {
        let mut list = DrawList::new();
        let (w, h) = (self.width as i32, self.height as i32);

        let Some(surface) = self.selector.surface() else {
            list.text(w / 2, h / 2, NO_GRAPHICS_MESSAGE, TextAlign::Center);
            return list;
        };

        let night_vision = self.selector.night_vision();
        if night_vision {
            list.push(DrawCommand::BeginNightVision(self.config.night_vision));
        }
        list.push(DrawCommand::Blit {
            surface,
            src: Rect::new(0, 0, w - 2, h - 2),
            x: 1,
            y: 1,
        });
        if night_vision {
            list.push(DrawCommand::EndNightVision);
        }

        let status = StatusReadout::read(&self.selector, host);
        if !status.has_targets {
            list.text(w / 2, h / 2, NO_POINTS_MESSAGE, TextAlign::Center);
            return list;
        }

        list.push(DrawCommand::FillRect {
            rect: Rect::new(1, 1, w - 1, BAR_HEIGHT),
            argb: BAR_ARGB,
        });
        list.push(DrawCommand::FillRect {
            rect: Rect::new(1, h - BAR_HEIGHT, w - 1, h - 1),
            argb: BAR_ARGB,
        });
        list.push(DrawCommand::Title(status.title()));
        list.text(10, h - BAR_HEIGHT, status.footer(), TextAlign::Left);
        list
    }
}

impl<H: Host + ?Sized> DisplayMode<H> for CameraDisplay {
    fn render(&mut self, host: &mut H, frame: Frame) -> DrawList {
        self.update(host, frame);
        self.draw(&*host)
    }

    fn handle_command(&mut self, host: &mut H, command: Command) -> bool {
        let step_m = self.config.framing.nudge_step_m;
        let zoom_deg = self.config.framing.zoom_step_deg;
        let result = match command {
            Command::CycleAttachmentNext => {
                self.selector
                    .cycle(host, BrowseMode::Attachment, CycleDirection::Next)
            }
            Command::CycleAttachmentPrev => {
                self.selector
                    .cycle(host, BrowseMode::Attachment, CycleDirection::Prev)
            }
            Command::CycleDockNext => {
                self.selector
                    .cycle(host, BrowseMode::Dock, CycleDirection::Next)
            }
            Command::CycleDockPrev => {
                self.selector
                    .cycle(host, BrowseMode::Dock, CycleDirection::Prev)
            }
            Command::NudgeForward => self.selector.nudge(host, step_m),
            Command::NudgeBackward => self.selector.nudge(host, -step_m),
            Command::ZoomIn => self.selector.set_field_of_view(host, -zoom_deg),
            Command::ZoomOut => self.selector.set_field_of_view(host, zoom_deg),
            Command::ToggleParentFrame => self.selector.toggle_parent_frame(host),
            Command::SelectVessel => {
                self.pending_input = Some(InputRequest::VESSEL_NAME);
                return true;
            }
            Command::ToggleNightVision => {
                let on = self.selector.toggle_night_vision();
                debug!(on, "night vision toggled");
                return true;
            }
        };
        debug!(?command, ok = result.is_ok(), "command handled");
        self.record(result);
        true
    }

    fn handle_text_input(&mut self, host: &mut H, text: &str) -> bool {
        let before = self.selector.target();
        if !self.selector.select_target_by_name(host, text) {
            self.events.emit(self.frame, EVENT_UNKNOWN_VESSEL, text.to_string());
            return false;
        }
        if self.selector.target() != before {
            self.events.emit(self.frame, EVENT_TARGET_SWITCH, text.to_string());
        }
        let outcome = match self.selector.last_outcome() {
            framing::Outcome::Framed(pose) => Ok(*pose),
            framing::Outcome::Skipped(err) => Err(err.clone()),
            framing::Outcome::Pending => return true,
        };
        self.record(outcome);
        true
    }

    fn close(self: Box<Self>, host: &mut H) {
        CameraDisplay::close(*self, host);
    }
}

impl InputPrompt for CameraDisplay {
    fn take_input_request(&mut self) -> Option<InputRequest> {
        self.pending_input.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CameraDisplay, EVENT_TARGET_SWITCH, EVENT_UNKNOWN_VESSEL, NO_GRAPHICS_MESSAGE,
        NO_POINTS_MESSAGE,
    };
    use crate::command::{ButtonEvent, Command};
    use crate::config::DisplayConfig;
    use crate::draw::DrawCommand;
    use crate::mode::{DisplayMode, InputPrompt, InputRequest};
    use framing::BrowseMode;
    use host::VesselHandle;
    use host::sim::{HostCall, SimHost, VesselSpec, anchor_at};
    use pretty_assertions::assert_eq;
    use runtime::Frame;

    fn station(host: &mut SimHost, name: &str, docks: usize) -> VesselHandle {
        let v = host.add_vessel(&VesselSpec::named(name));
        for i in 0..docks {
            host.add_dock(v, anchor_at(i as f64));
        }
        v
    }

    fn open(host: &mut SimHost, vessel: VesselHandle) -> CameraDisplay {
        CameraDisplay::open(host, DisplayConfig::default(), 256, 200, vessel)
    }

    #[test]
    fn open_creates_resources_and_frames_initial_target() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 3);
        let display = open(&mut host, v);

        assert_eq!(host.live_fonts(), 1);
        assert_eq!(host.live_textures(), 1);
        assert_eq!(host.live_surfaces(), 1);
        assert_eq!(host.live_cameras(), 1);
        assert_eq!(display.selector().mode(), BrowseMode::Dock);
        assert_eq!(display.metrics().counter("camera.updates"), 1);
        assert!(matches!(
            host.calls(),
            [
                HostCall::FontCreated(_),
                HostCall::TextureLoaded(_, path),
                HostCall::SurfaceCreated(_),
                HostCall::SurfaceCleared(_),
                HostCall::CameraCreated(_),
            ] if path == "DG/dg_instr.dds"
        ));
    }

    #[test]
    fn close_destroys_camera_before_surface() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 1);
        let display = open(&mut host, v);
        host.clear_calls();

        display.close(&mut host);

        let camera_at = host
            .calls()
            .iter()
            .position(|c| matches!(c, HostCall::CameraDestroyed(_)))
            .unwrap();
        let surface_at = host
            .calls()
            .iter()
            .position(|c| matches!(c, HostCall::SurfaceDestroyed(_)))
            .unwrap();
        assert!(camera_at < surface_at);
        assert_eq!(host.live_cameras(), 0);
        assert_eq!(host.live_surfaces(), 0);
        assert_eq!(host.live_textures(), 0);
        assert_eq!(host.live_fonts(), 0);
    }

    #[test]
    fn render_shows_title_and_footer() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 3);
        let mut display = open(&mut host, v);

        assert!(display.handle_key(&mut host, '3'));
        assert!(display.handle_key(&mut host, '5'));
        let list = display.render(&mut host, Frame::new(1, 0.02));

        assert!(list.has_blit());
        assert_eq!(list.title(), Some("Viewing Station Dock(1)"));
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["[Child] FOV=60\u{b0} Ofs=0.10[m]"]);
    }

    #[test]
    fn render_refreshes_once_per_frame() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 1);
        let mut display = open(&mut host, v);
        let before = host.camera_setup_count();

        let frame = Frame::new(5, 0.02);
        display.render(&mut host, frame);
        display.render(&mut host, frame);
        assert_eq!(host.camera_setup_count(), before + 1);
        display.render(&mut host, frame.next());
        assert_eq!(host.camera_setup_count(), before + 2);
    }

    #[test]
    fn empty_vessel_shows_fallback_for_every_command() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Debris", 0);
        let mut display = open(&mut host, v);

        for key in ['1', '2', '3', '4', '5', '6', '9', '0', 'B'] {
            assert!(display.handle_key(&mut host, key));
        }
        let list = display.render(&mut host, Frame::new(1, 0.02));
        assert_eq!(host.camera_setup_count(), 0);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec![NO_POINTS_MESSAGE]);
        assert!(!display.status(&host).has_targets);
    }

    #[test]
    fn no_graphics_renders_message_only() {
        let mut host = SimHost::new(false);
        let v = station(&mut host, "Station", 2);
        let mut display = open(&mut host, v);
        assert!(display.handle_key(&mut host, '3'));

        let list = display.render(&mut host, Frame::new(1, 0.02));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec![NO_GRAPHICS_MESSAGE]);
        assert!(!list.has_blit());
        assert_eq!(host.live_surfaces(), 0);
        assert_eq!(host.live_cameras(), 0);

        display.close(&mut host);
        assert_eq!(host.live_fonts(), 0);
    }

    #[test]
    fn night_vision_wraps_the_blit() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 1);
        let mut display = open(&mut host, v);
        assert!(display.handle_key(&mut host, '8'));

        let list = display.render(&mut host, Frame::new(1, 0.02));
        assert!(matches!(
            list.commands.as_slice(),
            [
                DrawCommand::BeginNightVision(_),
                DrawCommand::Blit { x: 1, y: 1, .. },
                DrawCommand::EndNightVision,
                ..
            ]
        ));
    }

    #[test]
    fn select_vessel_prompts_then_switches_by_name() {
        let mut host = SimHost::new(true);
        let a = station(&mut host, "Station", 2);
        let b = station(&mut host, "Tug", 1);
        let mut display = open(&mut host, a);

        assert!(display.handle_button(&mut host, 6, ButtonEvent::Pressed));
        assert_eq!(display.take_input_request(), Some(InputRequest::VESSEL_NAME));
        assert_eq!(display.take_input_request(), None);

        assert!(!display.handle_text_input(&mut host, "nonexistent"));
        assert_eq!(display.selector().target(), a);
        assert_eq!(display.events().count_kind(EVENT_UNKNOWN_VESSEL), 1);

        assert!(display.handle_text_input(&mut host, "Tug"));
        assert_eq!(display.selector().target(), b);
        assert_eq!(display.events().count_kind(EVENT_TARGET_SWITCH), 1);
        assert_eq!(host.live_cameras(), 1);
    }

    #[test]
    fn buttons_act_only_on_press() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 3);
        let mut display = open(&mut host, v);

        assert!(!display.handle_button(&mut host, 2, ButtonEvent::Released));
        assert_eq!(display.selector().index(), 0);
        assert!(display.handle_button(&mut host, 2, ButtonEvent::Pressed));
        assert_eq!(display.selector().index(), 1);
        assert!(!display.handle_button(&mut host, 11, ButtonEvent::Pressed));
        assert!(!display.handle_key(&mut host, 'X'));
    }

    #[test]
    fn zoom_commands_use_configured_step() {
        let mut host = SimHost::new(true);
        let v = station(&mut host, "Station", 1);
        let mut display = open(&mut host, v);
        for _ in 0..6 {
            assert!(display.handle_command(&mut host, Command::ZoomOut));
        }
        assert_eq!(display.status(&host).fov_full_deg, 120.0);
        for _ in 0..20 {
            display.handle_command(&mut host, Command::ZoomOut);
        }
        assert_eq!(display.status(&host).fov_full_deg, 140.0);
    }
}
