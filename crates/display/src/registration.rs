use std::fmt;
use std::sync::{Mutex, PoisonError};

use host::{Host, VesselHandle};
use once_cell::sync::Lazy;
use tracing::info;

use crate::camera_display::CameraDisplay;
use crate::config::DisplayConfig;
use crate::mode::DisplayMode;

/// How a display mode is offered to the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeSpec {
    pub name: &'static str,
    /// Mode selection key.
    pub key: char,
}

pub const CAMERA_MODE: ModeSpec = ModeSpec {
    name: "Generic Camera",
    key: 'C',
};

/// Identifier handed out on registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ModeId(u32);

impl ModeId {
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    AlreadyRegistered(ModeId),
    NotRegistered,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::AlreadyRegistered(id) => {
                write!(f, "display mode already registered as {}", id.0)
            }
            RegistrationError::NotRegistered => write!(f, "display mode not registered"),
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Holds at most one registered mode. Ids are never reused within a process.
#[derive(Debug, Default)]
pub struct ModeRegistry {
    next_id: u32,
    active: Option<(ModeId, ModeSpec)>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: ModeSpec) -> Result<ModeId, RegistrationError> {
        if let Some((id, _)) = self.active {
            return Err(RegistrationError::AlreadyRegistered(id));
        }
        self.next_id += 1;
        let id = ModeId(self.next_id);
        self.active = Some((id, spec));
        Ok(id)
    }

    pub fn unregister(&mut self, id: ModeId) -> Result<ModeSpec, RegistrationError> {
        match self.active {
            Some((active, spec)) if active == id => {
                self.active = None;
                Ok(spec)
            }
            _ => Err(RegistrationError::NotRegistered),
        }
    }

    pub fn active(&self) -> Option<(ModeId, ModeSpec)> {
        self.active
    }
}

static REGISTRY: Lazy<Mutex<ModeRegistry>> = Lazy::new(|| Mutex::new(ModeRegistry::new()));

/// Registers the camera mode for this process. Called once on module load.
pub fn init_module() -> Result<ModeId, RegistrationError> {
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    let id = registry.register(CAMERA_MODE)?;
    info!(mode = CAMERA_MODE.name, id = id.get(), "display mode registered");
    Ok(id)
}

/// Unregisters the camera mode on module unload.
pub fn exit_module() -> Result<(), RegistrationError> {
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    let (id, _) = registry.active().ok_or(RegistrationError::NotRegistered)?;
    registry.unregister(id)?;
    info!(id = id.get(), "display mode unregistered");
    Ok(())
}

pub fn registered_mode() -> Option<ModeId> {
    REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .active()
        .map(|(id, _)| id)
}

/// Creates the display instance when the host opens the mode on a panel.
pub fn open_mode<H>(
    host: &mut H,
    config: DisplayConfig,
    width: u32,
    height: u32,
    vessel: VesselHandle,
) -> Box<dyn DisplayMode<H>>
where
    H: Host + ?Sized,
{
    Box::new(CameraDisplay::open(host, config, width, height, vessel))
}

#[cfg(test)]
mod tests {
    use super::{
        CAMERA_MODE, ModeRegistry, RegistrationError, exit_module, init_module, open_mode,
        registered_mode,
    };
    use crate::config::DisplayConfig;
    use crate::mode::{InputPrompt, InputRequest};
    use host::sim::{SimHost, VesselSpec, anchor_at};
    use runtime::Frame;

    #[test]
    fn double_registration_is_rejected() {
        let mut registry = ModeRegistry::new();
        let id = registry.register(CAMERA_MODE).unwrap();
        assert_eq!(
            registry.register(CAMERA_MODE),
            Err(RegistrationError::AlreadyRegistered(id))
        );
        assert_eq!(registry.unregister(id), Ok(CAMERA_MODE));
        assert_eq!(registry.unregister(id), Err(RegistrationError::NotRegistered));

        let again = registry.register(CAMERA_MODE).unwrap();
        assert_ne!(again, id);
    }

    // The only test touching the process-wide registry.
    #[test]
    fn module_lifecycle() {
        let id = init_module().unwrap();
        assert_eq!(registered_mode(), Some(id));
        assert!(matches!(
            init_module(),
            Err(RegistrationError::AlreadyRegistered(_))
        ));
        exit_module().unwrap();
        assert_eq!(registered_mode(), None);
        assert_eq!(exit_module(), Err(RegistrationError::NotRegistered));
    }

    #[test]
    fn opened_mode_is_driven_through_the_trait() {
        let mut host = SimHost::new(true);
        let v = host.add_vessel(&VesselSpec::named("Station"));
        host.add_dock(v, anchor_at(0.0));
        host.add_dock(v, anchor_at(1.0));

        let mut mode = open_mode(&mut host, DisplayConfig::default(), 128, 128, v);
        assert!(mode.handle_key(&mut host, '3'));
        let list = mode.render(&mut host, Frame::new(1, 0.02));
        assert_eq!(list.title(), Some("Viewing Station Dock(1)"));

        assert!(mode.handle_key(&mut host, '7'));
        assert_eq!(mode.take_input_request(), Some(InputRequest::VESSEL_NAME));
        assert!(!mode.handle_text_input(&mut host, "Nowhere"));

        mode.close(&mut host);
        assert_eq!(host.live_cameras(), 0);
        assert_eq!(host.live_surfaces(), 0);
    }
}
