use host::Host;
use runtime::Frame;

use crate::command::{ButtonEvent, Command};
use crate::draw::DrawList;

/// A text prompt the presentation layer should open on the display's behalf.
/// The answer is passed back through [`DisplayMode::handle_text_input`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputRequest {
    pub prompt: &'static str,
    pub max_len: usize,
}

impl InputRequest {
    pub const VESSEL_NAME: Self = Self {
        prompt: "Keyboard Input:",
        max_len: 32,
    };
}

/// Text prompts a mode raises for the presentation layer. Kept apart from
/// [`DisplayMode`] because it never touches the host.
pub trait InputPrompt {
    /// Pending text prompt, if a command asked for one.
    fn take_input_request(&mut self) -> Option<InputRequest> {
        None
    }
}

/// Shared contract for display modes driven by the host's panel.
pub trait DisplayMode<H: Host + ?Sized>: InputPrompt {
    /// Per-frame update: refresh state against the host and produce the draw list.
    fn render(&mut self, host: &mut H, frame: Frame) -> DrawList;

    /// Returns whether the command was handled.
    fn handle_command(&mut self, host: &mut H, command: Command) -> bool;

    fn handle_text_input(&mut self, host: &mut H, text: &str) -> bool;

    /// Releases every host resource the mode owns.
    fn close(self: Box<Self>, host: &mut H);

    fn handle_key(&mut self, host: &mut H, key: char) -> bool {
        match Command::from_key(key) {
            Some(command) => self.handle_command(host, command),
            None => false,
        }
    }

    fn handle_button(&mut self, host: &mut H, index: usize, event: ButtonEvent) -> bool {
        if event != ButtonEvent::Pressed {
            return false;
        }
        match Command::from_button(index) {
            Some(command) => self.handle_command(host, command),
            None => false,
        }
    }
}
