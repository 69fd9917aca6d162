/// Discrete commands accepted by the camera display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    CycleAttachmentNext,
    CycleAttachmentPrev,
    CycleDockNext,
    CycleDockPrev,
    NudgeForward,
    NudgeBackward,
    /// Opens the vessel-name prompt; the answer arrives as text input.
    SelectVessel,
    ToggleNightVision,
    ZoomIn,
    ZoomOut,
    ToggleParentFrame,
}

/// One entry of the button column: short label, menu text and the key that
/// triggers the same command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub command: Command,
    pub label: &'static str,
    pub description: &'static str,
    pub key: char,
}

const fn button(
    command: Command,
    label: &'static str,
    description: &'static str,
    key: char,
) -> ButtonSpec {
    ButtonSpec {
        command,
        label,
        description,
        key,
    }
}

pub static BUTTONS: [ButtonSpec; 11] = [
    button(Command::CycleAttachmentNext, "NA", "Next attachment", '1'),
    button(Command::CycleAttachmentPrev, "PA", "Prev attachment", '2'),
    button(Command::CycleDockNext, "ND", "Next dockport", '3'),
    button(Command::CycleDockPrev, "PD", "Prev dockport", '4'),
    button(Command::NudgeForward, "FWD", "Move Forward", '5'),
    button(Command::NudgeBackward, "BWD", "Move Backwards", '6'),
    button(Command::SelectVessel, "VES", "Select Vessel", '7'),
    button(Command::ToggleNightVision, "NV", "Night Vision", '8'),
    button(Command::ZoomIn, "ZM+", "Zoom In", '9'),
    button(Command::ZoomOut, "ZM-", "Zoom Out", '0'),
    button(Command::ToggleParentFrame, "PAR", "Parent Mode", 'B'),
];

/// Pointer event on a display button. Only presses trigger commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
    Held,
    Released,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        BUTTONS.iter().find(|b| b.key == key).map(|b| b.command)
    }

    pub fn from_button(index: usize) -> Option<Self> {
        BUTTONS.get(index).map(|b| b.command)
    }

    pub fn spec(self) -> &'static ButtonSpec {
        // Every command has exactly one button.
        BUTTONS
            .iter()
            .find(|b| b.command == self)
            .unwrap_or(&BUTTONS[0])
    }

    pub fn key(self) -> char {
        self.spec().key
    }
}

pub fn button_label(index: usize) -> Option<&'static str> {
    BUTTONS.get(index).map(|b| b.label)
}

pub fn button_menu() -> &'static [ButtonSpec] {
    &BUTTONS
}

#[cfg(test)]
mod tests {
    use super::{BUTTONS, Command, button_label, button_menu};

    #[test]
    fn keys_map_in_menu_order() {
        let keys: String = button_menu().iter().map(|b| b.key).collect();
        assert_eq!(keys, "1234567890B");
        assert_eq!(Command::from_key('3'), Some(Command::CycleDockNext));
        assert_eq!(Command::from_key('b'), Some(Command::ToggleParentFrame));
        assert_eq!(Command::from_key('X'), None);
    }

    #[test]
    fn labels_stop_after_last_button() {
        assert_eq!(button_label(0), Some("NA"));
        assert_eq!(button_label(10), Some("PAR"));
        assert_eq!(button_label(11), None);
        assert_eq!(Command::from_button(11), None);
    }

    #[test]
    fn every_command_round_trips_through_its_key() {
        for spec in BUTTONS {
            assert_eq!(Command::from_key(spec.key), Some(spec.command));
            assert_eq!(spec.command.key(), spec.key);
        }
    }
}
