use host::SurfaceHandle;

use crate::config::NightVisionParams;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing operations for the presentation layer, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Applies the night-vision render parameters until `EndNightVision`.
    BeginNightVision(NightVisionParams),
    EndNightVision,
    /// Copies `src` of the camera surface to `(x, y)` on the panel.
    Blit {
        surface: SurfaceHandle,
        src: Rect,
        x: i32,
        y: i32,
    },
    FillRect {
        rect: Rect,
        argb: u32,
    },
    Title(String),
    Text {
        x: i32,
        y: i32,
        text: String,
        align: TextAlign,
    },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn text(&mut self, x: i32, y: i32, text: impl Into<String>, align: TextAlign) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            align,
        });
    }

    pub fn title(&self) -> Option<&str> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Text lines (excluding the title) in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_blit(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Blit { .. }))
    }
}
