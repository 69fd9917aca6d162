use std::fmt;

use crate::mode::BrowseMode;

/// Reasons a resolution produced no camera update.
///
/// None of these are fatal. The selector stays consistent and the display
/// falls back to a text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// The target has neither attachment points nor docking ports.
    NoFramingTargets,
    /// The host returned no handle for the selected index.
    AnchorLookupFailed { mode: BrowseMode, index: usize },
    UnknownVesselName(String),
    /// No render surface exists for the camera to draw into.
    GraphicsUnavailable,
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramingError::NoFramingTargets => write!(f, "no dock or attachment points"),
            FramingError::AnchorLookupFailed { mode, index } => {
                write!(f, "{} {index} not available", mode.label())
            }
            FramingError::UnknownVesselName(name) => write!(f, "unknown vessel: {name}"),
            FramingError::GraphicsUnavailable => write!(f, "graphics unavailable"),
        }
    }
}

impl std::error::Error for FramingError {}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
