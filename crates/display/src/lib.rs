//! The camera display mode: a panel that shows what a custom camera sees from
//! a chosen dock port or attachment point.

pub mod camera_display;
pub mod command;
pub mod config;
pub mod draw;
pub mod mode;
pub mod registration;
pub mod status;

pub use camera_display::*;
pub use command::*;
pub use config::*;
pub use draw::*;
pub use mode::*;
pub use registration::*;
pub use status::*;
