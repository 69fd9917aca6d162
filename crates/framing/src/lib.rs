//! Camera target selection and framing.
//!
//! [`TargetSelector`] holds which vessel is observed, which anchor list is
//! browsed and where in it, plus the offset and field of view. Every command
//! re-resolves the anchor pose through [`pose`] and pushes the result to the
//! host's camera sink.

pub mod config;
pub mod error;
pub mod fov;
pub mod mode;
pub mod pose;
pub mod selector;

pub use config::*;
pub use error::*;
pub use fov::*;
pub use mode::*;
pub use pose::*;
pub use selector::*;
