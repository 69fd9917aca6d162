//! The contract between the camera display and the simulation host.
//!
//! The host owns vessels, attachment points, docking ports and all graphics
//! resources. Everything here is reached through handles and the traits in
//! [`contract`]; nothing is dereferenced directly.

pub mod contract;
pub mod handles;
pub mod sim;
pub mod surface;

pub use contract::*;
pub use handles::*;
pub use surface::*;
