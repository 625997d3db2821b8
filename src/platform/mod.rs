//! Platform abstraction layer
//!
//! Host-side glue that stays out of the simulation:
//! - Input edge detection

pub mod input;

pub use input::{EdgeDetector, HostInput};
