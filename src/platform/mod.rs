//! Platform abstraction layer
//!
//! Wall-clock concerns the simulation itself never touches:
//! - Frame pacing for the external scheduler

pub mod time;

pub use time::FramePacer;
