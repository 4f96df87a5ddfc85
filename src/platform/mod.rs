//! Platform abstraction layer
//!
//! Host-side glue between a windowing backend and the simulation:
//! - Input: held keys mapped onto the two players' control schemes
//! - Time: clamped elapsed time between frames

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{ControlScheme, Key, KeyboardState};
