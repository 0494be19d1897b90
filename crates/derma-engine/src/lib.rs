//! Derma engine crate.
//!
//! Holds the platform-agnostic pieces the UI layer builds on: geometry,
//! colors, the per-frame input snapshot, the recorded draw stream handed to
//! host renderers, and font metrics. Nothing in here talks to a window or a GPU.

pub mod coords;
pub mod input;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
