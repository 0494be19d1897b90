//! Fonts and text metrics.
//!
//! The UI never shapes text itself; it asks a [`TextMeasure`] for run
//! extents and records text commands for the host renderer.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, TextMeasure};
