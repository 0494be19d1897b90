//! Color model shared between the UI layer and host renderers.
//!
//! All colors are linear, premultiplied alpha.

pub mod color;

pub use color::Color;
