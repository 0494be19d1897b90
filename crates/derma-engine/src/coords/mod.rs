//! Geometry types shared by the UI layer and host renderers.
//!
//! Canonical space:
//! - surface-local pixels
//! - origin top-left
//! - +X right, +Y down

mod corner_radii;
mod rect;
mod vec2;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
