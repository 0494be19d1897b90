use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Open polyline (line strip).
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    /// At least two points.
    pub points: Vec<Vec2>,
    pub thickness: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a line strip. Fewer than two points records nothing.
    pub fn push_line(&mut self, z: ZIndex, points: Vec<Vec2>, thickness: f32, color: Color) {
        if points.len() < 2 {
            log::trace!("skipping line strip with {} point(s)", points.len());
            return;
        }
        self.push(z, DrawCmd::Line(LineCmd { points, thickness, color }));
    }
}
