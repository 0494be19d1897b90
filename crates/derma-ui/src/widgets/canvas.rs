use std::any::Any;

use crate::widget::{Widget, WidgetBase};

/// A passive widget: draws its primitives and reacts to nothing.
///
/// ```rust,ignore
/// Canvas::new()
///     .at(10.0, 10.0)
///     .draw_rect("health", RectPrimitive::new(100.0, 8.0).color(red))
///     .draw_text("label", TextPrimitive::new("HP", font, 12.0).offset(0.0, -14.0))
/// ```
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    base: WidgetBase,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for Canvas {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn clone_widget(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
