use std::any::Any;

use derma_engine::coords::Vec2;
use derma_engine::paint::Color;

use crate::callback::Callback;
use crate::painter::Painter;
use crate::widget::{UpdateCtx, Widget, WidgetBase};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PressState {
    #[default]
    Normal,
    Hover,
    Pressed,
}

/// A clickable widget.
///
/// Its rect and texture primitives are tinted by the color configured for the
/// current [`PressState`], so one declared background reflects hover and
/// press without being re-registered.
///
/// # Example
/// ```rust,ignore
/// Button::new()
///     .at(100.0, 100.0)
///     .size(50.0, 20.0)
///     .draw_rect("bg", RectPrimitive::new(50.0, 20.0))
///     .colors(grey, light_grey, dark_grey)
///     .on_press(|| println!("saved!"))
/// ```
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    state: PressState,
    was_pressed: bool,
    normal: Color,
    hover: Color,
    pressed: Color,
    on_press: Option<Callback<()>>,
}

impl Button {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::default(),
            state: PressState::Normal,
            was_pressed: false,
            normal: Color::WHITE,
            hover: Color::from_straight(0.85, 0.85, 0.85, 1.0),
            pressed: Color::from_straight(0.65, 0.65, 0.65, 1.0),
            on_press: None,
        }
    }

    /// Tint for Normal, Hover and Pressed.
    pub fn colors(mut self, normal: Color, hover: Color, pressed: Color) -> Self {
        self.normal = normal;
        self.hover = hover;
        self.pressed = pressed;
        self
    }

    pub fn on_press(mut self, mut f: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Callback::new(move |()| f()));
        self
    }

    /// Reuses an existing handler, e.g. one shared by several buttons.
    pub fn on_press_callback(mut self, cb: Callback<()>) -> Self {
        self.on_press = Some(cb);
        self
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn state_color(&self) -> Color {
        match self.state {
            PressState::Normal => self.normal,
            PressState::Hover => self.hover,
            PressState::Pressed => self.pressed,
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Button {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            state: PressState::Normal,
            was_pressed: false,
            normal: self.normal,
            hover: self.hover,
            pressed: self.pressed,
            on_press: self.on_press.clone(),
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &UpdateCtx<'_>, origin: Vec2) {
        let hovered = ctx.hovers(self.base.bounds(origin));
        let left = ctx.input.left;

        match (hovered, left) {
            (true, true) => {
                self.state = PressState::Pressed;
                self.was_pressed = true;
            }
            (true, false) => {
                if self.was_pressed {
                    self.was_pressed = false;
                    if let Some(cb) = &self.on_press {
                        cb.call(());
                    }
                }
                self.state = PressState::Hover;
            }
            (false, held) => {
                self.state = PressState::Normal;
                // Dragging out while held keeps the latch until release.
                if !held {
                    self.was_pressed = false;
                }
            }
        }
    }

    fn render(&self, painter: &mut Painter<'_>, origin: Vec2) {
        painter.draw_registry(origin + self.base.position, &self.base.primitives, Some(self.state_color()));
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
