use std::any::Any;

use derma_engine::coords::{Rect, Vec2};
use derma_engine::input::MouseButton;
use derma_engine::paint::Color;

use crate::callback::Callback;
use crate::painter::Painter;
use crate::widget::{UpdateCtx, Widget, WidgetBase};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum HandleState {
    #[default]
    Normal,
    Hover,
    Dragging,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    /// Top of the track is `max`.
    Vertical,
}

/// A draggable value selector.
///
/// Clicking the track jumps to the clicked value and starts a drag; grabbing
/// the handle keeps the grab offset so the handle does not snap to the cursor.
///
/// # Example
/// ```rust,ignore
/// Slider::new(0.0, 255.0)
///     .step(1.0)
///     .track_size(150.0, 6.0)
///     .on_change(|v| println!("red: {v}"))
/// ```
#[derive(Debug)]
pub struct Slider {
    base: WidgetBase,
    value: f32,
    min: f32,
    max: f32,
    /// 0 = continuous.
    step: f32,
    orientation: Orientation,
    state: HandleState,
    /// Cursor minus handle center along the track axis, captured on grab.
    drag_offset: f32,

    track_size: Vec2,
    track_offset: Vec2,
    track_color: Color,
    track_radius: f32,

    fill_visible: bool,
    fill_color: Color,

    handle_size: Vec2,
    handle_rounded: bool,
    handle_colors: [Color; 3],

    on_change: Option<Callback<f32>>,
}

impl Slider {
    /// A slider over `[min, max]` starting at `min`. Reversed bounds are swapped.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            base: WidgetBase::default(),
            value: min,
            min,
            max,
            step: 0.0,
            orientation: Orientation::Horizontal,
            state: HandleState::Normal,
            drag_offset: 0.0,
            track_size: Vec2::new(150.0, 4.0),
            track_offset: Vec2::zero(),
            track_color: Color::from_straight(0.15, 0.2, 0.3, 1.0),
            track_radius: 2.0,
            fill_visible: true,
            fill_color: Color::from_straight(0.2, 0.6, 1.0, 1.0),
            handle_size: Vec2::new(12.0, 12.0),
            handle_rounded: true,
            handle_colors: [
                Color::WHITE,
                Color::from_straight(0.9, 0.95, 1.0, 1.0),
                Color::from_straight(0.7, 0.85, 1.0, 1.0),
            ],
            on_change: None,
        }
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn value(mut self, v: f32) -> Self {
        self.set_value(v);
        self
    }

    pub fn step(mut self, step: f32) -> Self {
        self.step = step.max(0.0);
        self
    }

    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    pub fn track_size(mut self, w: f32, h: f32) -> Self {
        self.track_size = Vec2::new(w, h);
        self
    }

    pub fn track_offset(mut self, x: f32, y: f32) -> Self {
        self.track_offset = Vec2::new(x, y);
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    pub fn track_radius(mut self, radius: f32) -> Self {
        self.track_radius = radius;
        self
    }

    pub fn fill(mut self, visible: bool, color: Color) -> Self {
        self.fill_visible = visible;
        self.fill_color = color;
        self
    }

    pub fn handle_size(mut self, w: f32, h: f32) -> Self {
        self.handle_size = Vec2::new(w, h);
        self
    }

    pub fn handle_rounded(mut self, rounded: bool) -> Self {
        self.handle_rounded = rounded;
        self
    }

    /// Handle color for Normal, Hover and Dragging.
    pub fn handle_colors(mut self, normal: Color, hover: Color, dragging: Color) -> Self {
        self.handle_colors = [normal, hover, dragging];
        self
    }

    /// Fires with the new value whenever a drag or track click changes it.
    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn get_value(&self) -> f32 {
        self.value
    }

    /// Sets the value, clamped to the range. Does not snap or notify.
    pub fn set_value(&mut self, v: f32) {
        if v.is_finite() {
            self.value = v.clamp(self.min, self.max);
        }
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// `value` mapped to `[0, 1]`; 0 for an empty range.
    pub fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span > 0.0 { (self.value - self.min) / span } else { 0.0 }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    fn track_rect(&self, origin: Vec2) -> Rect {
        Rect::from_origin_size(origin + self.base.position + self.track_offset, self.track_size)
    }

    fn handle_center(&self, track: Rect) -> Vec2 {
        let t = self.normalized();
        let along = match self.orientation {
            Orientation::Horizontal => Vec2::new(t * track.size.x, track.size.y * 0.5),
            Orientation::Vertical => Vec2::new(track.size.x * 0.5, (1.0 - t) * track.size.y),
        };
        track.origin + along
    }

    fn handle_rect(&self, track: Rect) -> Rect {
        let center = self.handle_center(track);
        Rect::from_origin_size(center - self.handle_size * 0.5, self.handle_size)
    }

    /// Track area widened on the cross axis to the handle's thickness.
    fn track_hit_rect(&self, track: Rect) -> Rect {
        match self.orientation {
            Orientation::Horizontal => {
                let h = track.size.y.max(self.handle_size.y);
                let y = track.origin.y + (track.size.y - h) * 0.5;
                Rect::new(track.origin.x, y, track.size.x, h)
            }
            Orientation::Vertical => {
                let w = track.size.x.max(self.handle_size.x);
                let x = track.origin.x + (track.size.x - w) * 0.5;
                Rect::new(x, track.origin.y, w, track.size.y)
            }
        }
    }

    fn axis(&self, v: Vec2) -> f32 {
        match self.orientation {
            Orientation::Horizontal => v.x,
            Orientation::Vertical => v.y,
        }
    }

    /// Value under an axis coordinate: clamped, inverted when vertical, snapped.
    fn value_at(&self, track: Rect, axis_pos: f32) -> f32 {
        let len = self.axis(track.size);
        let start = self.axis(track.origin);
        let mut t = if len > 0.0 { ((axis_pos - start) / len).clamp(0.0, 1.0) } else { 0.0 };
        if self.orientation == Orientation::Vertical {
            t = 1.0 - t;
        }
        self.snap(self.min + t * (self.max - self.min))
    }

    fn snap(&self, v: f32) -> f32 {
        if self.step <= 0.0 {
            return v.clamp(self.min, self.max);
        }
        let max_steps = ((self.max - self.min) / self.step).floor();
        let n = ((v - self.min) / self.step).round().clamp(0.0, max_steps);
        self.min + n * self.step
    }

    fn apply(&mut self, v: f32) {
        if v == self.value {
            return;
        }
        self.value = v;
        if let Some(cb) = &self.on_change {
            cb.call(v);
        }
    }
}

impl Clone for Slider {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            state: HandleState::Normal,
            drag_offset: 0.0,
            on_change: self.on_change.clone(),
            ..*self
        }
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &UpdateCtx<'_>, origin: Vec2) {
        let track = self.track_rect(origin);
        let cursor = ctx.cursor();
        let handle = self.handle_rect(track);

        if self.state == HandleState::Dragging {
            if ctx.input.left {
                // Off-surface pointer: hold the value until it comes back.
                if ctx.pointer().is_some() {
                    let v = self.value_at(track, self.axis(cursor) - self.drag_offset);
                    self.apply(v);
                }
                return;
            }
            self.state = if ctx.hovers(handle) { HandleState::Hover } else { HandleState::Normal };
            log::trace!("slider drag ended at {}", self.value);
            return;
        }

        if ctx.pressed(MouseButton::Left) {
            if ctx.hovers(handle) {
                self.drag_offset = self.axis(cursor) - self.axis(self.handle_center(track));
                self.state = HandleState::Dragging;
                return;
            }
            if ctx.hovers(self.track_hit_rect(track)) {
                self.drag_offset = 0.0;
                self.state = HandleState::Dragging;
                let v = self.value_at(track, self.axis(cursor));
                self.apply(v);
                return;
            }
        }
        self.state = if ctx.hovers(handle) { HandleState::Hover } else { HandleState::Normal };
    }

    fn render(&self, painter: &mut Painter<'_>, origin: Vec2) {
        painter.draw_registry(origin + self.base.position, &self.base.primitives, None);

        let track = self.track_rect(origin);
        painter.rect(track, self.track_radius, self.track_color, None);

        if self.fill_visible {
            let t = self.normalized();
            let fill = match self.orientation {
                Orientation::Horizontal => {
                    Rect::from_origin_size(track.origin, Vec2::new(track.size.x * t, track.size.y))
                }
                Orientation::Vertical => {
                    let h = track.size.y * t;
                    Rect::new(track.origin.x, track.max().y - h, track.size.x, h)
                }
            };
            if !fill.is_empty() {
                painter.rect(fill, self.track_radius, self.fill_color, None);
            }
        }

        let handle = self.handle_rect(track);
        let radius = if self.handle_rounded { handle.size.x.min(handle.size.y) * 0.5 } else { 0.0 };
        let color = match self.state {
            HandleState::Normal => self.handle_colors[0],
            HandleState::Hover => self.handle_colors[1],
            HandleState::Dragging => self.handle_colors[2],
        };
        painter.rect(handle, radius, color, None);
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
