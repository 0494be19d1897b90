use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use derma_engine::coords::{Rect, Vec2};
use derma_engine::input::{Key, MouseButton};
use derma_engine::paint::Color;
use derma_engine::text::{FontId, TextMeasure};

use crate::callback::Callback;
use crate::error::UiResult;
use crate::painter::Painter;
use crate::primitive::{Align, HAlign, PrimitiveKind, RectPrimitive, TextPrimitive};
use crate::widget::{UpdateCtx, Widget, WidgetBase};

use super::text_edit::TextEditState;

/// Default caret blink half-period.
pub const DEFAULT_BLINK: Duration = Duration::from_millis(500);

const TEXT_ID: &str = "text";
const BACKGROUND_ID: &str = "background";
const PADDING: f32 = 4.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Hover,
    Focused,
}

/// Writes the parsed textbox content through to a shared number, clamped.
#[derive(Debug, Clone)]
pub enum NumericBinding {
    Int { target: Rc<Cell<i64>>, min: i64, max: i64 },
    Float { target: Rc<Cell<f64>>, min: f64, max: f64 },
}

impl NumericBinding {
    /// Parses `text` and stores the clamped value. Returns the canonical text
    /// when clamping changed the value; `None` when unchanged or unparsable.
    fn apply(&self, text: &str) -> Option<String> {
        match self {
            NumericBinding::Int { target, min, max } => {
                let v: i64 = text.parse().ok()?;
                let clamped = v.clamp(*min, *max);
                target.set(clamped);
                (clamped != v).then(|| clamped.to_string())
            }
            NumericBinding::Float { target, min, max } => {
                let v: f64 = text.parse().ok().filter(|v: &f64| v.is_finite())?;
                let clamped = v.clamp(*min, *max);
                target.set(clamped);
                (clamped != v).then(|| clamped.to_string())
            }
        }
    }
}

/// Single-line text input.
///
/// The text is mirrored into one of the widget's Text primitives (the
/// "editable" primitive, id `"text"` by default), which supplies font, size,
/// color and placement. Other primitives draw as decoration behind it.
///
/// The primitive's alignment places the text while it fits the box; longer
/// text is laid out from the left edge and scrolls with the caret.
///
/// # Example
/// ```rust,ignore
/// let volume = Rc::new(Cell::new(50));
/// Textbox::new(font, 14.0, 120.0, 24.0)
///     .at(10.0, 40.0)
///     .placeholder("volume")
///     .numeric_int(volume.clone(), 0, 100)
///     .on_enter(|text| println!("submitted {text}"))
/// ```
#[derive(Debug)]
pub struct Textbox {
    base: WidgetBase,
    edit: TextEditState,
    editable: String,
    placeholder: String,
    state: FocusState,

    blink_interval: Duration,
    blink_epoch: Instant,
    now: Instant,

    placeholder_color: Color,
    selection_color: Color,
    caret_color: Color,

    numeric: Option<NumericBinding>,
    on_change: Option<Callback<String>>,
    on_enter: Option<Callback<String>>,
}

impl Textbox {
    /// A `w`×`h` box with a default background and left-aligned editable text.
    pub fn new(font: FontId, font_size: f32, w: f32, h: f32) -> Self {
        let mut base = WidgetBase { size: Vec2::new(w, h), ..WidgetBase::default() };
        base.primitives.upsert_rect(
            BACKGROUND_ID,
            RectPrimitive::new(w, h)
                .color(Color::from_straight(0.08, 0.08, 0.1, 1.0))
                .outline(1.0, Color::from_straight(0.4, 0.4, 0.45, 1.0))
                .rounded(3.0)
                .z(-1),
        );
        base.primitives.upsert_text(
            TEXT_ID,
            TextPrimitive::new("", font, font_size).align(Align::CENTER_LEFT).offset(PADDING, h * 0.5),
        );

        let now = Instant::now();
        Self {
            base,
            edit: TextEditState::new(""),
            editable: TEXT_ID.to_string(),
            placeholder: String::new(),
            state: FocusState::Normal,
            blink_interval: DEFAULT_BLINK,
            blink_epoch: now,
            now,
            placeholder_color: Color::from_straight(1.0, 1.0, 1.0, 0.4),
            selection_color: Color::from_straight(0.2, 0.45, 0.9, 0.5),
            caret_color: Color::WHITE,
            numeric: None,
            on_change: None,
            on_enter: None,
        }
    }

    // ── builder ───────────────────────────────────────────────────────────

    /// Initial text. Does not fire callbacks.
    pub fn value(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Binds a different registered Text primitive as the editable one.
    pub fn editable(mut self, id: &str) -> UiResult<Self> {
        self.bind_editable(id)?;
        Ok(self)
    }

    pub fn blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    pub fn colors(mut self, placeholder: Color, selection: Color, caret: Color) -> Self {
        self.placeholder_color = placeholder;
        self.selection_color = selection;
        self.caret_color = caret;
        self
    }

    pub fn numeric_int(mut self, target: Rc<Cell<i64>>, min: i64, max: i64) -> Self {
        self.numeric = Some(NumericBinding::Int { target, min: min.min(max), max: max.max(min) });
        self
    }

    pub fn numeric_float(mut self, target: Rc<Cell<f64>>, min: f64, max: f64) -> Self {
        self.numeric = Some(NumericBinding::Float { target, min: min.min(max), max: max.max(min) });
        self
    }

    pub fn on_change(mut self, f: impl FnMut(String) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    pub fn on_enter(mut self, f: impl FnMut(String) + 'static) -> Self {
        self.on_enter = Some(Callback::new(f));
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.edit.text
    }

    /// Replaces the content and moves the caret to the end. Does not fire callbacks.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.edit.set_text(text);
        self.sync_primitive();
    }

    /// Caret position in chars.
    pub fn cursor(&self) -> usize {
        self.edit.cursor_chars()
    }

    /// Selected char range `[start, end)`; empty when nothing is selected.
    pub fn selection(&self) -> (usize, usize) {
        let (lo, hi) = self.edit.selection();
        let t = &self.edit.text;
        (t[..lo].chars().count(), t[..hi].chars().count())
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_focused(&self) -> bool {
        self.state == FocusState::Focused
    }

    pub fn scroll_offset(&self) -> f32 {
        self.edit.scroll_offset
    }

    /// Re-targets the editable primitive. Fails if no Text primitive has `id`.
    pub fn bind_editable(&mut self, id: &str) -> UiResult<()> {
        let content = self.base.primitives.text(id)?.content().to_string();
        self.editable = id.to_string();
        self.edit.set_text(content);
        Ok(())
    }

    /// Caret is drawn this frame.
    pub fn caret_visible(&self) -> bool {
        if !self.is_focused() {
            return false;
        }
        let period = self.blink_interval.as_millis();
        if period == 0 {
            return true;
        }
        let elapsed = self.now.saturating_duration_since(self.blink_epoch).as_millis();
        (elapsed / period) % 2 == 0
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn font(&self) -> Option<(FontId, f32, Vec2, Align)> {
        let p = self.base.primitives.text(&self.editable).ok()?;
        Some((p.font(), p.font_size(), p.offset, p.align))
    }

    /// Left inset and width of the strip text is drawn and scrolled in.
    fn viewport(&self, offset: Vec2, align: Align) -> (f32, f32) {
        let inset = match align.h {
            HAlign::Left => offset.x,
            HAlign::Center => PADDING,
            HAlign::Right => self.base.size.x - offset.x,
        }
        .max(0.0);
        (inset, (self.base.size.x - 2.0 * inset).max(0.0))
    }

    /// Widget-local x of the first glyph of `shown`.
    fn text_start(
        &self,
        shown: &str,
        metrics: &dyn TextMeasure,
        font: FontId,
        size: f32,
        offset: Vec2,
        align: Align,
    ) -> f32 {
        let (left, width) = self.viewport(offset, align);
        let w = metrics.text_width(shown, font, size);
        if align.h == HAlign::Left || w > width {
            return left - self.edit.scroll_offset;
        }
        (offset.x - align.anchor_shift(Vec2::new(w, 0.0)).x).clamp(left, left + width - w)
    }

    fn sync_primitive(&mut self) {
        let text = self.edit.text.clone();
        if let Ok(p) = self.base.primitives.text_mut(&self.editable) {
            p.set_content(text);
        }
    }

    fn text_changed(&mut self) {
        if let Some(rewrite) = self.numeric.as_ref().and_then(|b| b.apply(&self.edit.text)) {
            self.edit.set_text(rewrite);
        }
        self.sync_primitive();
        if let Some(cb) = &self.on_change {
            cb.call(self.edit.text.clone());
        }
    }

    fn unfocus(&mut self, hovered: bool) {
        self.state = if hovered { FocusState::Hover } else { FocusState::Normal };
        self.edit.clear_selection();
        log::debug!("textbox lost focus");
    }
}

impl Clone for Textbox {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            edit: TextEditState::new(self.edit.text.clone()),
            editable: self.editable.clone(),
            placeholder: self.placeholder.clone(),
            state: FocusState::Normal,
            blink_interval: self.blink_interval,
            blink_epoch: self.now,
            now: self.now,
            placeholder_color: self.placeholder_color,
            selection_color: self.selection_color,
            caret_color: self.caret_color,
            numeric: self.numeric.clone(),
            on_change: self.on_change.clone(),
            on_enter: self.on_enter.clone(),
        }
    }
}

impl Widget for Textbox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, ctx: &UpdateCtx<'_>, origin: Vec2) {
        self.now = ctx.input.now;
        let Some((font, size, text_offset, align)) = self.font() else {
            return;
        };
        let global = origin + self.base.position;
        let cursor = ctx.cursor();
        let hovered = ctx.hovers(self.base.bounds(origin));

        if ctx.pressed(MouseButton::Left) {
            if hovered {
                if !self.is_focused() {
                    log::debug!("textbox focused");
                }
                self.state = FocusState::Focused;
                let start = self.text_start(&self.edit.text, ctx.metrics, font, size, text_offset, align);
                let local_x = cursor.x - (global.x + start);
                let at = self.edit.x_to_cursor(local_x, ctx.metrics, font, size);
                self.edit.place_cursor(at);
                self.blink_epoch = ctx.input.now;
            } else if self.is_focused() {
                self.unfocus(false);
            }
        }

        if !self.is_focused() {
            self.state = if hovered { FocusState::Hover } else { FocusState::Normal };
            return;
        }

        for text in &ctx.input.text {
            let clean: String = text.chars().filter(|c| !c.is_control()).collect();
            if clean.is_empty() {
                continue;
            }
            self.edit.insert_str(&clean);
            self.blink_epoch = ctx.input.now;
            self.text_changed();
        }

        for &key in &ctx.input.keys_pressed {
            match key {
                Key::Enter => {
                    if let Some(cb) = &self.on_enter {
                        cb.call(self.edit.text.clone());
                    }
                }
                Key::Escape => {
                    self.unfocus(hovered);
                    return;
                }
                _ => {
                    let outcome = self.edit.handle_key(key, ctx.input.modifiers);
                    if outcome.handled {
                        self.blink_epoch = ctx.input.now;
                    }
                    if outcome.changed {
                        self.text_changed();
                    }
                }
            }
        }

        let (_, width) = self.viewport(text_offset, align);
        self.edit.ensure_cursor_visible(width, ctx.metrics, font, size);
    }

    fn render(&self, painter: &mut Painter<'_>, origin: Vec2) {
        let global = origin + self.base.position;
        for flat in self.base.primitives.flatten() {
            if flat.prim.kind() == PrimitiveKind::Text && flat.id == self.editable {
                continue;
            }
            painter.draw_primitive(global, flat.prim, None);
        }

        let Ok(prim) = self.base.primitives.text(&self.editable) else {
            return;
        };
        let (font, size) = (prim.font(), prim.font_size());
        let focused = self.is_focused();
        let show_placeholder = self.edit.text.is_empty() && !focused && !self.placeholder.is_empty();
        let shown = if show_placeholder { self.placeholder.as_str() } else { self.edit.text.as_str() };

        let line_h = painter.measure_text(shown, font, size).y;
        let text_x = global.x + self.text_start(shown, painter.metrics(), font, size, prim.offset, prim.align);
        let top = global.y + prim.offset.y - prim.align.anchor_shift(Vec2::new(0.0, line_h)).y;

        let (left, width) = self.viewport(prim.offset, prim.align);
        let clip = Rect::new(global.x + left, global.y, width, self.base.size.y);
        painter.push_clip(clip);

        if focused && self.edit.has_selection() {
            let metrics = painter.metrics();
            let (lo, hi) = self.edit.selection();
            let lo_x = metrics.text_width(&self.edit.text[..lo], font, size);
            let hi_x = metrics.text_width(&self.edit.text[..hi], font, size);
            painter.fill_rect(Rect::new(text_x + lo_x, top, hi_x - lo_x, line_h), self.selection_color);
        }

        if show_placeholder {
            painter.text(shown, font, size, self.placeholder_color, Vec2::new(text_x, top));
        } else if !shown.is_empty() {
            painter.text(shown, font, size, prim.color, Vec2::new(text_x, top));
        }

        if self.caret_visible() {
            let cx = self.edit.cursor_x(painter.metrics(), font, size);
            painter.fill_rect(Rect::new(text_x + cx, top, 1.0, line_h), self.caret_color);
        }

        painter.pop_clip();
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

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use derma_engine::input::Modifiers;
    use derma_engine::scene::{DrawCmd, DrawList};

    use super::*;
    use crate::testing::{Driver, MonoMetrics};

    fn font() -> FontId {
        FontId::from_index(0)
    }

    /// 200×20 box at the panel origin, text starting at x = 4.
    fn boxed(text: &str) -> Textbox {
        Textbox::new(font(), 10.0, 200.0, 20.0).value(text)
    }

    fn focus_at(tb: &mut Textbox, d: &mut Driver, x: f32) {
        d.frame(d.at(x, 10.0).with_left(true), |ctx| tb.update(ctx, Vec2::zero()));
        d.frame(d.at(x, 10.0), |ctx| tb.update(ctx, Vec2::zero()));
    }

    fn press(tb: &mut Textbox, d: &mut Driver, key: Key, mods: Modifiers) {
        d.frame(d.key(key, mods), |ctx| tb.update(ctx, Vec2::zero()));
    }

    fn type_str(tb: &mut Textbox, d: &mut Driver, s: &str) {
        d.frame(d.typed(s), |ctx| tb.update(ctx, Vec2::zero()));
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn click_focuses_and_places_cursor_at_nearest_boundary() {
        let mut tb = boxed("abcdef");
        let mut d = Driver::new();
        // 4 + 2 * 10 + 4: closer to boundary 2 than 3.
        focus_at(&mut tb, &mut d, 28.0);
        assert!(tb.is_focused());
        assert_eq!(tb.cursor(), 2);
    }

    #[test]
    fn click_outside_unfocuses_and_clears_selection() {
        let mut tb = boxed("abc");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 150.0);
        press(&mut tb, &mut d, Key::A, Modifiers::CTRL);
        assert_eq!(tb.selection(), (0, 3));

        focus_at(&mut tb, &mut d, 500.0);
        assert_eq!(tb.state(), FocusState::Normal);
        assert_eq!(tb.selection().0, tb.selection().1);
    }

    #[test]
    fn typing_while_unfocused_is_ignored() {
        let mut tb = boxed("abc");
        let mut d = Driver::new();
        type_str(&mut tb, &mut d, "zzz");
        assert_eq!(tb.text(), "abc");
    }

    // ── editing ───────────────────────────────────────────────────────────

    #[test]
    fn backspace_twice_from_end() {
        let mut tb = boxed("abc");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 150.0);
        assert_eq!(tb.cursor(), 3);

        press(&mut tb, &mut d, Key::Backspace, Modifiers::NONE);
        press(&mut tb, &mut d, Key::Backspace, Modifiers::NONE);
        assert_eq!(tb.text(), "a");
        assert_eq!(tb.cursor(), 1);
        assert_eq!(tb.base().primitives.text("text").unwrap().content(), "a");
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let mut tb = boxed("hello");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 4.0 + 20.0);
        assert_eq!(tb.cursor(), 2);

        type_str(&mut tb, &mut d, "xyz");
        assert_eq!(tb.text(), "hexyzllo");
        for _ in 0..3 {
            press(&mut tb, &mut d, Key::Backspace, Modifiers::NONE);
        }
        assert_eq!(tb.text(), "hello");
        assert_eq!(tb.cursor(), 2);
    }

    #[test]
    fn control_characters_are_not_inserted() {
        let mut tb = boxed("");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);
        type_str(&mut tb, &mut d, "\r\u{8}");
        assert_eq!(tb.text(), "");
    }

    #[test]
    fn enter_and_change_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        let mut tb = boxed("")
            .on_change(move |s| a.borrow_mut().push(format!("change:{s}")))
            .on_enter(move |s| b.borrow_mut().push(format!("enter:{s}")));
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);
        type_str(&mut tb, &mut d, "hi");
        press(&mut tb, &mut d, Key::Enter, Modifiers::NONE);
        assert_eq!(*log.borrow(), vec!["change:hi".to_string(), "enter:hi".to_string()]);
    }

    #[test]
    fn escape_unfocuses() {
        let mut tb = boxed("abc");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);
        press(&mut tb, &mut d, Key::Escape, Modifiers::NONE);
        assert!(!tb.is_focused());
    }

    // ── numeric binding ───────────────────────────────────────────────────

    #[test]
    fn numeric_binding_clamps_and_rewrites() {
        let volume = Rc::new(Cell::new(0_i64));
        let mut tb = boxed("").numeric_int(volume.clone(), 0, 100);
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);

        type_str(&mut tb, &mut d, "15");
        assert_eq!(volume.get(), 15);
        type_str(&mut tb, &mut d, "0");
        assert_eq!(volume.get(), 100);
        assert_eq!(tb.text(), "100");
        assert_eq!(tb.cursor(), 3);
    }

    #[test]
    fn numeric_parse_failure_is_ignored() {
        let gain = Rc::new(Cell::new(0.5_f64));
        let mut tb = boxed("").numeric_float(gain.clone(), -1.0, 1.0);
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);

        type_str(&mut tb, &mut d, "-");
        assert_eq!(gain.get(), 0.5);
        assert_eq!(tb.text(), "-");
        type_str(&mut tb, &mut d, "0.25");
        assert_eq!(gain.get(), -0.25);
    }

    // ── blink / scroll ────────────────────────────────────────────────────

    #[test]
    fn caret_blinks_and_resets_on_edit() {
        let mut tb = boxed("abc");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);
        assert!(tb.caret_visible());

        let later = d.at(10.0, 10.0).later(Duration::from_millis(600));
        d.frame(later, |ctx| tb.update(ctx, Vec2::zero()));
        assert!(!tb.caret_visible());

        press(&mut tb, &mut d, Key::ArrowRight, Modifiers::NONE);
        assert!(tb.caret_visible());
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        let mut tb = Textbox::new(font(), 10.0, 48.0, 20.0);
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);
        type_str(&mut tb, &mut d, "abcdefgh");
        // Inner width 40, caret at 80.
        assert_eq!(tb.scroll_offset(), 40.0);
        press(&mut tb, &mut d, Key::Home, Modifiers::NONE);
        assert_eq!(tb.scroll_offset(), 0.0);
    }

    // ── render / clone ────────────────────────────────────────────────────

    #[test]
    fn render_order_background_selection_text_caret() {
        let mut tb = boxed("abc");
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 10.0);
        press(&mut tb, &mut d, Key::A, Modifiers::CTRL);

        let mut list = DrawList::new();
        let metrics = MonoMetrics::default();
        tb.render(&mut Painter::new(&mut list, &metrics), Vec2::zero());

        let kinds: Vec<&str> = list
            .iter_in_paint_order()
            .map(|i| match i.cmd {
                DrawCmd::Rect(_) => "rect",
                DrawCmd::Text(_) => "text",
                DrawCmd::Line(_) => "line",
                DrawCmd::Texture(_) => "texture",
            })
            .collect();
        assert_eq!(kinds, vec!["rect", "rect", "text", "rect"]);
    }

    #[test]
    fn placeholder_shows_only_when_empty_and_unfocused() {
        let tb = boxed("").placeholder("search");
        let mut list = DrawList::new();
        let metrics = MonoMetrics::default();
        tb.render(&mut Painter::new(&mut list, &metrics), Vec2::zero());
        let texts: Vec<String> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["search".to_string()]);
    }

    #[test]
    fn bind_editable_requires_registered_text() {
        use crate::widget::WidgetExt;
        let tb = boxed("").draw_text("label", TextPrimitive::new("name", font(), 10.0));
        assert!(tb.clone().editable("missing").is_err());
        let tb = tb.editable("label").unwrap();
        assert_eq!(tb.text(), "name");
    }

    #[test]
    fn clone_resets_focus_and_is_independent() {
        let mut a = boxed("abc");
        let mut d = Driver::new();
        focus_at(&mut a, &mut d, 10.0);
        let mut b = a.clone();
        assert!(!b.is_focused());
        b.set_text("zzz");
        assert_eq!(a.text(), "abc");
        assert!(a.is_focused());
    }

    #[test]
    fn centered_editable_text_stays_centered_until_it_overflows() {
        let mut tb = boxed("ab");
        tb.base_mut()
            .primitives
            .upsert_text(TEXT_ID, TextPrimitive::new("ab", font(), 10.0).align(Align::CENTER).offset(100.0, 10.0));
        let text_x = |tb: &Textbox| {
            let mut list = DrawList::new();
            let metrics = MonoMetrics::default();
            tb.render(&mut Painter::new(&mut list, &metrics), Vec2::zero());
            list.items().iter().find_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t.origin.x),
                _ => None,
            })
        };
        assert_eq!(text_x(&tb), Some(90.0));

        // Clicks map onto the centered run: 101 is just past the first glyph.
        let mut d = Driver::new();
        focus_at(&mut tb, &mut d, 101.0);
        assert_eq!(tb.cursor(), 1);

        tb.set_text("a".repeat(25));
        assert_eq!(text_x(&tb), Some(PADDING));
    }
}
