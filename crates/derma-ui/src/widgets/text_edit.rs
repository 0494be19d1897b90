use derma_engine::input::{Key, Modifiers};
use derma_engine::text::{FontId, TextMeasure};

/// Single-line editing state: text, caret, selection anchor and scroll.
///
/// Offsets are byte offsets kept on UTF-8 char boundaries.
#[derive(Debug, Clone, Default)]
pub struct TextEditState {
    pub text: String,
    /// Caret byte offset.
    pub cursor: usize,
    /// Selection anchor. `cursor == anchor` means no selection.
    pub anchor: usize,
    /// Pixels the text is scrolled to the left.
    pub scroll_offset: f32,
}

/// Result of feeding one key to [`TextEditState::handle_key`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct EditOutcome {
    /// The key meant something to the editor.
    pub handled: bool,
    /// The text content changed.
    pub changed: bool,
}

impl EditOutcome {
    const IGNORED: Self = Self { handled: false, changed: false };
    const MOVED: Self = Self { handled: true, changed: false };

    fn edited(changed: bool) -> Self {
        Self { handled: true, changed }
    }
}

impl TextEditState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self { text, cursor: end, anchor: end, scroll_offset: 0.0 }
    }

    /// Sorted `(lo, hi)` byte range of the selection.
    #[inline]
    pub fn selection(&self) -> (usize, usize) {
        (self.cursor.min(self.anchor), self.cursor.max(self.anchor))
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.cursor != self.anchor
    }

    /// Replaces the whole text and puts the caret at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.anchor = self.cursor;
    }

    /// Caret position counted in chars.
    pub fn cursor_chars(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn clear_selection(&mut self) {
        self.anchor = self.cursor;
    }

    // ── movement ──────────────────────────────────────────────────────────

    /// One char left; extends the selection while `shift` is held.
    pub fn move_left(&mut self, shift: bool) {
        self.cursor = prev_char(&self.text, self.cursor);
        if !shift {
            self.anchor = self.cursor;
        }
    }

    pub fn move_right(&mut self, shift: bool) {
        self.cursor = next_char(&self.text, self.cursor);
        if !shift {
            self.anchor = self.cursor;
        }
    }

    pub fn move_word_left(&mut self, shift: bool) {
        self.cursor = prev_word(&self.text, self.cursor);
        if !shift {
            self.anchor = self.cursor;
        }
    }

    pub fn move_word_right(&mut self, shift: bool) {
        self.cursor = next_word(&self.text, self.cursor);
        if !shift {
            self.anchor = self.cursor;
        }
    }

    pub fn move_home(&mut self, shift: bool) {
        self.cursor = 0;
        if !shift {
            self.anchor = 0;
        }
    }

    pub fn move_end(&mut self, shift: bool) {
        self.cursor = self.text.len();
        if !shift {
            self.anchor = self.cursor;
        }
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.cursor = self.text.len();
    }

    /// Places the caret without a selection, clamped to a char boundary.
    pub fn place_cursor(&mut self, byte: usize) {
        let mut at = byte.min(self.text.len());
        while !self.text.is_char_boundary(at) {
            at -= 1;
        }
        self.cursor = at;
        self.anchor = at;
    }

    // ── editing ───────────────────────────────────────────────────────────

    /// Inserts at the caret, replacing the selection first.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.anchor = self.cursor;
    }

    /// Backspace. Returns whether anything was removed.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        self.anchor = prev;
        true
    }

    /// Delete key. Returns whether anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = next_char(&self.text, self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let (lo, hi) = self.selection();
        self.text.drain(lo..hi);
        self.cursor = lo;
        self.anchor = lo;
        true
    }

    // ── clipboard ─────────────────────────────────────────────────────────

    /// Copies the selection. A missing clipboard is a silent no-op.
    pub fn copy(&self) {
        let (lo, hi) = self.selection();
        if lo == hi {
            return;
        }
        match arboard::Clipboard::new() {
            Ok(mut cb) => {
                if let Err(e) = cb.set_text(self.text[lo..hi].to_string()) {
                    log::debug!("clipboard write failed: {e}");
                }
            }
            Err(e) => log::debug!("clipboard unavailable: {e}"),
        }
    }

    pub fn cut(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        self.copy();
        self.delete_selection()
    }

    /// Pastes the first line of the clipboard text, control chars removed.
    pub fn paste(&mut self) -> bool {
        let Ok(mut cb) = arboard::Clipboard::new() else {
            return false;
        };
        let Ok(text) = cb.get_text() else {
            return false;
        };
        let line: String = text.lines().next().unwrap_or("").chars().filter(|c| !c.is_control()).collect();
        if line.is_empty() {
            return false;
        }
        self.insert_str(&line);
        true
    }

    // ── keys ──────────────────────────────────────────────────────────────

    /// Navigation, deletion and clipboard keys.
    ///
    /// Enter and Escape are left to the owning widget.
    pub fn handle_key(&mut self, key: Key, mods: Modifiers) -> EditOutcome {
        let shift = mods.shift;
        match key {
            Key::Backspace => EditOutcome::edited(self.delete_backward()),
            Key::Delete => EditOutcome::edited(self.delete_forward()),
            Key::ArrowLeft if mods.ctrl => {
                self.move_word_left(shift);
                EditOutcome::MOVED
            }
            Key::ArrowLeft => {
                self.move_left(shift);
                EditOutcome::MOVED
            }
            Key::ArrowRight if mods.ctrl => {
                self.move_word_right(shift);
                EditOutcome::MOVED
            }
            Key::ArrowRight => {
                self.move_right(shift);
                EditOutcome::MOVED
            }
            Key::Home => {
                self.move_home(shift);
                EditOutcome::MOVED
            }
            Key::End => {
                self.move_end(shift);
                EditOutcome::MOVED
            }
            Key::A if mods.ctrl => {
                self.select_all();
                EditOutcome::MOVED
            }
            Key::C if mods.ctrl => {
                self.copy();
                EditOutcome::MOVED
            }
            Key::X if mods.ctrl => EditOutcome::edited(self.cut()),
            Key::V if mods.ctrl => EditOutcome::edited(self.paste()),
            _ => EditOutcome::IGNORED,
        }
    }

    // ── measurement ───────────────────────────────────────────────────────

    /// Caret x relative to the text origin, before scrolling.
    pub fn cursor_x(&self, metrics: &dyn TextMeasure, font: FontId, size: f32) -> f32 {
        metrics.text_width(&self.text[..self.cursor], font, size)
    }

    pub fn anchor_x(&self, metrics: &dyn TextMeasure, font: FontId, size: f32) -> f32 {
        metrics.text_width(&self.text[..self.anchor], font, size)
    }

    /// Nearest char boundary to `x` (relative to the text origin).
    /// Equidistant boundaries resolve to the earlier one.
    pub fn x_to_cursor(&self, x: f32, metrics: &dyn TextMeasure, font: FontId, size: f32) -> usize {
        let text = &self.text;
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        let mut i = 0;
        loop {
            let dist = (metrics.text_width(&text[..i], font, size) - x).abs();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
            if i >= text.len() {
                break;
            }
            i = next_char(text, i);
        }
        best
    }

    /// Scrolls so the caret stays inside `[0, inner_width]`; never negative.
    pub fn ensure_cursor_visible(&mut self, inner_width: f32, metrics: &dyn TextMeasure, font: FontId, size: f32) {
        let cx = self.cursor_x(metrics, font, size);
        if cx < self.scroll_offset {
            self.scroll_offset = cx;
        } else if cx > self.scroll_offset + inner_width {
            self.scroll_offset = cx - inner_width;
        }
        self.scroll_offset = self.scroll_offset.max(0.0);
    }
}

// ── UTF-8 helpers ─────────────────────────────────────────────────────────

fn prev_char(s: &str, from: usize) -> usize {
    s[..from].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char(s: &str, from: usize) -> usize {
    s[from..].chars().next().map_or(s.len(), |c| from + c.len_utf8())
}

/// Back over whitespace, then over the word before it.
fn prev_word(s: &str, from: usize) -> usize {
    s[..from].trim_end().trim_end_matches(|c: char| !c.is_whitespace()).len()
}

/// Forward over the rest of the word, then the whitespace after it.
fn next_word(s: &str, from: usize) -> usize {
    let after = &s[from..];
    let rest = after.trim_start_matches(|c: char| !c.is_whitespace()).trim_start();
    from + (after.len() - rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MonoMetrics;

    fn font() -> FontId {
        FontId::from_index(0)
    }

    #[test]
    fn shift_extends_from_fixed_anchor() {
        let mut e = TextEditState::new("hello");
        e.handle_key(Key::ArrowLeft, Modifiers::SHIFT);
        e.handle_key(Key::ArrowLeft, Modifiers::SHIFT);
        assert_eq!(e.selection(), (3, 5));
        e.handle_key(Key::Home, Modifiers::SHIFT);
        assert_eq!(e.selection(), (0, 5));
        e.handle_key(Key::ArrowRight, Modifiers::NONE);
        assert!(!e.has_selection());
        assert_eq!(e.cursor, 1);
    }

    #[test]
    fn typing_replaces_selection() {
        let mut e = TextEditState::new("hello world");
        e.handle_key(Key::A, Modifiers::CTRL);
        e.insert_str("x");
        assert_eq!(e.text, "x");
        assert_eq!(e.cursor, 1);
    }

    #[test]
    fn delete_respects_multibyte_chars() {
        let mut e = TextEditState::new("aé");
        assert!(e.delete_backward());
        assert_eq!(e.text, "a");
        e.move_home(false);
        assert!(e.delete_forward());
        assert!(!e.delete_forward());
        assert_eq!(e.text, "");
    }

    #[test]
    fn word_jumps() {
        let mut e = TextEditState::new("one two  three");
        e.handle_key(Key::ArrowLeft, Modifiers::CTRL);
        assert_eq!(e.cursor, 9);
        e.handle_key(Key::ArrowLeft, Modifiers::CTRL);
        assert_eq!(e.cursor, 4);
        e.handle_key(Key::ArrowRight, Modifiers::CTRL);
        assert_eq!(e.cursor, 9);
    }

    #[test]
    fn x_to_cursor_prefers_earlier_boundary_on_ties() {
        let e = TextEditState::new("abc");
        let m = MonoMetrics::default();
        assert_eq!(e.x_to_cursor(14.0, &m, font(), 10.0), 1);
        assert_eq!(e.x_to_cursor(15.0, &m, font(), 10.0), 1);
        assert_eq!(e.x_to_cursor(16.0, &m, font(), 10.0), 2);
        assert_eq!(e.x_to_cursor(-50.0, &m, font(), 10.0), 0);
        assert_eq!(e.x_to_cursor(500.0, &m, font(), 10.0), 3);
    }

    #[test]
    fn scroll_follows_cursor_and_clamps_at_zero() {
        let mut e = TextEditState::new("abcdefghij");
        let m = MonoMetrics::default();
        e.ensure_cursor_visible(40.0, &m, font(), 10.0);
        assert_eq!(e.scroll_offset, 60.0);
        e.move_home(false);
        e.ensure_cursor_visible(40.0, &m, font(), 10.0);
        assert_eq!(e.scroll_offset, 0.0);
    }
}
