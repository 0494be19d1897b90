//! Shared fixtures for unit tests.

use derma_engine::coords::Vec2;
use derma_engine::input::{InputSnapshot, Key, Modifiers};
use derma_engine::text::{FontId, TextMeasure};

use crate::event::PointerState;
use crate::widget::UpdateCtx;

/// Every glyph is `advance` wide; line height is 1.2 × size.
pub(crate) struct MonoMetrics {
    pub advance: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        Self { advance: 10.0 }
    }
}

impl TextMeasure for MonoMetrics {
    fn measure(&self, text: &str, _font: FontId, size: f32) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * self.advance, size * 1.2)
    }
}

/// Drives a single widget frame by frame, tracking the previous pointer the
/// way a panel node does.
pub(crate) struct Driver {
    pub metrics: MonoMetrics,
    pub prev: PointerState,
    pub input: InputSnapshot,
}

impl Driver {
    pub fn new() -> Self {
        Self { metrics: MonoMetrics::default(), prev: PointerState::default(), input: InputSnapshot::default() }
    }

    /// Runs `f` with a context built from `input`, then remembers its pointer.
    pub fn frame<R>(&mut self, input: InputSnapshot, f: impl FnOnce(&UpdateCtx<'_>) -> R) -> R {
        self.input = input;
        let ctx = UpdateCtx { input: &self.input, previous: self.prev, metrics: &self.metrics };
        let out = f(&ctx);
        self.prev = PointerState::from_snapshot(&self.input);
        out
    }

    /// Snapshot at `(x, y)` that keeps the clock of the last frame.
    pub fn at(&self, x: f32, y: f32) -> InputSnapshot {
        InputSnapshot::at(Vec2::new(x, y)).with_time(self.input.now)
    }

    pub fn key(&self, key: Key, modifiers: Modifiers) -> InputSnapshot {
        let mut input = self.at(self.prev.cursor.x, self.prev.cursor.y).with_key(key).with_modifiers(modifiers);
        input.left = self.prev.left;
        input
    }

    pub fn typed(&self, text: &str) -> InputSnapshot {
        let mut input = self.at(self.prev.cursor.x, self.prev.cursor.y).with_text(text);
        input.left = self.prev.left;
        input
    }
}
