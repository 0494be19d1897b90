//! Per-owner store of named drawing primitives.
//!
//! One list per kind, each entry tagged with a registry-wide sequence number
//! so that [`PrimitiveRegistry::flatten`] can order ties across kinds by
//! declaration order.
//!
//! Re-registering an existing id overwrites the entry in place; the entry
//! keeps its original sequence number. Anonymous primitives (empty id) are
//! always appended and can never be looked up or cleared by id.

use crate::error::{UiError, UiResult};
use crate::primitive::{
    LinePrimitive, PrimitiveKind, PrimitiveRef, RectPrimitive, TextPrimitive, TexturePrimitive,
};

#[derive(Debug, Clone)]
struct Slot<P> {
    id: String,
    seq: u64,
    prim: P,
}

/// One flattened entry, ready for the render pass.
#[derive(Debug, Copy, Clone)]
pub struct FlatPrimitive<'a> {
    pub z: i32,
    pub id: &'a str,
    pub prim: PrimitiveRef<'a>,
}

#[derive(Debug, Clone, Default)]
pub struct PrimitiveRegistry {
    lines: Vec<Slot<LinePrimitive>>,
    rects: Vec<Slot<RectPrimitive>>,
    texts: Vec<Slot<TextPrimitive>>,
    textures: Vec<Slot<TexturePrimitive>>,
    next_seq: u64,
}

fn upsert<P>(slots: &mut Vec<Slot<P>>, next_seq: &mut u64, id: String, prim: P) {
    if !id.is_empty() {
        if let Some(slot) = slots.iter_mut().find(|s| s.id == id) {
            slot.prim = prim;
            return;
        }
    }
    let seq = *next_seq;
    *next_seq += 1;
    slots.push(Slot { id, seq, prim });
}

fn find<'a, P>(slots: &'a [Slot<P>], id: &str, kind: PrimitiveKind) -> UiResult<&'a P> {
    slots
        .iter()
        .find(|s| !id.is_empty() && s.id == id)
        .map(|s| &s.prim)
        .ok_or_else(|| UiError::PrimitiveNotFound { kind, id: id.to_string() })
}

fn find_mut<'a, P>(slots: &'a mut [Slot<P>], id: &str, kind: PrimitiveKind) -> UiResult<&'a mut P> {
    slots
        .iter_mut()
        .find(|s| !id.is_empty() && s.id == id)
        .map(|s| &mut s.prim)
        .ok_or_else(|| UiError::PrimitiveNotFound { kind, id: id.to_string() })
}

fn remove_id<P>(slots: &mut Vec<Slot<P>>, id: &str) -> usize {
    let before = slots.len();
    slots.retain(|s| s.id != id);
    before - slots.len()
}

impl PrimitiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── upsert ────────────────────────────────────────────────────────────

    pub fn upsert_line(&mut self, id: impl Into<String>, prim: LinePrimitive) {
        upsert(&mut self.lines, &mut self.next_seq, id.into(), prim);
    }

    pub fn upsert_rect(&mut self, id: impl Into<String>, prim: RectPrimitive) {
        upsert(&mut self.rects, &mut self.next_seq, id.into(), prim);
    }

    pub fn upsert_text(&mut self, id: impl Into<String>, prim: TextPrimitive) {
        upsert(&mut self.texts, &mut self.next_seq, id.into(), prim);
    }

    pub fn upsert_texture(&mut self, id: impl Into<String>, prim: TexturePrimitive) {
        upsert(&mut self.textures, &mut self.next_seq, id.into(), prim);
    }

    // ── lookup ────────────────────────────────────────────────────────────

    pub fn line(&self, id: &str) -> UiResult<&LinePrimitive> {
        find(&self.lines, id, PrimitiveKind::Line)
    }

    pub fn line_mut(&mut self, id: &str) -> UiResult<&mut LinePrimitive> {
        find_mut(&mut self.lines, id, PrimitiveKind::Line)
    }

    pub fn rect(&self, id: &str) -> UiResult<&RectPrimitive> {
        find(&self.rects, id, PrimitiveKind::Rect)
    }

    pub fn rect_mut(&mut self, id: &str) -> UiResult<&mut RectPrimitive> {
        find_mut(&mut self.rects, id, PrimitiveKind::Rect)
    }

    pub fn text(&self, id: &str) -> UiResult<&TextPrimitive> {
        find(&self.texts, id, PrimitiveKind::Text)
    }

    pub fn text_mut(&mut self, id: &str) -> UiResult<&mut TextPrimitive> {
        find_mut(&mut self.texts, id, PrimitiveKind::Text)
    }

    pub fn texture(&self, id: &str) -> UiResult<&TexturePrimitive> {
        find(&self.textures, id, PrimitiveKind::Texture)
    }

    pub fn texture_mut(&mut self, id: &str) -> UiResult<&mut TexturePrimitive> {
        find_mut(&mut self.textures, id, PrimitiveKind::Texture)
    }

    pub fn contains(&self, kind: PrimitiveKind, id: &str) -> bool {
        match kind {
            PrimitiveKind::Line => self.line(id).is_ok(),
            PrimitiveKind::Rect => self.rect(id).is_ok(),
            PrimitiveKind::Text => self.text(id).is_ok(),
            PrimitiveKind::Texture => self.texture(id).is_ok(),
        }
    }

    // ── removal ───────────────────────────────────────────────────────────

    /// Removes every primitive, of any kind, registered under `id`.
    /// Returns how many were removed. An empty id removes nothing.
    pub fn clear(&mut self, id: &str) -> usize {
        if id.is_empty() {
            return 0;
        }
        remove_id(&mut self.lines, id)
            + remove_id(&mut self.rects, id)
            + remove_id(&mut self.texts, id)
            + remove_id(&mut self.textures, id)
    }

    pub fn clear_all(&mut self) {
        self.lines.clear();
        self.rects.clear();
        self.texts.clear();
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len() + self.rects.len() + self.texts.len() + self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── flatten ───────────────────────────────────────────────────────────

    /// All primitives sorted by z ascending; equal z keeps declaration order
    /// across kinds.
    pub fn flatten(&self) -> Vec<FlatPrimitive<'_>> {
        let mut out: Vec<(u64, FlatPrimitive<'_>)> = Vec::with_capacity(self.len());
        out.extend(self.lines.iter().map(|s| (s.seq, flat(&s.id, PrimitiveRef::Line(&s.prim)))));
        out.extend(self.rects.iter().map(|s| (s.seq, flat(&s.id, PrimitiveRef::Rect(&s.prim)))));
        out.extend(self.texts.iter().map(|s| (s.seq, flat(&s.id, PrimitiveRef::Text(&s.prim)))));
        out.extend(
            self.textures.iter().map(|s| (s.seq, flat(&s.id, PrimitiveRef::Texture(&s.prim)))),
        );
        out.sort_by_key(|(seq, f)| (f.z, *seq));
        out.into_iter().map(|(_, f)| f).collect()
    }
}

fn flat<'a>(id: &'a str, prim: PrimitiveRef<'a>) -> FlatPrimitive<'a> {
    FlatPrimitive { z: prim.z(), id, prim }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_engine::coords::Vec2;
    use derma_engine::paint::Color;
    use derma_engine::text::FontId;

    fn font() -> FontId {
        FontId::from_index(0)
    }

    // ── upsert / lookup ───────────────────────────────────────────────────

    #[test]
    fn upsert_overwrites_same_kind_and_id() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_rect("bar", RectPrimitive::new(10.0, 4.0));
        reg.upsert_rect("bar", RectPrimitive::new(20.0, 4.0));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.rect("bar").unwrap().size, Vec2::new(20.0, 4.0));
    }

    #[test]
    fn ids_are_scoped_per_kind() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_rect("label", RectPrimitive::new(1.0, 1.0));
        reg.upsert_text("label", TextPrimitive::new("hi", font(), 12.0));
        assert_eq!(reg.len(), 2);
        assert!(reg.contains(PrimitiveKind::Rect, "label"));
        assert!(reg.contains(PrimitiveKind::Text, "label"));
        assert!(!reg.contains(PrimitiveKind::Line, "label"));
    }

    #[test]
    fn missing_id_is_an_error() {
        let mut reg = PrimitiveRegistry::new();
        let err = reg.rect_mut("health").unwrap_err();
        assert!(matches!(
            err,
            UiError::PrimitiveNotFound { kind: PrimitiveKind::Rect, ref id } if id == "health"
        ));
    }

    #[test]
    fn anonymous_primitives_append_and_stay_unreachable() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_rect("", RectPrimitive::new(1.0, 1.0));
        reg.upsert_rect("", RectPrimitive::new(2.0, 2.0));
        assert_eq!(reg.len(), 2);
        assert!(reg.rect("").is_err());
        assert_eq!(reg.clear(""), 0);
    }

    #[test]
    fn get_mut_animates_in_place() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_rect("health", RectPrimitive::new(100.0, 8.0).color(Color::WHITE));
        reg.rect_mut("health").unwrap().size.x = 42.0;
        assert_eq!(reg.rect("health").unwrap().size.x, 42.0);
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_removes_every_kind_under_id() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_rect("x", RectPrimitive::new(1.0, 1.0));
        reg.upsert_line("x", LinePrimitive::new([Vec2::zero(), Vec2::new(1.0, 1.0)]));
        reg.upsert_rect("y", RectPrimitive::new(1.0, 1.0));
        assert_eq!(reg.clear("x"), 2);
        assert_eq!(reg.len(), 1);
        reg.clear_all();
        assert!(reg.is_empty());
    }

    // ── flatten ───────────────────────────────────────────────────────────

    #[test]
    fn flatten_sorts_by_z_then_declaration_across_kinds() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_text("a", TextPrimitive::new("a", font(), 10.0).z(1));
        reg.upsert_rect("b", RectPrimitive::new(1.0, 1.0).z(0));
        reg.upsert_line("c", LinePrimitive::new([Vec2::zero(), Vec2::zero()]).z(1));
        reg.upsert_rect("d", RectPrimitive::new(1.0, 1.0).z(1));
        reg.upsert_rect("e", RectPrimitive::new(1.0, 1.0).z(-3));

        let ids: Vec<&str> = reg.flatten().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["e", "b", "a", "c", "d"]);
    }

    #[test]
    fn overwrite_keeps_original_declaration_slot() {
        let mut reg = PrimitiveRegistry::new();
        reg.upsert_rect("first", RectPrimitive::new(1.0, 1.0));
        reg.upsert_rect("second", RectPrimitive::new(1.0, 1.0));
        reg.upsert_rect("first", RectPrimitive::new(5.0, 5.0));

        let ids: Vec<&str> = reg.flatten().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
