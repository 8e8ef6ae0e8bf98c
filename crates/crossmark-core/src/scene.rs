//! In-memory retained primitive store.
//!
//! `Scene` is the bookkeeping half of every surface: the Win32 surface
//! wraps one and rasterizes it on present, and tests inspect it directly.

use std::collections::BTreeMap;

use crate::OverlayResult;
use crate::color::Color;
use crate::geometry::Segment;
use crate::rect::Point;
use crate::surface::{DrawSurface, FontSpec, Primitive, PrimitiveId};

#[derive(Debug, Default, Clone)]
pub struct Scene {
    primitives: BTreeMap<PrimitiveId, Primitive>,
    next_id: PrimitiveId,
    offset: Point,
    dirty: bool,
    presents: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    /// Primitives in drawing order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.values()
    }

    /// All line segments currently on the surface.
    pub fn lines(&self) -> Vec<Segment> {
        self.iter()
            .filter_map(|p| match p {
                Primitive::Line { segment, .. } => Some(*segment),
                Primitive::Text { .. } => None,
            })
            .collect()
    }

    /// Accumulated surface displacement from `move_by`.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// True if primitives changed since the last `present`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of times `present` has been called.
    pub fn presents(&self) -> usize {
        self.presents
    }

    fn insert(&mut self, primitive: Primitive) -> PrimitiveId {
        self.next_id += 1;
        self.primitives.insert(self.next_id, primitive);
        self.dirty = true;
        self.next_id
    }
}

impl DrawSurface for Scene {
    fn draw_line(&mut self, segment: Segment, color: Color, width: i32) -> PrimitiveId {
        self.insert(Primitive::Line {
            segment,
            color,
            width,
        })
    }

    fn draw_text(
        &mut self,
        origin: Point,
        lines: &[String],
        font: &FontSpec,
        color: Color,
    ) -> PrimitiveId {
        self.insert(Primitive::Text {
            origin,
            lines: lines.to_vec(),
            font: font.clone(),
            color,
        })
    }

    fn delete(&mut self, id: PrimitiveId) {
        if self.primitives.remove(&id).is_some() {
            self.dirty = true;
        }
    }

    fn clear(&mut self) {
        if !self.primitives.is_empty() {
            self.primitives.clear();
            self.dirty = true;
        }
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    fn present(&mut self) -> OverlayResult<()> {
        self.dirty = false;
        self.presents += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: i32) -> Segment {
        Segment::new(Point::new(x, 0), Point::new(x, 10))
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        // Arrange
        let mut scene = Scene::new();
        let green = Color::rgb(0, 255, 0);

        // Act
        let a = scene.draw_line(line(1), green, 2);
        scene.delete(a);
        let b = scene.draw_line(line(2), green, 2);

        // Assert
        assert_ne!(a, b);
        assert_eq!(scene.len(), 1);
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn deleting_unknown_id_is_a_no_op() {
        let mut scene = Scene::new();
        scene.present().unwrap();

        scene.delete(42);

        assert!(!scene.is_dirty());
        assert!(scene.is_empty());
    }

    #[test]
    fn present_clears_dirty_flag() {
        let mut scene = Scene::new();
        scene.draw_line(line(1), Color::rgb(1, 2, 3), 2);
        assert!(scene.is_dirty());

        scene.present().unwrap();

        assert!(!scene.is_dirty());
        assert_eq!(scene.presents(), 1);
    }

    #[test]
    fn clear_removes_lines_and_text() {
        let mut scene = Scene::new();
        let font = FontSpec {
            family: "Consolas".into(),
            size: 16,
        };
        scene.draw_line(line(1), Color::rgb(1, 2, 3), 2);
        scene.draw_text(Point::new(5, 5), &["hi".into()], &font, Color::rgb(9, 9, 9));

        scene.clear();

        assert!(scene.is_empty());
        assert!(scene.lines().is_empty());
    }

    #[test]
    fn move_by_accumulates_offset() {
        let mut scene = Scene::new();
        scene.move_by(10, -4);
        scene.move_by(-3, 7);
        assert_eq!(scene.offset(), Point::new(7, 3));
    }
}
