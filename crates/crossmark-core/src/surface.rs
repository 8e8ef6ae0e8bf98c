//! The drawing-surface capability and its retained primitives.

use crate::OverlayResult;
use crate::color::Color;
use crate::geometry::Segment;
use crate::rect::Point;

/// Identifier of a primitive previously drawn on a surface.
pub type PrimitiveId = u64;

/// Font family and pixel height used for overlay text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: i32,
}

/// A retained drawing primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// A straight line of `width` pixels.
    Line {
        segment: Segment,
        color: Color,
        width: i32,
    },
    /// Multi-line text; each line is horizontally centered on
    /// `origin.x`, and the first line's top edge sits at `origin.y`.
    Text {
        origin: Point,
        lines: Vec<String>,
        font: FontSpec,
        color: Color,
    },
}

/// A transparent, always-on-top surface that keeps drawn primitives
/// until they are deleted.
///
/// Draw and delete calls only edit the retained set; `present` pushes
/// the current set to the screen. Only the context that owns the
/// surface may call any of these.
pub trait DrawSurface {
    /// Adds a line and returns its id.
    fn draw_line(&mut self, segment: Segment, color: Color, width: i32) -> PrimitiveId;

    /// Adds a block of text and returns its id.
    fn draw_text(
        &mut self,
        origin: Point,
        lines: &[String],
        font: &FontSpec,
        color: Color,
    ) -> PrimitiveId;

    /// Removes a primitive. Unknown ids are ignored.
    fn delete(&mut self, id: PrimitiveId);

    /// Removes every primitive.
    fn clear(&mut self);

    /// Moves the whole surface (and everything on it) by a delta.
    fn move_by(&mut self, dx: i32, dy: i32);

    /// Makes the current primitive set visible.
    fn present(&mut self) -> OverlayResult<()>;
}
