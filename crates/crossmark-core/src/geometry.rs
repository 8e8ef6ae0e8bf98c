//! Overlay geometry: crosshair segments and the snap line.
//!
//! Everything here is pure arithmetic on screen coordinates so the
//! renderer and the tests agree on exactly which pixels get drawn.

use crate::rect::{Point, Rect};

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Length of an axis-aligned segment. Diagonals report the larger
    /// axis delta.
    pub fn axis_length(&self) -> i32 {
        (self.to.x - self.from.x)
            .abs()
            .max((self.to.y - self.from.y).abs())
    }
}

/// Primary display dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Bottom-center of the screen, the fixed anchor of every snap line.
    pub fn bottom_center(&self) -> Point {
        Point::new(self.width / 2, self.height)
    }
}

/// The two perpendicular segments centered on a target window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crosshair {
    pub center: Point,
    pub horizontal: Segment,
    pub vertical: Segment,
}

/// Computes the crosshair for a window rectangle.
///
/// Each arm extends `radius * 2` from the center, so a full segment is
/// `radius * 4` long.
pub fn crosshair(rect: &Rect, radius: i32) -> Crosshair {
    let center = rect.center();
    let arm = radius * 2;

    Crosshair {
        center,
        horizontal: Segment::new(
            Point::new(center.x - arm, center.y),
            Point::new(center.x + arm, center.y),
        ),
        vertical: Segment::new(
            Point::new(center.x, center.y - arm),
            Point::new(center.x, center.y + arm),
        ),
    }
}

/// Line from the bottom-center of the screen to `target`.
pub fn snap_line(screen: ScreenSize, target: Point) -> Segment {
    Segment::new(screen.bottom_center(), target)
}

/// Anchor of the status label: horizontally centered, `y` pixels down.
pub fn status_anchor(screen: ScreenSize, y: i32) -> Point {
    Point::new(screen.width / 2, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosshair_for_reference_window() {
        // Arrange
        let rect = Rect::new(100, 100, 300, 300);

        // Act
        let cross = crosshair(&rect, 7);

        // Assert
        assert_eq!(cross.center, Point::new(200, 200));
        assert_eq!(
            cross.horizontal,
            Segment::new(Point::new(186, 200), Point::new(214, 200))
        );
        assert_eq!(
            cross.vertical,
            Segment::new(Point::new(200, 186), Point::new(200, 214))
        );
    }

    #[test]
    fn segments_are_four_radii_long() {
        for radius in [1, 7, 12, 50] {
            let cross = crosshair(&Rect::new(-40, 13, 977, 601), radius);
            assert_eq!(cross.horizontal.axis_length(), radius * 4);
            assert_eq!(cross.vertical.axis_length(), radius * 4);
        }
    }

    #[test]
    fn snap_line_starts_at_bottom_center() {
        // Arrange
        let screen = ScreenSize::new(1920, 1080);

        // Act
        let near = snap_line(screen, Point::new(200, 200));
        let far = snap_line(screen, Point::new(-500, 3000));

        // Assert
        assert_eq!(near.from, Point::new(960, 1080));
        assert_eq!(near.to, Point::new(200, 200));
        assert_eq!(far.from, Point::new(960, 1080));
        assert_eq!(far.to, Point::new(-500, 3000));
    }

    #[test]
    fn status_anchor_is_horizontally_centered() {
        let screen = ScreenSize::new(2560, 1440);
        assert_eq!(status_anchor(screen, 150), Point::new(1280, 150));
    }
}
