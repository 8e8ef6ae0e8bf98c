use crate::rect::Point;

/// Tracks a press-and-drag gesture on the overlay surface.
///
/// Pointer positions are relative to the surface. Because the surface
/// follows the pointer, the grab point keeps the same relative position
/// and the anchor never needs updating mid-drag.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragState {
    anchor: Option<Point>,
}

impl DragState {
    /// Records where the primary button went down.
    pub fn press(&mut self, at: Point) {
        self.anchor = Some(at);
    }

    /// Returns the delta to move the surface by, or `None` when no
    /// button is held.
    pub fn motion(&self, at: Point) -> Option<(i32, i32)> {
        let anchor = self.anchor?;
        let delta = (at.x - anchor.x, at.y - anchor.y);
        (delta != (0, 0)).then_some(delta)
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_without_press_does_nothing() {
        let drag = DragState::default();
        assert_eq!(drag.motion(Point::new(10, 10)), None);
    }

    #[test]
    fn motion_reports_delta_from_press_point() {
        // Arrange
        let mut drag = DragState::default();
        drag.press(Point::new(40, 50));

        // Act
        let delta = drag.motion(Point::new(55, 30));

        // Assert
        assert_eq!(delta, Some((15, -20)));
        assert!(drag.is_dragging());
    }

    #[test]
    fn zero_delta_is_ignored() {
        let mut drag = DragState::default();
        drag.press(Point::new(5, 5));
        assert_eq!(drag.motion(Point::new(5, 5)), None);
    }

    #[test]
    fn release_ends_the_gesture() {
        let mut drag = DragState::default();
        drag.press(Point::new(0, 0));

        drag.release();

        assert!(!drag.is_dragging());
        assert_eq!(drag.motion(Point::new(9, 9)), None);
    }
}
