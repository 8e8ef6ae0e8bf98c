/// A screen-space rectangle given by its edges, as reported by the OS.
///
/// `right` and `bottom` are exclusive, matching Win32 `RECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Midpoint of the rectangle, rounded toward negative infinity.
    ///
    /// Uses `div_euclid` so windows parked at negative coordinates
    /// (secondary monitors left of the primary) floor the same way
    /// positive ones do.
    pub fn center(&self) -> Point {
        Point {
            x: (self.left + self.right).div_euclid(2),
            y: (self.top + self.bottom).div_euclid(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_even_rect() {
        // Arrange
        let rect = Rect::new(100, 100, 300, 300);

        // Act
        let center = rect.center();

        // Assert
        assert_eq!(center, Point::new(200, 200));
    }

    #[test]
    fn center_floors_odd_sums() {
        let rect = Rect::new(0, 0, 5, 7);
        assert_eq!(rect.center(), Point::new(2, 3));
    }

    #[test]
    fn center_floors_negative_sums() {
        // (-3 + 0) / 2 floors to -2, not -1.
        let rect = Rect::new(-3, -3, 0, 0);
        assert_eq!(rect.center(), Point::new(-2, -2));
    }

    #[test]
    fn empty_rect_detection() {
        assert!(Rect::new(10, 10, 10, 40).is_empty());
        assert!(Rect::new(10, 40, 20, 10).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
        assert_eq!(Rect::new(10, 20, 110, 70).width(), 100);
        assert_eq!(Rect::new(10, 20, 110, 70).height(), 50);
    }
}
