use crate::OverlayResult;
use crate::Rect;
use crate::locator::{self, MatchMode};

/// An opaque OS window handle, stored as a pointer-sized integer.
///
/// The OS owns the window behind it; holding a handle keeps nothing alive.
pub type WindowHandle = usize;

/// A top-level window as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
}

/// Per-handle geometry and liveness queries.
///
/// Each platform crate (e.g. `crossmark-windows`) provides its own
/// implementation. Implementations must be cheap to call every tick.
pub trait WindowGeometry {
    /// Returns the window rectangle in screen coordinates.
    ///
    /// A handle that no longer resolves yields `OverlayError::StaleHandle`;
    /// any other failure yields `OverlayError::GeometryQuery`.
    fn rect(&self, handle: WindowHandle) -> OverlayResult<Rect>;

    /// Returns whether the window is currently minimized.
    fn is_minimized(&self, handle: WindowHandle) -> bool;

    /// Returns whether the handle still references a live window.
    fn is_valid(&self, handle: WindowHandle) -> bool;

    /// True while at least one of `handles` is still a live window.
    fn any_valid(&self, handles: &[WindowHandle]) -> bool {
        handles.iter().any(|&h| self.is_valid(h))
    }
}

/// Enumerates top-level windows and picks the tracking targets.
pub trait WindowLocator {
    /// Returns every top-level window with its title and visibility.
    fn windows(&self) -> OverlayResult<Vec<WindowInfo>>;

    /// Returns the visible windows whose title matches `query`.
    fn find(&self, query: &str, mode: MatchMode) -> OverlayResult<Vec<WindowHandle>> {
        Ok(locator::select(&self.windows()?, query, mode))
    }
}
