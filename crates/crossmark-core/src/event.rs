use std::fmt;

use crate::window::WindowHandle;

/// A message delivered to the context that owns the overlay surface.
///
/// Background threads and native callbacks never touch the surface;
/// they post one of these and the owning context acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMsg {
    /// Periodic tick from the refresh loop.
    Refresh,

    /// A tracked window moved, resized, minimized, restored or closed.
    TargetChanged { hwnd: WindowHandle },

    /// The display configuration changed; carries the new primary size.
    DisplayChanged { width: i32, height: i32 },

    /// Primary pointer button pressed at a surface-relative position.
    PointerDown { x: i32, y: i32 },

    /// Pointer moved to a surface-relative position.
    PointerMove { x: i32, y: i32 },

    /// Primary pointer button released.
    PointerUp,

    /// The refresh loop found no live target window and stopped.
    TargetsGone,

    /// The surface was closed or the user interrupted the process.
    Close,
}

impl fmt::Display for OverlayMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refresh => write!(f, "refresh"),
            Self::TargetChanged { hwnd } => write!(f, "target-changed 0x{hwnd:X}"),
            Self::DisplayChanged { width, height } => write!(f, "display-changed {width}x{height}"),
            Self::PointerDown { x, y } => write!(f, "pointer-down ({x},{y})"),
            Self::PointerMove { x, y } => write!(f, "pointer-move ({x},{y})"),
            Self::PointerUp => write!(f, "pointer-up"),
            Self::TargetsGone => write!(f, "targets-gone"),
            Self::Close => write!(f, "close"),
        }
    }
}
