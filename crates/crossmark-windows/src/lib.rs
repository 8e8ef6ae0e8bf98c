//! Win32 implementation of the crossmark window and surface capabilities.
//!
//! Everything here is Windows-only; on other targets the crate is empty.
#![cfg(windows)]

/// Console Ctrl+C handling.
pub mod ctrl_c;

/// Win32 top-level window enumeration.
pub mod enumerate;

/// Overlay message pump and session wiring.
pub mod event_loop;

/// Screen metrics and DPI awareness.
pub mod screen;

/// Transparent layered overlay surface.
pub mod surface;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

mod event;
mod frame;
mod raster;

pub use enumerate::{Win32Locator, enumerate_windows};
pub use event_loop::{RunOptions, RunSummary, run};
pub use surface::LayeredSurface;
pub use window::{Win32Geometry, Window};

/// Wraps a `windows` crate error as a platform overlay error.
pub(crate) fn platform_error(e: windows::core::Error) -> crossmark_core::OverlayError {
    crossmark_core::OverlayError::Platform(e.to_string())
}
