use crossmark_core::{Rect, ScreenSize};
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXSCREEN, SM_CXVIRTUALSCREEN, SM_CYSCREEN, SM_CYVIRTUALSCREEN,
    SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

/// Opts into per-monitor DPI awareness so window rectangles and the
/// overlay share the same physical-pixel coordinate space.
///
/// Call once before creating the surface. Failure (e.g. awareness
/// already set by a manifest) is ignored.
pub fn enable_dpi_awareness() {
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Size of the primary display. Anchors the snap line and status label.
pub fn primary_size() -> ScreenSize {
    unsafe { ScreenSize::new(GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
}

/// Bounding rectangle of all monitors. The overlay surface covers it.
///
/// The origin is negative when a monitor sits left of or above the
/// primary one.
pub fn virtual_rect() -> Rect {
    unsafe {
        let x = GetSystemMetrics(SM_XVIRTUALSCREEN);
        let y = GetSystemMetrics(SM_YVIRTUALSCREEN);
        let w = GetSystemMetrics(SM_CXVIRTUALSCREEN);
        let h = GetSystemMetrics(SM_CYVIRTUALSCREEN);
        Rect::new(x, y, x + w, y + h)
    }
}
