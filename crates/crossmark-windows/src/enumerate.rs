use crossmark_core::{OverlayResult, WindowInfo, WindowLocator};
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::platform_error;
use crate::window::Window;

/// Enumerates every top-level window with its title and visibility.
///
/// Filtering (visibility, title match) is left to the caller so the
/// same list can back both target lookup and `crossmark list`.
pub fn enumerate_windows() -> OverlayResult<Vec<WindowInfo>> {
    let mut windows: Vec<WindowInfo> = Vec::new();

    // SAFETY: EnumWindows calls our callback synchronously for each
    // top-level window. The Vec pointer passed as LPARAM outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )
        .map_err(platform_error)?;
    }

    Ok(windows)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec<WindowInfo> pointer from enumerate_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<WindowInfo>) };

    let window = Window::new(hwnd);
    windows.push(WindowInfo {
        handle: window.handle(),
        title: window.title(),
        visible: window.is_visible(),
    });

    BOOL(1)
}

/// [`WindowLocator`] over the live Win32 desktop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Locator;

impl WindowLocator for Win32Locator {
    fn windows(&self) -> OverlayResult<Vec<WindowInfo>> {
        enumerate_windows()
    }
}
