use std::mem;

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

/// Returns the full window rectangle in screen coordinates.
///
/// On Windows 10/11 this includes the invisible resize borders
/// (~7px left/right/bottom) around the visible frame.
pub fn window_rect(hwnd: HWND) -> windows::core::Result<RECT> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect)? };
    Ok(rect)
}

/// Returns the visible bounds of a window using DWM extended frame bounds.
///
/// Falls back to `GetWindowRect` if DWM is unavailable.
pub fn visible_rect(hwnd: HWND) -> windows::core::Result<RECT> {
    let mut frame = RECT::default();
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    };

    match result {
        Ok(()) => Ok(frame),
        Err(_) => window_rect(hwnd),
    }
}
