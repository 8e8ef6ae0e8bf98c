//! Ctrl+C handling using `SetConsoleCtrlHandler`.
//!
//! The console handler runs on a system thread, so it cannot touch the
//! overlay. It posts a close request to the thread that owns the surface
//! and lets that thread tear everything down.

use std::sync::OnceLock;

use crossmark_core::{OverlayError, OverlayResult};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::Win32::UI::WindowsAndMessaging::PostThreadMessageW;

use crate::event_loop::WM_OVERLAY_CLOSE;
use crate::platform_error;

/// Owning thread id. Written once by `set_handler`, read by the callback.
static OWNER_THREAD: OnceLock<u32> = OnceLock::new();

/// Registers a Ctrl+C handler that asks `thread_id` to close the overlay.
pub fn set_handler(thread_id: u32) -> OverlayResult<()> {
    OWNER_THREAD
        .set(thread_id)
        .map_err(|_| OverlayError::Platform("Ctrl+C handler already registered".into()))?;
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }.map_err(platform_error)
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(&thread_id) = OWNER_THREAD.get()
    {
        unsafe {
            let _ = PostThreadMessageW(thread_id, WM_OVERLAY_CLOSE, WPARAM(0), LPARAM(0));
        }
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
