use crossmark_core::config::FrameMode;
use crossmark_core::{OverlayError, OverlayResult, Rect, WindowGeometry, WindowHandle};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowTextLengthW, GetWindowTextW, IsIconic, IsWindow, IsWindowVisible,
};

use crate::frame;

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle owned by the OS. This struct only holds
/// the handle and queries the OS on demand.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a `Window` from a raw handle value, so callers need not
    /// depend on the `windows` crate.
    pub fn from_raw(handle: WindowHandle) -> Self {
        Self {
            hwnd: HWND(handle as *mut _),
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Returns the raw handle value.
    pub fn handle(&self) -> WindowHandle {
        self.hwnd.0 as usize
    }

    /// Returns the window title, or an empty string if it has none.
    pub fn title(&self) -> String {
        // SAFETY: GetWindowTextLengthW and GetWindowTextW only read
        // window text; a dead handle yields length 0.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    pub fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    pub fn is_minimized(&self) -> bool {
        unsafe { IsIconic(self.hwnd).as_bool() }
    }

    /// Returns whether the handle still references a window.
    pub fn is_valid(&self) -> bool {
        !self.hwnd.is_invalid() && unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    /// Returns the window bounds in screen coordinates.
    pub fn rect(&self, frame: FrameMode) -> OverlayResult<Rect> {
        if !self.is_valid() {
            return Err(OverlayError::StaleHandle {
                handle: self.handle(),
            });
        }

        let raw = match frame {
            FrameMode::Window => frame::window_rect(self.hwnd),
            FrameMode::Visible => frame::visible_rect(self.hwnd),
        };

        raw.map(to_rect).map_err(|e| OverlayError::GeometryQuery {
            handle: self.handle(),
            reason: e.to_string(),
        })
    }
}

pub(crate) fn to_rect(r: RECT) -> Rect {
    Rect::new(r.left, r.top, r.right, r.bottom)
}

/// [`WindowGeometry`] backed by live Win32 queries.
///
/// Holds no handles, so it can be copied into the refresh thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Geometry {
    frame: FrameMode,
}

impl Win32Geometry {
    pub fn new(frame: FrameMode) -> Self {
        Self { frame }
    }
}

impl WindowGeometry for Win32Geometry {
    fn rect(&self, handle: WindowHandle) -> OverlayResult<Rect> {
        Window::from_raw(handle).rect(self.frame)
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        Window::from_raw(handle).is_minimized()
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        Window::from_raw(handle).is_valid()
    }
}
