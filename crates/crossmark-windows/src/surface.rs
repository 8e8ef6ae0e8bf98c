//! The transparent overlay surface.
//!
//! A single layered, topmost popup covering the virtual screen. Drawn
//! primitives live in a [`Scene`]; `present` rasterizes the scene into a
//! persistent DIB and pushes it with `UpdateLayeredWindow`, so nothing
//! is painted in response to `WM_PAINT`.

use std::mem;
use std::sync::Once;

use crossmark_core::{
    Color, DrawSurface, FontSpec, OverlayError, OverlayMsg, OverlayResult, Point, Primitive,
    PrimitiveId, Rect, Scene, Segment,
};
use tracing::debug;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION, CreateCompatibleDC, CreateDIBSection,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, HBITMAP, HDC, HGDIOBJ, ReleaseDC, SelectObject,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_TOPMOST, RegisterClassW, SET_WINDOW_POS_FLAGS,
    SWP_NOACTIVATE, SWP_NOSIZE, SWP_SHOWWINDOW, SetWindowPos, ULW_ALPHA, UpdateLayeredWindow, WINDOW_EX_STYLE,
    WM_CLOSE, WM_DISPLAYCHANGE, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WNDCLASSW,
    WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::w;

use crate::raster::{self, DrawCtx};
use crate::{event, platform_error, screen};

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(overlay_wnd_proc),
            lpszClassName: w!("CrossmarkOverlay"),
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

/// Extracts the signed client coordinates packed into a mouse `LPARAM`.
fn pointer_position(lparam: LPARAM) -> (i32, i32) {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    (x, y)
}

/// Turns surface input into overlay messages. Drawing never happens here.
unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_LBUTTONDOWN => {
            let (x, y) = pointer_position(lparam);
            unsafe {
                SetCapture(hwnd);
            }
            event::send(OverlayMsg::PointerDown { x, y });
            LRESULT(0)
        }
        WM_MOUSEMOVE => {
            let (x, y) = pointer_position(lparam);
            event::send(OverlayMsg::PointerMove { x, y });
            LRESULT(0)
        }
        WM_LBUTTONUP => {
            unsafe {
                let _ = ReleaseCapture();
            }
            event::send(OverlayMsg::PointerUp);
            LRESULT(0)
        }
        WM_DISPLAYCHANGE => {
            let size = screen::primary_size();
            event::send(OverlayMsg::DisplayChanged {
                width: size.width,
                height: size.height,
            });
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
        // The session tears the window down; closing only requests it.
        WM_CLOSE => {
            event::send(OverlayMsg::Close);
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// A memory DC with a selected top-down 32-bit DIB.
struct Canvas {
    dc: HDC,
    bmp: HBITMAP,
    old: HGDIOBJ,
    bits: *mut u32,
    w: i32,
    h: i32,
}

impl Canvas {
    fn new(w: i32, h: i32) -> OverlayResult<Self> {
        if w <= 0 || h <= 0 {
            return Err(OverlayError::Surface(format!("invalid surface size {w}x{h}")));
        }

        unsafe {
            let screen_dc = GetDC(None);
            let dc = CreateCompatibleDC(Some(screen_dc));
            let _ = ReleaseDC(None, screen_dc);

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: w,
                    biHeight: -h, // top-down
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let mut bits = std::ptr::null_mut();
            let bmp = match CreateDIBSection(Some(dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
                Ok(bmp) if !bits.is_null() => bmp,
                Ok(bmp) => {
                    let _ = DeleteObject(bmp.into());
                    let _ = DeleteDC(dc);
                    return Err(OverlayError::Surface("DIB section has no pixels".into()));
                }
                Err(e) => {
                    let _ = DeleteDC(dc);
                    return Err(platform_error(e));
                }
            };
            let old = SelectObject(dc, bmp.into());

            Ok(Self {
                dc,
                bmp,
                old,
                bits: bits as *mut u32,
                w,
                h,
            })
        }
    }

    fn pixels(&mut self) -> &mut [u32] {
        // SAFETY: `bits` is non-null (checked in `new`) and points to
        // `w * h` pixels owned by `bmp`, which lives as long as `self`.
        unsafe { std::slice::from_raw_parts_mut(self.bits, (self.w * self.h) as usize) }
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc, self.old);
            let _ = DeleteObject(self.bmp.into());
            let _ = DeleteDC(self.dc);
        }
    }
}

/// The overlay window and its retained primitives.
pub struct LayeredSurface {
    hwnd: HWND,
    scene: Scene,
    canvas: Canvas,
    /// Screen coordinate mapped to canvas pixel (0, 0).
    origin: Point,
    /// Current top-left of the window; differs from `origin` after a drag.
    position: Point,
    /// Redraw on the next present even if the scene is unchanged.
    stale: bool,
}

impl LayeredSurface {
    /// Creates and shows an empty overlay covering `bounds`.
    ///
    /// When `interactive` is false the window is click-through
    /// (`WS_EX_TRANSPARENT`); otherwise drawn pixels receive the mouse.
    pub fn new(bounds: Rect, interactive: bool) -> OverlayResult<Self> {
        ensure_class_registered();

        let canvas = Canvas::new(bounds.width(), bounds.height())?;

        let mut ex: WINDOW_EX_STYLE =
            WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST | WS_EX_NOACTIVATE;
        if !interactive {
            ex |= WS_EX_TRANSPARENT;
        }

        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                w!("CrossmarkOverlay"),
                w!("crossmark"),
                WS_POPUP,
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
                None,
                None,
                None,
                None,
            )
            .map_err(platform_error)?
        };

        let origin = Point::new(bounds.left, bounds.top);
        let mut surface = Self {
            hwnd,
            scene: Scene::new(),
            canvas,
            origin,
            position: origin,
            stale: true,
        };
        surface.present()?;
        surface.place(bounds.width(), bounds.height(), SWP_NOACTIVATE | SWP_SHOWWINDOW);

        debug!(
            "overlay surface created at ({},{}) {}x{}",
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height()
        );
        Ok(surface)
    }

    /// Re-covers `bounds` after a display change. Resets any drag offset.
    pub fn resize(&mut self, bounds: Rect) -> OverlayResult<()> {
        self.canvas = Canvas::new(bounds.width(), bounds.height())?;
        self.origin = Point::new(bounds.left, bounds.top);
        self.position = self.origin;
        self.stale = true;
        self.place(bounds.width(), bounds.height(), SWP_NOACTIVATE);
        Ok(())
    }

    fn place(&self, w: i32, h: i32, flags: SET_WINDOW_POS_FLAGS) {
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                self.position.x,
                self.position.y,
                w,
                h,
                flags,
            );
        }
    }

    fn render(&mut self) -> OverlayResult<()> {
        let dc = self.canvas.dc;
        let (w, h) = (self.canvas.w, self.canvas.h);
        let buf = self.canvas.pixels();
        buf.fill(0);

        let mut ctx = DrawCtx {
            dc,
            buf,
            w,
            h,
            origin: self.origin,
        };
        for primitive in self.scene.iter() {
            match primitive {
                Primitive::Line {
                    segment,
                    color,
                    width,
                } => raster::draw_line(&mut ctx, *segment, *color, *width),
                Primitive::Text {
                    origin,
                    lines,
                    font,
                    color,
                } => raster::draw_text(&mut ctx, *origin, lines, font, *color),
            }
        }

        let blend = BLENDFUNCTION {
            BlendOp: 0,               // AC_SRC_OVER
            SourceConstantAlpha: 255, // per-pixel alpha only
            AlphaFormat: 1,           // AC_SRC_ALPHA
            ..Default::default()
        };

        unsafe {
            let screen_dc = GetDC(None);
            let result = UpdateLayeredWindow(
                self.hwnd,
                Some(screen_dc),
                Some(&POINT {
                    x: self.position.x,
                    y: self.position.y,
                }),
                Some(&SIZE { cx: w, cy: h }),
                Some(dc),
                Some(&POINT::default()),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            );
            let _ = ReleaseDC(None, screen_dc);
            result.map_err(|e| OverlayError::Surface(e.to_string()))
        }
    }
}

impl DrawSurface for LayeredSurface {
    fn draw_line(&mut self, segment: Segment, color: Color, width: i32) -> PrimitiveId {
        self.scene.draw_line(segment, color, width)
    }

    fn draw_text(
        &mut self,
        origin: Point,
        lines: &[String],
        font: &FontSpec,
        color: Color,
    ) -> PrimitiveId {
        self.scene.draw_text(origin, lines, font, color)
    }

    fn delete(&mut self, id: PrimitiveId) {
        self.scene.delete(id);
    }

    fn clear(&mut self) {
        self.scene.clear();
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.scene.move_by(dx, dy);
        self.position.x += dx;
        self.position.y += dy;
        self.place(0, 0, SWP_NOACTIVATE | SWP_NOSIZE);
    }

    fn present(&mut self) -> OverlayResult<()> {
        if self.scene.is_dirty() || self.stale {
            self.render()?;
            self.stale = false;
        }
        self.scene.present()
    }
}

impl Drop for LayeredSurface {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
