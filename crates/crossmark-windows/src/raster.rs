//! GDI rasterization of retained primitives onto a 32-bit DIB.
//!
//! The DIB starts fully transparent (all zero). GDI writes color but
//! leaves alpha at zero, so after drawing each primitive we set alpha to
//! 0xFF for every non-zero pixel inside its bounding box. Black pixels
//! stay transparent, which makes black the surface's color key.

use crossmark_core::{Color, FontSpec, Point, Rect, Segment};
use windows::Win32::Foundation::{COLORREF, SIZE};
use windows::Win32::Graphics::Gdi::{
    CreateFontW, CreatePen, DeleteObject, FONT_CHARSET, FONT_CLIP_PRECISION,
    FONT_OUTPUT_PRECISION, GdiFlush, GetTextExtentPoint32W, HDC, LineTo, MoveToEx,
    NONANTIALIASED_QUALITY, PS_SOLID, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
    TextOutW,
};
use windows::core::PCWSTR;

/// GDI target plus the pixel buffer behind it.
pub struct DrawCtx<'a> {
    pub dc: HDC,
    pub buf: &'a mut [u32],
    pub w: i32,
    pub h: i32,
    /// Screen coordinate of pixel (0, 0).
    pub origin: Point,
}

impl DrawCtx<'_> {
    fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.origin.x, p.y - self.origin.y)
    }
}

fn colorref(c: Color) -> COLORREF {
    COLORREF(c.to_colorref())
}

/// Draws a line and makes its pixels opaque.
pub fn draw_line(ctx: &mut DrawCtx, segment: Segment, color: Color, width: i32) {
    let from = ctx.to_local(segment.from);
    let to = ctx.to_local(segment.to);

    unsafe {
        let pen = CreatePen(PS_SOLID, width, colorref(color));
        let old = SelectObject(ctx.dc, pen.into());
        let _ = MoveToEx(ctx.dc, from.x, from.y, None);
        let _ = LineTo(ctx.dc, to.x, to.y);
        SelectObject(ctx.dc, old);
        let _ = DeleteObject(pen.into());
    }

    let pad = width.max(1);
    let bounds = Rect::new(
        from.x.min(to.x) - pad,
        from.y.min(to.y) - pad,
        from.x.max(to.x) + pad + 1,
        from.y.max(to.y) + pad + 1,
    );
    fix_alpha_region(ctx, bounds);
}

/// Draws text lines centered on `anchor.x`, starting at `anchor.y`.
pub fn draw_text(ctx: &mut DrawCtx, anchor: Point, lines: &[String], font: &FontSpec, color: Color) {
    let anchor = ctx.to_local(anchor);
    let family: Vec<u16> = font.family.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        // Antialiasing would blend glyph edges toward the black key and
        // leave dark fringes, so glyphs are drawn without it.
        let hfont = CreateFontW(
            font.size,
            0,
            0,
            0,
            700,
            0,
            0,
            0,
            FONT_CHARSET(0),
            FONT_OUTPUT_PRECISION(0),
            FONT_CLIP_PRECISION(0),
            NONANTIALIASED_QUALITY,
            0,
            PCWSTR(family.as_ptr()),
        );
        let old = SelectObject(ctx.dc, hfont.into());
        let _ = SetBkMode(ctx.dc, TRANSPARENT);
        let _ = SetTextColor(ctx.dc, colorref(color));

        let mut y = anchor.y;
        for line in lines {
            let wide: Vec<u16> = line.encode_utf16().collect();
            let mut size = SIZE::default();
            let _ = GetTextExtentPoint32W(ctx.dc, &wide, &mut size);
            let x = anchor.x - size.cx / 2;
            if !wide.is_empty() {
                let _ = TextOutW(ctx.dc, x, y, &wide);
            }
            fix_alpha_region(ctx, Rect::new(x, y, x + size.cx, y + size.cy));
            y += size.cy.max(font.size);
        }

        SelectObject(ctx.dc, old);
        let _ = DeleteObject(hfont.into());
    }
}

/// Sets alpha to 0xFF for non-zero pixels in a region.
fn fix_alpha_region(ctx: &mut DrawCtx, region: Rect) {
    // Pending GDI calls must land in the buffer before we read it.
    unsafe {
        let _ = GdiFlush();
    }

    let x0 = region.left.max(0);
    let y0 = region.top.max(0);
    let x1 = region.right.min(ctx.w);
    let y1 = region.bottom.min(ctx.h);

    for py in y0..y1 {
        for px in x0..x1 {
            let idx = (py * ctx.w + px) as usize;
            if let Some(pixel) = ctx.buf.get_mut(idx)
                && *pixel & 0x00FF_FFFF != 0
            {
                *pixel |= 0xFF00_0000;
            }
        }
    }
}
