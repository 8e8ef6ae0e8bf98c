//! Overlay renderer: turns tracked window geometry into surface primitives.
//!
//! The renderer owns the table of which primitives belong to which
//! window. Every refresh erases a window's previous set before drawing
//! a new one, so at most one set per window exists on the surface.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::geometry::{self, ScreenSize};
use crate::rect::Rect;
use crate::style::OverlayStyle;
use crate::surface::{DrawSurface, PrimitiveId};
use crate::window::{WindowGeometry, WindowHandle};

/// Primitives drawn for one target window, with the inputs they were
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ElementSet {
    rect: Rect,
    screen: ScreenSize,
    horizontal: PrimitiveId,
    vertical: PrimitiveId,
    snap_line: Option<PrimitiveId>,
    status: Option<PrimitiveId>,
}

impl ElementSet {
    fn ids(&self) -> impl Iterator<Item = PrimitiveId> {
        [Some(self.horizontal), Some(self.vertical), self.snap_line, self.status]
            .into_iter()
            .flatten()
    }
}

/// Per-tick counts reported by [`OverlayRenderer::refresh`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Handles that still reference a live window.
    pub live: usize,
    /// Windows that got a fresh element set.
    pub drawn: usize,
    /// Windows whose geometry was unchanged, so their set was kept.
    pub unchanged: usize,
    /// Minimized windows whose elements were erased.
    pub hidden: usize,
    /// Live windows skipped because their geometry query failed.
    pub skipped: usize,
    /// Handles that no longer resolve.
    pub stale: usize,
}

impl RefreshOutcome {
    /// True once no tracked handle references a live window.
    pub fn all_gone(&self) -> bool {
        self.live == 0
    }
}

#[derive(Debug)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    screen: ScreenSize,
    drawn: HashMap<WindowHandle, ElementSet>,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle, screen: ScreenSize) -> Self {
        Self {
            style,
            screen,
            drawn: HashMap::new(),
        }
    }

    /// Updates the screen size used for snap-line and label anchors.
    ///
    /// Takes effect on the next refresh.
    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// Whether `handle` currently has primitives on the surface.
    #[cfg(test)]
    pub fn is_drawn(&self, handle: WindowHandle) -> bool {
        self.drawn.contains_key(&handle)
    }

    /// Number of primitives currently owned for `handle`.
    #[cfg(test)]
    pub fn primitive_count(&self, handle: WindowHandle) -> usize {
        self.drawn.get(&handle).map_or(0, |set| set.ids().count())
    }

    /// Re-queries every tracked window and redraws the elements of those
    /// that moved, then presents the surface.
    ///
    /// A window whose rectangle and screen are unchanged keeps its
    /// primitives untouched, so a steady overlay leaves the surface clean.
    /// Geometry failures are never propagated: a failing window keeps
    /// whatever it had for this tick and is retried on the next one.
    pub fn refresh<G, S>(
        &mut self,
        geometry: &G,
        handles: &[WindowHandle],
        surface: &mut S,
    ) -> RefreshOutcome
    where
        G: WindowGeometry + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let mut outcome = RefreshOutcome::default();

        for &handle in handles {
            if !geometry.is_valid(handle) {
                self.erase(handle, surface);
                outcome.stale += 1;
                continue;
            }
            outcome.live += 1;

            if geometry.is_minimized(handle) {
                self.erase(handle, surface);
                outcome.hidden += 1;
                continue;
            }

            let rect = match geometry.rect(handle) {
                Ok(rect) => rect,
                Err(e) if e.is_transient() => {
                    debug!("skipping 0x{handle:X} this tick: {e}");
                    outcome.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("skipping 0x{handle:X} this tick: {e}");
                    outcome.skipped += 1;
                    continue;
                }
            };

            if self
                .drawn
                .get(&handle)
                .is_some_and(|set| set.rect == rect && set.screen == self.screen)
            {
                outcome.unchanged += 1;
                continue;
            }

            self.erase(handle, surface);
            let set = self.draw(rect, surface);
            self.drawn.insert(handle, set);
            outcome.drawn += 1;
        }

        if let Err(e) = surface.present() {
            warn!("failed to present overlay: {e}");
        }

        outcome
    }

    /// Removes every primitive drawn for `handle`. No-op if none exist.
    pub fn erase<S: DrawSurface + ?Sized>(&mut self, handle: WindowHandle, surface: &mut S) {
        if let Some(set) = self.drawn.remove(&handle) {
            for id in set.ids() {
                surface.delete(id);
            }
        }
    }

    /// Removes the primitives of every tracked window.
    pub fn erase_all<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        for (_, set) in self.drawn.drain() {
            for id in set.ids() {
                surface.delete(id);
            }
        }
    }

    fn draw<S: DrawSurface + ?Sized>(&self, rect: Rect, surface: &mut S) -> ElementSet {
        let style = &self.style;
        let cross = geometry::crosshair(&rect, style.radius);

        let horizontal = surface.draw_line(cross.horizontal, style.crosshair, style.line_width);
        let vertical = surface.draw_line(cross.vertical, style.crosshair, style.line_width);

        let snap_line = style.show_snap_line.then(|| {
            let line = geometry::snap_line(self.screen, cross.center);
            surface.draw_line(line, style.snap_line, style.line_width)
        });

        let status = (style.show_status && !style.status_lines.is_empty()).then(|| {
            let anchor = geometry::status_anchor(self.screen, style.status_y);
            surface.draw_text(anchor, &style.status_lines, &style.font, style.text)
        });

        ElementSet {
            rect,
            screen: self.screen,
            horizontal,
            vertical,
            snap_line,
            status,
        }
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
