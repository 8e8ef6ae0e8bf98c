//! The overlay session: everything the surface-owning context does in
//! response to [`OverlayMsg`]s.

use tracing::{debug, info, warn};

use crate::drag::DragState;
use crate::error::OverlayError;
use crate::event::OverlayMsg;
use crate::geometry::ScreenSize;
use crate::rect::Point;
use crate::renderer::{OverlayRenderer, RefreshOutcome};
use crate::surface::DrawSurface;
use crate::window::{WindowGeometry, WindowHandle};
use crate::OverlayResult;

/// Lifecycle of the overlay process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Starting,
    Tracking,
    Terminated,
}

/// What the owning context should do after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Owns the surface, the renderer and the tracked handle set.
pub struct OverlaySession<G, S> {
    geometry: G,
    surface: S,
    renderer: OverlayRenderer,
    handles: Vec<WindowHandle>,
    drag: DragState,
    interactive: bool,
    state: OverlayState,
}

impl<G: WindowGeometry, S: DrawSurface> OverlaySession<G, S> {
    /// Starts tracking `handles` and draws the first frame.
    ///
    /// Fails with [`OverlayError::NotFound`] when `handles` is empty; the
    /// caller should report it and exit without showing a surface.
    pub fn start(
        query: &str,
        handles: Vec<WindowHandle>,
        geometry: G,
        surface: S,
        renderer: OverlayRenderer,
        interactive: bool,
    ) -> OverlayResult<Self> {
        if handles.is_empty() {
            return Err(OverlayError::NotFound {
                query: query.to_string(),
            });
        }

        let mut session = Self {
            geometry,
            surface,
            renderer,
            handles,
            drag: DragState::default(),
            interactive,
            state: OverlayState::Starting,
        };
        session.state = OverlayState::Tracking;
        info!("tracking {} window(s) matching '{query}'", session.handles.len());
        session.refresh();
        Ok(session)
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Applies one message. Returns [`Control::Exit`] once the session
    /// has terminated; a terminated session ignores further messages.
    pub fn handle(&mut self, msg: OverlayMsg) -> Control {
        if self.state == OverlayState::Terminated {
            return Control::Exit;
        }

        match msg {
            OverlayMsg::Refresh => self.refresh_or_terminate(),
            OverlayMsg::TargetChanged { hwnd } => {
                if self.handles.contains(&hwnd) {
                    debug!("target 0x{hwnd:X} changed, refreshing now");
                    self.refresh_or_terminate()
                } else {
                    Control::Continue
                }
            }
            OverlayMsg::DisplayChanged { width, height } => {
                info!("display changed to {width}x{height}");
                self.renderer.set_screen(ScreenSize::new(width, height));
                self.refresh_or_terminate()
            }
            OverlayMsg::PointerDown { x, y } => {
                if self.interactive {
                    self.drag.press(Point::new(x, y));
                }
                Control::Continue
            }
            OverlayMsg::PointerMove { x, y } => {
                if let Some((dx, dy)) = self.drag.motion(Point::new(x, y)) {
                    self.surface.move_by(dx, dy);
                }
                Control::Continue
            }
            OverlayMsg::PointerUp => {
                self.drag.release();
                Control::Continue
            }
            OverlayMsg::TargetsGone | OverlayMsg::Close => {
                self.terminate();
                Control::Exit
            }
        }
    }

    fn refresh(&mut self) -> RefreshOutcome {
        self.renderer
            .refresh(&self.geometry, &self.handles, &mut self.surface)
    }

    fn refresh_or_terminate(&mut self) -> Control {
        let outcome = self.refresh();
        if outcome.all_gone() {
            self.terminate();
            return Control::Exit;
        }
        Control::Continue
    }

    fn terminate(&mut self) {
        self.renderer.erase_all(&mut self.surface);
        if let Err(e) = self.surface.present() {
            warn!("failed to clear overlay: {e}");
        }
        self.drag.release();
        self.state = OverlayState::Terminated;
        info!("overlay session terminated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;
    use crate::scene::Scene;
    use crate::style::OverlayStyle;
    use crate::testing::FakeGeometry;

    const A: WindowHandle = 0xA0;
    const B: WindowHandle = 0xB0;

    fn start(
        geometry: &FakeGeometry,
        handles: Vec<WindowHandle>,
        interactive: bool,
    ) -> OverlaySession<FakeGeometry, Scene> {
        let renderer = OverlayRenderer::new(OverlayStyle::default(), ScreenSize::new(1920, 1080));
        OverlaySession::start(
            "Rechner",
            handles,
            geometry.clone(),
            Scene::new(),
            renderer,
            interactive,
        )
        .unwrap()
    }

    #[test]
    fn empty_target_set_is_not_found() {
        // Arrange
        let renderer = OverlayRenderer::new(OverlayStyle::default(), ScreenSize::new(1920, 1080));

        // Act
        let result = OverlaySession::start(
            "Rechner",
            Vec::new(),
            FakeGeometry::new(),
            Scene::new(),
            renderer,
            false,
        );

        // Assert
        assert!(matches!(result, Err(OverlayError::NotFound { query }) if query == "Rechner"));
    }

    #[test]
    fn start_draws_first_frame_and_tracks() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));

        let session = start(&geometry, vec![A], false);

        assert_eq!(session.state(), OverlayState::Tracking);
        assert_eq!(session.surface().len(), 4);
    }

    #[test]
    fn refresh_follows_window_movement() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);

        geometry.set_rect(A, Rect::new(0, 0, 100, 100));
        let control = session.handle(OverlayMsg::Refresh);

        assert_eq!(control, Control::Continue);
        assert!(
            session
                .surface()
                .lines()
                .iter()
                .any(|s| s.from == Point::new(36, 50) && s.to == Point::new(64, 50))
        );
    }

    #[test]
    fn closing_every_target_terminates() {
        // Arrange
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);

        // Act
        geometry.close(A);
        let control = session.handle(OverlayMsg::Refresh);

        // Assert
        assert_eq!(control, Control::Exit);
        assert_eq!(session.state(), OverlayState::Terminated);
        assert!(session.surface().is_empty());
    }

    #[test]
    fn terminated_session_makes_no_draw_calls() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);
        session.handle(OverlayMsg::TargetsGone);
        let presents = session.surface().presents();

        assert_eq!(session.handle(OverlayMsg::Refresh), Control::Exit);
        assert_eq!(
            session.handle(OverlayMsg::TargetChanged { hwnd: A }),
            Control::Exit
        );

        assert!(session.surface().is_empty());
        assert_eq!(session.surface().presents(), presents);
    }

    #[test]
    fn close_clears_the_surface() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);

        assert_eq!(session.handle(OverlayMsg::Close), Control::Exit);

        assert!(session.surface().is_empty());
        assert!(!session.surface().is_dirty());
    }

    #[test]
    fn untracked_target_change_is_ignored() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);
        let presents = session.surface().presents();

        session.handle(OverlayMsg::TargetChanged { hwnd: B });

        assert_eq!(session.surface().presents(), presents);
    }

    #[test]
    fn tracked_target_change_refreshes_immediately() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);

        geometry.set_minimized(A, true);
        session.handle(OverlayMsg::TargetChanged { hwnd: A });

        assert!(session.surface().is_empty());
        assert_eq!(session.state(), OverlayState::Tracking);
    }

    #[test]
    fn display_change_moves_snap_anchor() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);

        session.handle(OverlayMsg::DisplayChanged {
            width: 1280,
            height: 720,
        });

        assert!(
            session
                .surface()
                .lines()
                .iter()
                .any(|s| s.from == Point::new(640, 720))
        );
    }

    #[test]
    fn drag_moves_surface_when_interactive() {
        // Arrange
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], true);

        // Act
        session.handle(OverlayMsg::PointerDown { x: 10, y: 10 });
        session.handle(OverlayMsg::PointerMove { x: 25, y: 5 });
        session.handle(OverlayMsg::PointerUp);
        session.handle(OverlayMsg::PointerMove { x: 90, y: 90 });

        // Assert
        assert_eq!(session.surface().offset(), Point::new(15, -5));
        assert_eq!(session.surface().len(), 4);
    }

    #[test]
    fn drag_is_ignored_when_click_through() {
        let geometry = FakeGeometry::new().with_window(A, Rect::new(100, 100, 300, 300));
        let mut session = start(&geometry, vec![A], false);

        session.handle(OverlayMsg::PointerDown { x: 10, y: 10 });
        session.handle(OverlayMsg::PointerMove { x: 25, y: 5 });

        assert_eq!(session.surface().offset(), Point::new(0, 0));
    }
}
