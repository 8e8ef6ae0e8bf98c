//! Shared fakes for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::OverlayError;
use crate::window::{WindowGeometry, WindowHandle, WindowInfo, WindowLocator};
use crate::{OverlayResult, Rect};

#[derive(Debug, Default)]
struct FakeState {
    rects: HashMap<WindowHandle, Rect>,
    minimized: HashSet<WindowHandle>,
    broken: HashSet<WindowHandle>,
}

/// Geometry backed by a shared table so tests can mutate windows while
/// a refresh loop holds a clone.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeGeometry {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGeometry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_window(self, handle: WindowHandle, rect: Rect) -> Self {
        self.set_rect(handle, rect);
        self
    }

    pub(crate) fn set_rect(&self, handle: WindowHandle, rect: Rect) {
        self.state.lock().unwrap().rects.insert(handle, rect);
    }

    pub(crate) fn set_minimized(&self, handle: WindowHandle, minimized: bool) {
        let mut state = self.state.lock().unwrap();
        if minimized {
            state.minimized.insert(handle);
        } else {
            state.minimized.remove(&handle);
        }
    }

    /// Makes `rect` fail for a live window.
    pub(crate) fn set_broken(&self, handle: WindowHandle, broken: bool) {
        let mut state = self.state.lock().unwrap();
        if broken {
            state.broken.insert(handle);
        } else {
            state.broken.remove(&handle);
        }
    }

    pub(crate) fn close(&self, handle: WindowHandle) {
        self.state.lock().unwrap().rects.remove(&handle);
    }
}

impl WindowGeometry for FakeGeometry {
    fn rect(&self, handle: WindowHandle) -> OverlayResult<Rect> {
        let state = self.state.lock().unwrap();
        if state.broken.contains(&handle) {
            return Err(OverlayError::GeometryQuery {
                handle,
                reason: "simulated failure".into(),
            });
        }
        state
            .rects
            .get(&handle)
            .copied()
            .ok_or(OverlayError::StaleHandle { handle })
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        self.state.lock().unwrap().minimized.contains(&handle)
    }

    fn is_valid(&self, handle: WindowHandle) -> bool {
        self.state.lock().unwrap().rects.contains_key(&handle)
    }
}

/// Locator returning a fixed window list.
pub(crate) struct FakeLocator(pub(crate) Vec<WindowInfo>);

impl WindowLocator for FakeLocator {
    fn windows(&self) -> OverlayResult<Vec<WindowInfo>> {
        Ok(self.0.clone())
    }
}
