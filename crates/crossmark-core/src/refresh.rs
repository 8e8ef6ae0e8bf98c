//! Background refresh loop.
//!
//! The loop never draws. Each tick it checks that some tracked window is
//! still alive, sleeps for the interval, then hands an
//! [`OverlayMsg::Refresh`] to a notifier that forwards it into the
//! surface owner's queue.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::event::OverlayMsg;
use crate::window::{WindowGeometry, WindowHandle};

/// Default delay between refresh ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30);

/// Why the refresh loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshExit {
    /// No tracked handle references a live window any more.
    TargetsGone,
    /// `stop` or `join` was called.
    Stopped,
    /// The notifier reported that the owning context is gone.
    Disconnected,
}

/// Handle to the running refresh thread.
pub struct RefreshLoop {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<RefreshExit>,
}

impl RefreshLoop {
    /// Starts the loop on its own thread.
    ///
    /// `notify` returns `false` when the receiving side has gone away,
    /// which ends the loop. When every handle becomes invalid the loop
    /// sends [`OverlayMsg::TargetsGone`] once and exits.
    pub fn spawn<G, F>(
        geometry: G,
        handles: Vec<WindowHandle>,
        interval: Duration,
        mut notify: F,
    ) -> Self
    where
        G: WindowGeometry + Send + 'static,
        F: FnMut(OverlayMsg) -> bool + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            debug!(
                "refresh loop started ({} targets, {}ms)",
                handles.len(),
                interval.as_millis()
            );
            loop {
                if stop_flag.load(Ordering::Relaxed) {
                    return RefreshExit::Stopped;
                }
                if !geometry.any_valid(&handles) {
                    info!("all target windows are gone");
                    let _ = notify(OverlayMsg::TargetsGone);
                    return RefreshExit::TargetsGone;
                }
                thread::sleep(interval);
                if stop_flag.load(Ordering::Relaxed) {
                    return RefreshExit::Stopped;
                }
                if !notify(OverlayMsg::Refresh) {
                    return RefreshExit::Disconnected;
                }
            }
        });

        Self { stop, handle }
    }

    /// Asks the loop to stop after its current sleep.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the loop and waits for the thread to exit.
    pub fn join(self) -> RefreshExit {
        self.stop();
        self.handle.join().unwrap_or(RefreshExit::Stopped)
    }
}
