//! The overlay's owning thread: surface, session and message pump.
//!
//! Three sources feed the session, all on the calling thread:
//! - the refresh loop posts `WM_OVERLAY_*` thread messages;
//! - the WinEvent hook and the surface's window procedure push
//!   [`OverlayMsg`]s into a channel through [`crate::event`] and post
//!   `WM_OVERLAY_WAKE`;
//! - the Ctrl+C handler posts `WM_OVERLAY_CLOSE`.
//!
//! Thread messages are handled as they arrive. The channel is drained
//! after every message, so a wake-up applies callback messages at once.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossmark_core::config::FrameMode;
use crossmark_core::{
    Control, MatchMode, OverlayError, OverlayMsg, OverlayRenderer, OverlayResult, OverlaySession,
    OverlayStyle, RefreshExit, RefreshLoop, WindowHandle, WindowLocator,
};
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PostThreadMessageW, TranslateMessage, WINEVENT_OUTOFCONTEXT,
    WINEVENT_SKIPOWNPROCESS, WM_APP,
};

use crate::enumerate::Win32Locator;
use crate::surface::LayeredSurface;
use crate::window::Win32Geometry;
use crate::{ctrl_c, event, screen};

/// Thread message: the refresh loop asks for a refresh.
pub(crate) const WM_OVERLAY_REFRESH: u32 = WM_APP + 1;

/// Thread message: the refresh loop found no live target.
pub(crate) const WM_OVERLAY_GONE: u32 = WM_APP + 2;

/// Thread message: close requested (Ctrl+C).
pub(crate) const WM_OVERLAY_CLOSE: u32 = WM_APP + 3;

/// Thread message: a native callback queued messages in the channel.
pub(crate) const WM_OVERLAY_WAKE: u32 = WM_APP + 4;

type Session = OverlaySession<Win32Geometry, LayeredSurface>;

/// A thread message addressed to the pump rather than to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThreadMessage {
    Overlay(OverlayMsg),
    Wake,
}

/// What to track and how to draw it.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub query: String,
    pub mode: MatchMode,
    pub frame: FrameMode,
    pub style: OverlayStyle,
    pub interval: Duration,
    pub interactive: bool,
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of windows tracked.
    pub tracked: usize,
    /// How the refresh loop stopped.
    pub exit: RefreshExit,
}

/// Tracks the matching windows until they are all gone or the overlay
/// is closed. Blocks the calling thread, which becomes the surface owner.
///
/// Returns [`OverlayError::NotFound`] before any surface is created when
/// no visible window matches.
pub fn run(options: RunOptions) -> OverlayResult<RunSummary> {
    screen::enable_dpi_awareness();

    let handles = Win32Locator.find(&options.query, options.mode)?;
    if handles.is_empty() {
        return Err(OverlayError::NotFound {
            query: options.query,
        });
    }
    debug!("found {} target(s): {handles:X?}", handles.len());

    let (tx, rx) = mpsc::channel();
    let thread_id = unsafe { GetCurrentThreadId() };
    event::install(tx, handles.clone(), thread_id);
    let result = track(&options, handles, thread_id, &rx);
    event::uninstall();
    result
}

fn track(
    options: &RunOptions,
    handles: Vec<WindowHandle>,
    thread_id: u32,
    rx: &Receiver<OverlayMsg>,
) -> OverlayResult<RunSummary> {
    let tracked = handles.len();
    let geometry = Win32Geometry::new(options.frame);
    let surface = LayeredSurface::new(screen::virtual_rect(), options.interactive)?;
    let style = options
        .style
        .clone()
        .with_status_context(&options.query, tracked);
    let renderer = OverlayRenderer::new(style, screen::primary_size());

    let mut session = OverlaySession::start(
        &options.query,
        handles.clone(),
        geometry,
        surface,
        renderer,
        options.interactive,
    )?;

    let hook = install_target_hook();
    let refresh = RefreshLoop::spawn(geometry, handles, options.interval, move |msg| {
        post(thread_id, msg)
    });
    if let Err(e) = ctrl_c::set_handler(thread_id) {
        warn!("Ctrl+C handler not installed: {e}");
    }

    pump(&mut session, rx);

    let exit = refresh.join();
    if let Some(hook) = hook {
        unsafe {
            let _ = UnhookWinEvent(hook);
        }
    }
    info!("overlay closed ({exit:?}, session {:?})", session.state());
    drop(session);

    Ok(RunSummary { tracked, exit })
}

/// Subscribes to location and state changes of other processes' windows.
/// The refresh loop still covers the targets when this fails.
fn install_target_hook() -> Option<HWINEVENTHOOK> {
    // SAFETY: the callback only touches this thread's routing state, and
    // WINEVENT_OUTOFCONTEXT delivers it on this thread's message pump.
    let hook = unsafe {
        SetWinEventHook(
            event::EVENT_MIN,
            event::EVENT_MAX,
            None,
            Some(win_event_proc),
            0,
            0,
            WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
        )
    };
    if hook.is_invalid() {
        warn!("WinEvent hook unavailable, relying on periodic refresh");
        return None;
    }
    Some(hook)
}

unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    event::dispatch(event, hwnd.0 as WindowHandle, id_object);
}

/// Forwards a refresh-loop message to the owning thread. Returns `false`
/// once the thread's queue is gone.
fn post(thread_id: u32, msg: OverlayMsg) -> bool {
    let Some(id) = thread_message_id(msg) else {
        return true;
    };
    unsafe { PostThreadMessageW(thread_id, id, WPARAM(0), LPARAM(0)).is_ok() }
}

fn thread_message_id(msg: OverlayMsg) -> Option<u32> {
    match msg {
        OverlayMsg::Refresh => Some(WM_OVERLAY_REFRESH),
        OverlayMsg::TargetsGone => Some(WM_OVERLAY_GONE),
        OverlayMsg::Close => Some(WM_OVERLAY_CLOSE),
        _ => None,
    }
}

/// Translates a thread message posted to the pump. `WM_OVERLAY_WAKE`
/// carries nothing; the drain that follows it does the work.
fn from_thread_message(id: u32) -> Option<ThreadMessage> {
    match id {
        WM_OVERLAY_WAKE => Some(ThreadMessage::Wake),
        _ => overlay_message(id).map(ThreadMessage::Overlay),
    }
}

fn overlay_message(id: u32) -> Option<OverlayMsg> {
    match id {
        WM_OVERLAY_REFRESH => Some(OverlayMsg::Refresh),
        WM_OVERLAY_GONE => Some(OverlayMsg::TargetsGone),
        WM_OVERLAY_CLOSE => Some(OverlayMsg::Close),
        _ => None,
    }
}

/// Blocks until the session exits or `WM_QUIT` arrives.
fn pump(session: &mut Session, rx: &Receiver<OverlayMsg>) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        let control = match from_thread_message(msg.message) {
            Some(ThreadMessage::Overlay(overlay_msg)) if msg.hwnd.is_invalid() => {
                apply(session, overlay_msg)
            }
            Some(ThreadMessage::Wake) if msg.hwnd.is_invalid() => Control::Continue,
            _ => {
                unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
                Control::Continue
            }
        };
        if control == Control::Exit || drain(session, rx) == Control::Exit {
            break;
        }
    }
}

/// Applies everything the callbacks queued since the last message.
fn drain(session: &mut Session, rx: &Receiver<OverlayMsg>) -> Control {
    for msg in coalesce(rx.try_iter().collect()) {
        if apply(session, msg) == Control::Exit {
            return Control::Exit;
        }
    }
    Control::Continue
}

/// Collapses runs of identical messages. Dragging a target emits a burst
/// of location changes that only needs one redraw.
fn coalesce(mut batch: Vec<OverlayMsg>) -> Vec<OverlayMsg> {
    batch.dedup();
    batch
}

fn apply(session: &mut Session, msg: OverlayMsg) -> Control {
    if let OverlayMsg::DisplayChanged { .. } = msg
        && let Err(e) = session.surface_mut().resize(screen::virtual_rect())
    {
        warn!("failed to resize overlay: {e}");
    }
    session.handle(msg)
}
