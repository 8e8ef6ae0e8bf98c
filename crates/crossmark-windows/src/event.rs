use std::cell::{Cell, RefCell};
use std::sync::mpsc::Sender;

use crossmark_core::{OverlayMsg, WindowHandle};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_DESTROY, EVENT_OBJECT_HIDE, EVENT_OBJECT_LOCATIONCHANGE, EVENT_OBJECT_SHOW,
    EVENT_SYSTEM_MINIMIZEEND, EVENT_SYSTEM_MINIMIZESTART, EVENT_SYSTEM_MOVESIZEEND,
    PostThreadMessageW,
};

use crate::event_loop::WM_OVERLAY_WAKE;

/// Object ID indicating the event applies to the window itself,
/// not a child element like a caret or scrollbar.
const OBJID_WINDOW: i32 = 0;

/// Lowest event code the target hook listens for.
pub const EVENT_MIN: u32 = EVENT_SYSTEM_MOVESIZEEND;

/// Highest event code the target hook listens for.
pub const EVENT_MAX: u32 = EVENT_OBJECT_LOCATIONCHANGE;

// Per-thread routing for native callbacks. The window procedure and the
// WinEvent hook both run on the thread that owns the overlay surface.
thread_local! {
    static SENDER: RefCell<Option<Sender<OverlayMsg>>> = const { RefCell::new(None) };
    static TRACKED: RefCell<Vec<WindowHandle>> = const { RefCell::new(Vec::new()) };
    static OWNER: Cell<u32> = const { Cell::new(0) };
}

/// Routes callback messages on this thread into `tx`, and limits hook
/// events to `tracked`. `owner_thread` is woken after every message.
pub fn install(tx: Sender<OverlayMsg>, tracked: Vec<WindowHandle>, owner_thread: u32) {
    SENDER.with(|cell| *cell.borrow_mut() = Some(tx));
    TRACKED.with(|cell| *cell.borrow_mut() = tracked);
    OWNER.with(|cell| cell.set(owner_thread));
}

/// Drops this thread's sender so late callbacks become no-ops.
pub fn uninstall() {
    SENDER.with(|cell| *cell.borrow_mut() = None);
    TRACKED.with(|cell| cell.borrow_mut().clear());
    OWNER.with(|cell| cell.set(0));
}

/// Forwards a message from a native callback. Ignored if not installed.
///
/// Callbacks run inside `GetMessageW`, which does not return for them,
/// so a `WM_OVERLAY_WAKE` thread message is posted to make the pump
/// drain the channel right away.
pub fn send(msg: OverlayMsg) {
    let sent = SENDER.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|sender| sender.send(msg).is_ok())
    });
    if sent {
        wake(OWNER.with(Cell::get));
    }
}

fn wake(owner_thread: u32) {
    if owner_thread == 0 {
        return;
    }
    unsafe {
        let _ = PostThreadMessageW(owner_thread, WM_OVERLAY_WAKE, WPARAM(0), LPARAM(0));
    }
}

/// Translates a WinEvent against this thread's tracked set and forwards it.
pub fn dispatch(event: u32, hwnd: WindowHandle, id_object: i32) {
    let msg = TRACKED.with(|cell| translate(event, hwnd, id_object, &cell.borrow()));
    if let Some(msg) = msg {
        send(msg);
    }
}

/// Translates a raw WinEvent into an overlay message.
///
/// Only events on one of `tracked` that can change where (or whether)
/// its crosshair is drawn produce a message.
pub fn translate(
    event: u32,
    hwnd: WindowHandle,
    id_object: i32,
    tracked: &[WindowHandle],
) -> Option<OverlayMsg> {
    if id_object != OBJID_WINDOW || !tracked.contains(&hwnd) {
        return None;
    }

    match event {
        e if e == EVENT_OBJECT_LOCATIONCHANGE
            || e == EVENT_SYSTEM_MOVESIZEEND
            || e == EVENT_SYSTEM_MINIMIZESTART
            || e == EVENT_SYSTEM_MINIMIZEEND
            || e == EVENT_OBJECT_SHOW
            || e == EVENT_OBJECT_HIDE
            || e == EVENT_OBJECT_DESTROY =>
        {
            Some(OverlayMsg::TargetChanged { hwnd })
        }
        _ => None,
    }
}
