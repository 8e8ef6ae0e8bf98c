pub mod color;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod locator;
pub mod log;
pub mod rect;
pub mod refresh;
pub mod renderer;
pub mod scene;
pub mod session;
pub mod style;
pub mod surface;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use color::Color;
pub use error::{ConfigError, OverlayError, OverlayResult};
pub use event::OverlayMsg;
pub use geometry::{Crosshair, ScreenSize, Segment};
pub use locator::MatchMode;
pub use rect::{Point, Rect};
pub use refresh::{RefreshExit, RefreshLoop};
pub use renderer::{OverlayRenderer, RefreshOutcome};
pub use scene::Scene;
pub use session::{Control, OverlaySession, OverlayState};
pub use style::OverlayStyle;
pub use surface::{DrawSurface, FontSpec, Primitive, PrimitiveId};
pub use window::{WindowGeometry, WindowHandle, WindowInfo, WindowLocator};
