mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::locator::MatchMode;
use crate::log::LogConfig;
use crate::style::OverlayStyle;
use crate::surface::FontSpec;

pub use loader::{config_dir, config_path, load, load_from, try_load, try_load_from, write_default};

/// Top-level configuration for crossmark.
///
/// Loaded from `~/.config/crossmark/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which windows to track.
    pub target: TargetConfig,
    /// Crosshair, snap line and label appearance.
    pub style: StyleConfig,
    /// Refresh loop timing.
    pub refresh: RefreshConfig,
    /// Overlay surface behavior.
    pub surface: SurfaceConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Target window selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Title (or title fragment) of the window to track.
    pub title: String,
    /// Require the whole title to match instead of a substring.
    pub exact: bool,
    /// Which rectangle counts as the window's bounds.
    pub frame: FrameMode,
}

/// Source of a window's screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMode {
    /// The full window rectangle, including invisible resize borders.
    #[default]
    Window,
    /// The visible frame as drawn by the compositor.
    Visible,
}

/// Overlay appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Hex color of the crosshair (e.g. "#00ff00").
    pub crosshair: String,
    /// Hex color of the snap line.
    pub snap_line: String,
    /// Hex color of the status label.
    pub text: String,
    /// Crosshair radius in pixels; each arm is twice this long.
    pub radius: i32,
    /// Line width in pixels.
    pub line_width: i32,
    /// Font family for the status label.
    pub font: String,
    /// Font height in pixels.
    pub font_size: i32,
    /// Status label lines. `{title}` and `{count}` are substituted.
    pub status_lines: Vec<String>,
    /// Distance of the status label from the top of the screen.
    pub status_y: i32,
    pub show_snap_line: bool,
    pub show_status: bool,
}

/// Refresh loop timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Delay between refresh ticks in milliseconds.
    pub interval_ms: u64,
}

/// Overlay surface behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Accept pointer input so the overlay can be dragged. When `false`
    /// the overlay is click-through.
    pub interactive: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            title: "Rechner".into(),
            exact: false,
            frame: FrameMode::Window,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = OverlayStyle::default();
        Self {
            crosshair: style.crosshair.to_hex(),
            snap_line: style.snap_line.to_hex(),
            text: style.text.to_hex(),
            radius: style.radius,
            line_width: style.line_width,
            font: style.font.family,
            font_size: style.font.size,
            status_lines: style.status_lines,
            status_y: style.status_y,
            show_snap_line: style.show_snap_line,
            show_status: style.show_status,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_ms: 30 }
    }
}

impl TargetConfig {
    pub fn match_mode(&self) -> MatchMode {
        if self.exact {
            MatchMode::Exact
        } else {
            MatchMode::Substring
        }
    }
}

impl Config {
    /// Clamps numeric values to safe ranges and replaces unusable colors
    /// with their defaults.
    ///
    /// A color that does not parse, or that equals the transparent key,
    /// would draw nothing visible.
    pub fn validate(&mut self) {
        let defaults = StyleConfig::default();
        let style = &mut self.style;

        style.radius = style.radius.clamp(1, 200);
        style.line_width = style.line_width.clamp(1, 32);
        style.font_size = style.font_size.clamp(6, 96);
        style.status_y = style.status_y.max(0);
        if style.font.trim().is_empty() {
            style.font = defaults.font.clone();
        }

        style.crosshair = usable_color(&style.crosshair, &defaults.crosshair);
        style.snap_line = usable_color(&style.snap_line, &defaults.snap_line);
        style.text = usable_color(&style.text, &defaults.text);

        self.refresh.interval_ms = self.refresh.interval_ms.clamp(5, 1000);
    }
}

impl StyleConfig {
    /// Builds the renderer style. Call after [`Config::validate`].
    pub fn resolve(&self) -> OverlayStyle {
        let fallback = OverlayStyle::default();
        OverlayStyle {
            crosshair: Color::from_hex(&self.crosshair).unwrap_or(fallback.crosshair),
            snap_line: Color::from_hex(&self.snap_line).unwrap_or(fallback.snap_line),
            text: Color::from_hex(&self.text).unwrap_or(fallback.text),
            radius: self.radius,
            line_width: self.line_width,
            font: FontSpec {
                family: self.font.clone(),
                size: self.font_size,
            },
            status_lines: self.status_lines.clone(),
            status_y: self.status_y,
            show_snap_line: self.show_snap_line,
            show_status: self.show_status,
        }
    }
}

/// Returns `value` normalized to `#rrggbb`, or `default` if it is not
/// a visible color.
fn usable_color(value: &str, default: &str) -> String {
    match Color::from_hex(value) {
        Some(c) if !c.is_transparent_key() => c.to_hex(),
        _ => {
            tracing::warn!("ignoring unusable color '{value}', using {default}");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests;
