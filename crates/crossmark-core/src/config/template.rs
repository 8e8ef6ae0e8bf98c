//! Commented default `config.toml` written by `crossmark init`.

use super::StyleConfig;

/// Returns the default configuration file content.
///
/// Values come from the `Default` impls so the template never drifts
/// from what an empty file would produce.
pub fn generate() -> String {
    let style = StyleConfig::default();
    let status_lines = style
        .status_lines
        .iter()
        .map(|l| format!("{l:?}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"# crossmark configuration
# Missing keys fall back to the defaults shown here.

[target]
# Title, or part of a title, of the window(s) to track (case-insensitive).
title = "Rechner"
# Require the whole title to match. Tracks a single window.
exact = false
# "window" uses the full window rectangle, "visible" the drawn frame.
frame = "window"

[style]
# Colors are hex RGB. Pure black is the transparent key and is rejected.
crosshair = "{crosshair}"
snap_line = "{snap_line}"
text = "{text}"
# Each crosshair arm extends twice the radius from the window center.
radius = {radius}
line_width = {line_width}
font = "{font}"
font_size = {font_size}
# {{title}} and {{count}} are replaced with the target title and window count.
status_lines = [{status_lines}]
status_y = {status_y}
show_snap_line = {show_snap_line}
show_status = {show_status}

[refresh]
# Delay between overlay refreshes (5-1000 ms).
interval_ms = 30

[surface]
# Let the overlay be dragged with the mouse. When false it is click-through.
interactive = false

[logging]
# Write logs to ~/.config/crossmark/logs/.
enabled = false
# "trace", "debug", "info", "warn" or "error".
level = "info"
"#,
        crosshair = style.crosshair,
        snap_line = style.snap_line,
        text = style.text,
        radius = style.radius,
        line_width = style.line_width,
        font = style.font,
        font_size = style.font_size,
        status_y = style.status_y,
        show_snap_line = style.show_snap_line,
        show_status = style.show_status,
    )
}
