use crate::color::Color;
use crate::surface::FontSpec;

/// Immutable drawing style handed to the renderer at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStyle {
    pub crosshair: Color,
    pub snap_line: Color,
    pub text: Color,
    /// Nominal crosshair radius; each arm is twice this long.
    pub radius: i32,
    pub line_width: i32,
    pub font: FontSpec,
    pub status_lines: Vec<String>,
    /// Distance of the status label from the top of the screen.
    pub status_y: i32,
    pub show_snap_line: bool,
    pub show_status: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            crosshair: Color::rgb(0x00, 0xff, 0x00),
            snap_line: Color::rgb(0xff, 0xc0, 0x00),
            text: Color::rgb(0xff, 0x0f, 0xf0),
            radius: 7,
            line_width: 2,
            font: FontSpec {
                family: "Consolas".into(),
                size: 16,
            },
            status_lines: vec!["CROSSMARK".into(), "tracking {title} ({count})".into()],
            status_y: 150,
            show_snap_line: true,
            show_status: true,
        }
    }
}

impl OverlayStyle {
    /// Substitutes `{title}` and `{count}` in the status lines.
    pub fn with_status_context(mut self, title: &str, count: usize) -> Self {
        let count = count.to_string();
        for line in &mut self.status_lines {
            *line = line.replace("{title}", title).replace("{count}", &count);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_placeholders_are_substituted() {
        // Arrange
        let style = OverlayStyle {
            status_lines: vec!["{title}".into(), "{count} windows".into(), "plain".into()],
            ..Default::default()
        };

        // Act
        let style = style.with_status_context("Rechner", 2);

        // Assert
        assert_eq!(style.status_lines, vec!["Rechner", "2 windows", "plain"]);
    }

    #[test]
    fn default_style_uses_reference_values() {
        let style = OverlayStyle::default();
        assert_eq!(style.radius, 7);
        assert_eq!(style.line_width, 2);
        assert_eq!(style.status_y, 150);
        assert_eq!(style.crosshair.to_hex(), "#00ff00");
        assert_eq!(style.snap_line.to_hex(), "#ffc000");
        assert_eq!(style.text.to_hex(), "#ff0ff0");
    }
}
