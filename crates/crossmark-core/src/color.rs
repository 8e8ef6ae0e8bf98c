/// RGB color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The color key painted as the surface background. Pixels of this
/// exact color are not composited, so nothing drawn in it is visible.
pub const TRANSPARENT_KEY: Color = Color::rgb(0, 0, 0);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#00ff00" or "ffc000".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Packs the color as a Win32 `COLORREF` value (`0x00BBGGRR`).
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }

    /// True if drawing in this color would vanish into the background.
    pub fn is_transparent_key(self) -> bool {
        self == TRANSPARENT_KEY
    }
}
