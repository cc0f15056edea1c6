//! Colors used when drawing.

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0x00E5FF).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The fixed palette of the scenario UI.
pub struct Palette;

impl Palette {
    /// Body text.
    pub const TEXT: Rgb = Rgb::from_u32(0x00DC_DCDC);
    /// Accent for emphasis and headings (`--accent-cyan`).
    pub const ACCENT: Rgb = Rgb::from_u32(0x0000_E5FF);
    /// Secondary text: hints, footers.
    pub const DIM: Rgb = Rgb::from_u32(0x0096_9696);
    /// Alerts.
    pub const ERROR: Rgb = Rgb::from_u32(0x00FF_5F5F);
}
