//! Rgb: a convenience view over the surface's packed pixel format.
//!
//! The surface stores pixels as opaque `u32` values (`0x00RRGGBB`); the
//! hardware flush consumes them as-is. `Rgb` exists so apps can work with
//! channels and named colors instead of bit arithmetic.

/// True-color RGB representation.
///
/// Packs to the surface's `u32` pixel format as `0x00RRGGBB`.
#[repr(C)]
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

    /// Black (0, 0, 0) — an unlit pixel.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Pack into the surface's pixel format.
    #[inline]
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpack from a 24-bit pixel value (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(pixel: u32) -> Self {
        Self::new(
            ((pixel >> 16) & 0xFF) as u8,
            ((pixel >> 8) & 0xFF) as u8,
            (pixel & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for u32 {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.pack()
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(pixel: u32) -> Self {
        Self::from_u32(pixel)
    }
}
