//! RGB565 colors
//!
//! The ILI9341 runs in 16-bit pixel mode, so every pixel is one word packed
//! as 5 bits red, 6 bits green and 5 bits blue:
//!
//! | Bits  | Channel |
//! |-------|---------|
//! | 15-11 | Red     |
//! | 10-5  | Green   |
//! | 4-0   | Blue    |
//!
//! ## Example
//!
//! ```
//! use ili9341::Color;
//!
//! assert_eq!(Color::from_rgb(31, 63, 31), Color::WHITE);
//! assert_eq!(Color::from_rgb(0, 0, 0).raw(), 0x0000);
//! assert_eq!(Color::from_rgb(31, 0, 0), Color::RED);
//! ```

/// A 16-bit RGB565 pixel value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(pub u16);

impl Color {
    /// Black
    pub const BLACK: Self = Self(0b00000_000000_00000);
    /// White
    pub const WHITE: Self = Self(0b11111_111111_11111);
    /// Red
    pub const RED: Self = Self(0b11111_000000_00000);
    /// Lime (full green)
    pub const LIME: Self = Self(0b00000_111111_00000);
    /// Blue
    pub const BLUE: Self = Self(0b00000_000000_11111);
    /// Yellow
    pub const YELLOW: Self = Self(0b11111_111111_00000);
    /// Cyan
    pub const CYAN: Self = Self(0b00000_111111_11111);
    /// Magenta
    pub const MAGENTA: Self = Self(0b11111_000000_11111);
    /// Silver
    pub const SILVER: Self = Self(0b11000_110000_11000);
    /// Gray
    pub const GRAY: Self = Self(0b10000_100000_10000);
    /// Maroon
    pub const MAROON: Self = Self(0b10000_000000_00000);
    /// Olive
    ///
    /// NOTE: matches the long-standing table value, which equals [`Color::GRAY`].
    pub const OLIVE: Self = Self(0b10000_100000_10000);
    /// Green (half intensity)
    pub const GREEN: Self = Self(0b00000_100000_00000);
    /// Purple
    pub const PURPLE: Self = Self(0b10000_000000_10000);
    /// Teal
    pub const TEAL: Self = Self(0b00000_100000_10000);
    /// Navy
    pub const NAVY: Self = Self(0b00000_000000_10000);

    /// Pack red, green and blue channels into RGB565
    ///
    /// `r` and `b` are expected in `0..=31`, `g` in `0..=63`. Values are not
    /// clamped: surplus high bits spill into the neighbouring channel, and
    /// anything shifted past bit 15 is dropped.
    ///
    /// ```
    /// use ili9341::Color;
    ///
    /// assert_eq!(Color::from_rgb(1, 2, 3).raw(), (1 << 11) | (2 << 5) | 3);
    /// // Out-of-range green overflows into the red field
    /// assert_eq!(Color::from_rgb(0, 64, 0).raw(), 1 << 11);
    /// ```
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16) << 11) | ((g as u16) << 5) | b as u16)
    }

    /// Get the raw 16-bit value sent to the controller
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel (0..=31)
    pub const fn r(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Green channel (0..=63)
    pub const fn g(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// Blue channel (0..=31)
    pub const fn b(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}
