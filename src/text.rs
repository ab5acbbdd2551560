//! Text layout
//!
//! Turns a string into glyph placements. Fonts are supplied by the caller
//! through [`FontProvider`]; this module only decides where each glyph goes
//! and hands it to a draw callback.
//!
//! ## Layout rules
//!
//! Starting from the caller's `(x, y)`:
//!
//! - `'\n'` moves down by the height of the font's `'\n'` glyph. The
//!   horizontal cursor is **not** reset; pair it with `'\r'` for a new line.
//! - `'\r'` moves the horizontal cursor back to `x`.
//! - Any other character wraps to `x` and moves down by its height when it
//!   would cross the right edge, is drawn, then advances the cursor by its
//!   width plus spacing.
//!
//! Every character, including the control characters, is looked up in the
//! font first. Wrapping is per glyph; words are split.
//!
//! ## Example
//!
//! ```
//! use ili9341::text::{layout, FontProvider, Glyph};
//!
//! struct Blocks;
//!
//! impl FontProvider for Blocks {
//!     fn glyph(&self, _character: char) -> Option<Glyph<'_>> {
//!         Some(Glyph::new(8, 10, 2, &[0xFF; 10]))
//!     }
//! }
//!
//! let mut origins = [(0u16, 0u16); 3];
//! let mut count = 0;
//! let result = layout(100, 0, "abc", &Blocks, 120, |x, y, _glyph| {
//!     origins[count] = (x, y);
//!     count += 1;
//!     Ok::<(), ili9341::text::MissingGlyph>(())
//! });
//! assert!(result.is_ok());
//! // "a" at 100, "b" would end at 118 (fits), "c" would end at 128 and wraps
//! assert_eq!(origins, [(100, 0), (110, 0), (100, 10)]);
//! ```

/// Metrics and bitmap for a single character
///
/// The bitmap is row-major, one bit per pixel, most significant bit first,
/// with each row padded to a whole byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Horizontal gap after the glyph in pixels
    pub spacing: u16,
    /// Packed 1bpp bitmap
    pub bitmap: &'a [u8],
}

impl<'a> Glyph<'a> {
    /// Create a new glyph
    pub const fn new(width: u16, height: u16, spacing: u16, bitmap: &'a [u8]) -> Self {
        Self {
            width,
            height,
            spacing,
            bitmap,
        }
    }

    /// Bytes per bitmap row
    pub const fn row_stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Bitmap size in bytes required by the declared width and height
    pub const fn bitmap_len(&self) -> usize {
        self.row_stride() * self.height as usize
    }

    /// Whether the pixel at `(col, row)` is set
    ///
    /// Pixels outside the bitmap read as clear.
    pub fn pixel(&self, col: u16, row: u16) -> bool {
        let index = row as usize * self.row_stride() + col as usize / 8;
        let mask = 0x80 >> (col % 8);
        self.bitmap.get(index).is_some_and(|byte| byte & mask != 0)
    }
}

/// Source of glyphs for text drawing
///
/// Lookup is by raw character; what happens for characters the font does not
/// cover (fallback glyph or `None`) is up to the implementation.
pub trait FontProvider {
    /// Look up the glyph for `character`
    fn glyph(&self, character: char) -> Option<Glyph<'_>>;
}

impl<F: FontProvider + ?Sized> FontProvider for &F {
    fn glyph(&self, character: char) -> Option<Glyph<'_>> {
        (**self).glyph(character)
    }
}

/// A character the font could not resolve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingGlyph(pub char);

impl core::fmt::Display for MissingGlyph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "No glyph for character {:?}", self.0)
    }
}

impl core::error::Error for MissingGlyph {}

/// Lay out `text` starting at `(x, y)` on a screen `screen_width` pixels wide
///
/// Calls `draw(x, y, glyph)` once per drawn glyph, in string order. Stops at
/// the first missing glyph or draw error.
pub fn layout<F, D, E>(
    x: u16,
    y: u16,
    text: &str,
    font: &F,
    screen_width: u16,
    mut draw: D,
) -> Result<(), E>
where
    F: FontProvider + ?Sized,
    D: FnMut(u16, u16, &Glyph<'_>) -> Result<(), E>,
    E: From<MissingGlyph>,
{
    let mut current_x = x;
    let mut y = y;

    for character in text.chars() {
        let glyph = font.glyph(character).ok_or(MissingGlyph(character))?;

        match character {
            '\n' => y = y.saturating_add(glyph.height),
            '\r' => current_x = x,
            _ => {
                if u32::from(current_x) + u32::from(glyph.width) > u32::from(screen_width) {
                    current_x = x;
                    y = y.saturating_add(glyph.height);
                }

                draw(current_x, y, &glyph)?;
                current_x = current_x
                    .saturating_add(glyph.width)
                    .saturating_add(glyph.spacing);
            }
        }
    }

    Ok(())
}
