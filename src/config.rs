//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Native panel width in pixels (portrait columns)
pub const PANEL_WIDTH: u16 = 240;

/// Native panel height in pixels (portrait rows)
pub const PANEL_HEIGHT: u16 = 320;

/// Longest row the controller can address in any orientation
pub const MAX_EXTENT: u16 = PANEL_HEIGHT;

/// Fastest SPI clock the controller accepts for writes (100ns write cycle)
pub const MAX_SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// Default SPI clock frequency
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// Memory access control byte for portrait scanning
const MADCTL_PORTRAIT: u8 = 0xC8;

/// Memory access control byte for landscape scanning
const MADCTL_LANDSCAPE: u8 = 0x6C;

/// Screen orientation
///
/// Selects the controller's scan direction and swaps the logical width and
/// height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// 240 wide, 320 high
    #[default]
    Portrait,
    /// 320 wide, 240 high
    Landscape,
}

impl Orientation {
    /// Pick an orientation from a landscape flag
    pub const fn from_landscape(is_landscape: bool) -> Self {
        if is_landscape {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Whether this is [`Orientation::Landscape`]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape)
    }

    /// Memory access control byte selecting this scan direction
    pub const fn memory_access_control(self) -> u8 {
        match self {
            Self::Portrait => MADCTL_PORTRAIT,
            Self::Landscape => MADCTL_LANDSCAPE,
        }
    }

    /// Logical `(width, height)` in this orientation
    ///
    /// These are fixed properties of the panel, not derived from the
    /// previous orientation.
    pub const fn dimensions(self) -> (u16, u16) {
        match self {
            Self::Portrait => (PANEL_WIDTH, PANEL_HEIGHT),
            Self::Landscape => (PANEL_HEIGHT, PANEL_WIDTH),
        }
    }
}

/// Addressing window
///
/// Inclusive column (`left..=right`) and page (`top..=bottom`) bounds that
/// the next stream of pixel words fills in row-major order. Bounds are not
/// checked against the panel; the controller receives them as given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// First column
    pub left: u16,
    /// Last column (inclusive)
    pub right: u16,
    /// First row
    pub top: u16,
    /// Last row (inclusive)
    pub bottom: u16,
}

impl Window {
    /// Create a new window from inclusive bounds
    pub const fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Window covering a whole `width` x `height` screen
    pub const fn full(width: u16, height: u16) -> Self {
        Self::new(0, width.saturating_sub(1), 0, height.saturating_sub(1))
    }

    /// Window covering a single pixel
    pub const fn pixel(x: u16, y: u16) -> Self {
        Self::new(x, x, y, y)
    }

    /// Number of columns, at least 1
    pub const fn width(&self) -> usize {
        self.right.saturating_sub(self.left) as usize + 1
    }

    /// Number of rows, at least 1
    pub const fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top) as usize + 1
    }

    /// Column address bytes for [`Command::ColumnAddressSet`](crate::Command::ColumnAddressSet)
    pub const fn column_bytes(&self) -> [u8; 4] {
        crate::command::encode_address_range(self.left, self.right)
    }

    /// Page address bytes for [`Command::PageAddressSet`](crate::Command::PageAddressSet)
    pub const fn page_bytes(&self) -> [u8; 4] {
        crate::command::encode_address_range(self.top, self.bottom)
    }
}

/// Driver configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Orientation applied after the power-up sequence
    pub orientation: Orientation,
    /// SPI clock the bus should be opened with
    ///
    /// The driver does not own the bus clock; this is carried so callers can
    /// open their [`SpiDevice`](embedded_hal::spi::SpiDevice) consistently.
    pub spi_frequency_hz: u32,
    /// Backlight state applied after the power-up sequence
    pub backlight_on: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            backlight_on: true,
        }
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use ili9341::{Builder, Orientation};
///
/// let config = match Builder::new()
///     .orientation(Orientation::Landscape)
///     .spi_frequency_hz(8_000_000)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(config.orientation.is_landscape());
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orientation applied after power-up
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Set orientation from a landscape flag
    pub fn landscape(self, is_landscape: bool) -> Self {
        self.orientation(Orientation::from_landscape(is_landscape))
    }

    /// Set the SPI clock frequency in Hz
    pub fn spi_frequency_hz(mut self, hz: u32) -> Self {
        self.config.spi_frequency_hz = hz;
        self
    }

    /// Set whether the backlight is switched on after power-up
    pub fn backlight_on(mut self, on: bool) -> Self {
        self.config.backlight_on = on;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidSpiFrequency` if the clock is zero or
    /// above [`MAX_SPI_FREQUENCY_HZ`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let hz = self.config.spi_frequency_hz;
        if hz == 0 || hz > MAX_SPI_FREQUENCY_HZ {
            return Err(BuilderError::InvalidSpiFrequency { hz });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_dimensions() {
        assert_eq!(Orientation::Portrait.dimensions(), (240, 320));
        assert_eq!(Orientation::Landscape.dimensions(), (320, 240));
        assert_eq!(Orientation::default(), Orientation::Portrait);
    }

    #[test]
    fn test_orientation_scan_bytes() {
        assert_eq!(Orientation::Portrait.memory_access_control(), 0xC8);
        assert_eq!(Orientation::Landscape.memory_access_control(), 0x6C);
        assert_eq!(Orientation::from_landscape(true), Orientation::Landscape);
        assert!(!Orientation::from_landscape(false).is_landscape());
    }

    #[test]
    fn test_full_window() {
        assert_eq!(Window::full(320, 240), Window::new(0, 319, 0, 239));
        let window = Window::full(240, 320);
        assert_eq!(window.width(), 240);
        assert_eq!(window.height(), 320);
    }

    #[test]
    fn test_window_bytes() {
        let window = Window::new(0x0012, 0x0134, 0x0001, 0x013F);
        assert_eq!(window.column_bytes(), [0x00, 0x12, 0x01, 0x34]);
        assert_eq!(window.page_bytes(), [0x00, 0x01, 0x01, 0x3F]);
    }

    #[test]
    fn test_single_pixel_window() {
        let window = Window::pixel(7, 9);
        assert_eq!(window.width(), 1);
        assert_eq!(window.height(), 1);
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.spi_frequency_hz, DEFAULT_SPI_FREQUENCY_HZ);
        assert!(config.backlight_on);
    }

    #[test]
    fn test_builder_rejects_zero_frequency() {
        let result = Builder::new().spi_frequency_hz(0).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidSpiFrequency { hz: 0 })
        ));
    }

    #[test]
    fn test_builder_rejects_excessive_frequency() {
        let result = Builder::new().spi_frequency_hz(40_000_000).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidSpiFrequency { hz: 40_000_000 })
        ));
    }

    #[test]
    fn test_builder_landscape_flag() {
        let config = Builder::new().landscape(true).backlight_on(false).build().unwrap();
        assert_eq!(config.orientation, Orientation::Landscape);
        assert!(!config.backlight_on);
    }
}
