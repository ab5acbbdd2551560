//! Lock-guarded display driver
//!
//! [`Ili9341`] is the public entry point. It runs the power-up sequence on
//! construction and serialises every operation through one instance-wide
//! blocking mutex, so multi-step command/data sequences from different
//! callers never interleave on the bus.
//!
//! All operations take `&self`; with a [`RawMutex`] that is `Sync` (the
//! default [`CriticalSectionRawMutex`]) the driver can be shared between
//! threads or interrupt contexts by reference. The lock is not re-entrant:
//! calling the driver from inside a [`FontProvider`] lookup panics.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::config::{Config, Orientation, Window};
use crate::controller::{Controller, DriverState};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::text::{self, FontProvider};

type DriverResult<I> = core::result::Result<(), Error<I>>;

/// ILI9341 display driver
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `M` - Raw mutex guarding the controller; use
///   [`NoopRawMutex`](embassy_sync::blocking_mutex::raw::NoopRawMutex) when the
///   driver never leaves one thread
///
/// ## Example
///
/// ```rust,no_run
/// use core::convert::Infallible;
/// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
/// use embedded_hal::delay::DelayNs;
/// use embedded_hal::digital::OutputPin;
/// use embedded_hal::spi::{Operation, SpiDevice};
/// use ili9341::{Builder, Color, Ili9341, Interface, Orientation};
///
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let interface = Interface::new(MockSpi, MockPin, Some(MockPin), Some(MockPin));
/// let config = match Builder::new().orientation(Orientation::Landscape).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
///
/// let display: Ili9341<_, NoopRawMutex> = match Ili9341::new(interface, &config, &mut delay) {
///     Ok(display) => display,
///     Err(_) => return,
/// };
/// assert_eq!((display.width(), display.height()), (320, 240));
///
/// let _ = display.clear_screen();
/// let _ = display.set_pixel(10, 10, Color::from_rgb(31, 0, 0));
/// ```
pub struct Ili9341<I, M = CriticalSectionRawMutex>
where
    I: DisplayInterface,
    M: RawMutex,
{
    controller: Mutex<M, RefCell<Controller<I>>>,
}

impl<I, M> Ili9341<I, M>
where
    I: DisplayInterface,
    M: RawMutex,
{
    /// Power up the display and apply the configured orientation and backlight
    ///
    /// Blocks for the controller's settling times (about 250ms). No driver is
    /// returned if any step fails.
    pub fn new<D: DelayNs>(
        interface: I,
        config: &Config,
        delay: &mut D,
    ) -> core::result::Result<Self, Error<I>> {
        let mut controller = Controller::new(interface);
        controller.initialize(delay)?;
        controller.set_orientation(config.orientation)?;
        controller.set_backlight_on(config.backlight_on)?;
        Ok(Self {
            controller: Mutex::new(RefCell::new(controller)),
        })
    }

    /// Run `f` with exclusive access to the controller
    ///
    /// Everything `f` sends is one uninterrupted sequence on the bus.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut Controller<I>) -> R) -> R {
        self.controller.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Access the controller without locking
    pub fn controller_mut(&mut self) -> &mut Controller<I> {
        self.controller.get_mut().get_mut()
    }

    /// Fill the window with `color`, sending full-screen rows
    ///
    /// See [`Controller::fill_screen`] for the bus cost of partial fills.
    pub fn fill_screen(
        &self,
        left: u16,
        right: u16,
        top: u16,
        bottom: u16,
        color: Color,
    ) -> DriverResult<I> {
        self.with_controller(|c| c.fill_screen(left, right, top, bottom, color))
    }

    /// Fill exactly the pixels of `window` with `color`
    pub fn fill_rect(&self, window: Window, color: Color) -> DriverResult<I> {
        self.with_controller(|c| c.fill_rect(window, color))
    }

    /// Fill the whole screen with black
    pub fn clear_screen(&self) -> DriverResult<I> {
        self.with_controller(Controller::clear_screen)
    }

    /// Write a single pixel
    pub fn set_pixel(&self, x: u16, y: u16, color: Color) -> DriverResult<I> {
        self.with_controller(|c| c.set_pixel(x, y, color))
    }

    /// Change orientation; the window resets to the full new extent
    pub fn set_orientation(&self, orientation: Orientation) -> DriverResult<I> {
        self.with_controller(|c| c.set_orientation(orientation))
    }

    /// Change orientation from a landscape flag
    pub fn set_landscape(&self, is_landscape: bool) -> DriverResult<I> {
        self.set_orientation(Orientation::from_landscape(is_landscape))
    }

    /// Set the vertical scroll start line
    pub fn scroll_up(&self, pixels: u16) -> DriverResult<I> {
        self.with_controller(|c| c.scroll_up(pixels))
    }

    /// Draw `text` starting at `(x, y)` in `color`
    ///
    /// Layout follows [`text::layout`] using the current screen width. The
    /// whole string is drawn under one lock.
    ///
    /// # Errors
    ///
    /// Returns `Error::GlyphNotFound` for the first character `font` cannot
    /// resolve; glyphs before it have already been drawn.
    pub fn draw_string<F>(
        &self,
        x: u16,
        y: u16,
        text: &str,
        color: Color,
        font: &F,
    ) -> DriverResult<I>
    where
        F: FontProvider + ?Sized,
    {
        self.with_controller(|c| {
            let width = c.width();
            text::layout(x, y, text, font, width, |gx, gy, glyph| {
                c.draw_glyph(gx, gy, glyph, color)
            })
        })
    }

    /// Switch the backlight; does nothing without a backlight line
    pub fn set_backlight_on(&self, on: bool) -> DriverResult<I> {
        self.with_controller(|c| c.set_backlight_on(on))
    }

    /// Whether the backlight was last switched on
    pub fn backlight_on(&self) -> bool {
        self.with_controller(|c| c.backlight_on())
    }

    /// Logical width in the current orientation
    pub fn width(&self) -> u16 {
        self.with_controller(|c| c.width())
    }

    /// Logical height in the current orientation
    pub fn height(&self) -> u16 {
        self.with_controller(|c| c.height())
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.with_controller(|c| c.orientation())
    }

    /// Current addressing window
    pub fn window(&self) -> Window {
        self.with_controller(|c| c.window())
    }

    /// Snapshot of width, height, orientation and backlight, taken atomically
    pub fn state(&self) -> DriverState {
        self.with_controller(|c| c.state())
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.controller.into_inner().into_inner().release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::mock::{Event, MockDelay, MockInterface};
    use crate::text::Glyph;
    use alloc::vec;
    use alloc::vec::Vec;

    const CASET: u8 = 0x2A;
    const PASET: u8 = 0x2B;
    const RAMWR: u8 = 0x2C;

    /// 4x2 solid glyphs with 1px spacing for printable ASCII and CR/LF
    struct BlockFont;

    static BLOCK: [u8; 2] = [0xF0, 0xF0];

    impl FontProvider for BlockFont {
        fn glyph(&self, character: char) -> Option<Glyph<'_>> {
            (character.is_ascii_graphic() || matches!(character, ' ' | '\n' | '\r'))
                .then(|| Glyph::new(4, 2, 1, &BLOCK))
        }
    }

    fn driver_with(interface: MockInterface, config: &Config) -> Ili9341<MockInterface> {
        let mut delay = MockDelay::default();
        Ili9341::new(interface, config, &mut delay).unwrap()
    }

    fn driver(landscape: bool) -> Ili9341<MockInterface> {
        let config = Builder::new().landscape(landscape).build().unwrap();
        driver_with(MockInterface::new(), &config)
    }

    fn mock(display: &mut Ili9341<MockInterface>) -> &mut MockInterface {
        display.controller_mut().interface_mut()
    }

    /// Drop everything recorded so far
    fn reset_log(display: &mut Ili9341<MockInterface>) {
        mock(display).events.clear();
    }

    #[test]
    fn test_new_initializes_then_applies_orientation() {
        let config = Builder::new().landscape(true).build().unwrap();
        let display = driver_with(MockInterface::with_backlight(), &config);

        assert_eq!((display.width(), display.height()), (320, 240));
        assert_eq!(display.window(), Window::new(0, 319, 0, 239));
        assert!(display.backlight_on());

        let interface = display.release();
        let tail: Vec<Event> = interface.events[interface.events.len() - 8..].to_vec();
        assert_eq!(
            tail,
            vec![
                Event::Command(0x36),
                Event::Data(vec![0x6C]),
                Event::Command(CASET),
                Event::Data(vec![0x00, 0x00, 0x01, 0x3F]),
                Event::Command(PASET),
                Event::Data(vec![0x00, 0x00, 0x00, 0xEF]),
                Event::Command(RAMWR),
                Event::Backlight(true),
            ]
        );
    }

    #[test]
    fn test_new_fails_without_partial_driver() {
        let mut delay = MockDelay::default();
        let result: Result<Ili9341<MockInterface>, _> =
            Ili9341::new(MockInterface::failing_after(5), &Config::default(), &mut delay);
        assert!(matches!(result, Err(Error::Interface(_))));
    }

    #[test]
    fn test_backlight_absent_is_noop() {
        let display = driver(false);
        display.set_backlight_on(true).unwrap();
        assert!(!display.backlight_on());
    }

    #[test]
    fn test_set_landscape_flag() {
        let display = driver(false);
        display.set_landscape(true).unwrap();
        assert_eq!(display.orientation(), Orientation::Landscape);
        assert_eq!(display.window(), Window::new(0, 319, 0, 239));
        display.set_landscape(false).unwrap();
        let state = display.state();
        assert_eq!((state.width, state.height), (240, 320));
        assert_eq!(display.window(), Window::new(0, 239, 0, 319));
    }

    #[test]
    fn test_clear_screen_matches_black_fill() {
        let cleared = driver(true);
        cleared.clear_screen().unwrap();
        let filled = driver(true);
        filled.fill_screen(0, 319, 0, 239, Color::BLACK).unwrap();
        assert_eq!(cleared.release().events, filled.release().events);
    }

    #[test]
    fn test_draw_string_places_glyph_windows() {
        let mut display = driver(false);
        reset_log(&mut display);

        display
            .draw_string(230, 0, "ab\r\nc", Color::WHITE, &BlockFont)
            .unwrap();

        let interface = display.release();
        let columns: Vec<Vec<u8>> = interface
            .events
            .windows(2)
            .filter_map(|pair| match pair {
                [Event::Command(CASET), Event::Data(bytes)] => Some(bytes.clone()),
                _ => None,
            })
            .collect();
        let pages: Vec<Vec<u8>> = interface
            .events
            .windows(2)
            .filter_map(|pair| match pair {
                [Event::Command(PASET), Event::Data(bytes)] => Some(bytes.clone()),
                _ => None,
            })
            .collect();

        // "a" at 230 (ends 234), "b" at 235 ends 239 (fits 240), CRLF -> x 230, y 2
        assert_eq!(columns, vec![vec![0, 230, 0, 233], vec![0, 235, 0, 238], vec![0, 230, 0, 233]]);
        assert_eq!(pages, vec![vec![0, 0, 0, 1], vec![0, 0, 0, 1], vec![0, 2, 0, 3]]);
        assert_eq!(interface.words().len(), 3 * 8);
    }

    #[test]
    fn test_draw_string_missing_glyph() {
        let display = driver(false);
        let result = display.draw_string(0, 0, "a\tb", Color::WHITE, &BlockFont);
        assert!(matches!(result, Err(Error::GlyphNotFound { character: '\t' })));
    }

    #[test]
    fn test_failure_leaves_last_committed_state() {
        let config = Config::default();
        let mut delay = MockDelay::default();
        let mut display: Ili9341<MockInterface> =
            Ili9341::new(MockInterface::new(), &config, &mut delay).unwrap();
        let before = display.window();

        mock(&mut display).fail_after = Some(0);
        assert!(display.set_pixel(1, 1, Color::RED).is_err());
        assert!(display.set_orientation(Orientation::Landscape).is_err());

        assert_eq!(display.window(), before);
        assert_eq!(display.orientation(), Orientation::Portrait);
    }

    /// Split a recorded stream into window-addressed transactions and check
    /// each one is a complete, uninterrupted sequence.
    fn assert_no_interleaving(events: &[Event], fills: usize, pixels: usize) {
        let mut seen_fills = 0;
        let mut seen_pixels = 0;
        let mut i = 0;
        while i < events.len() {
            assert_eq!(events[i], Event::Command(CASET), "transaction start at {i}");
            let Event::Data(columns) = &events[i + 1] else {
                panic!("column bytes missing at {}", i + 1);
            };
            assert_eq!(events[i + 2], Event::Command(PASET));
            assert!(matches!(events[i + 3], Event::Data(_)));
            assert_eq!(events[i + 4], Event::Command(RAMWR));
            i += 5;

            let mut words = Vec::new();
            while let Some(Event::Words(chunk)) = events.get(i) {
                words.push(chunk.len());
                i += 1;
            }

            if columns[..2] == columns[2..] && words == [1] {
                seen_pixels += 1;
            } else {
                assert_eq!(words, vec![240; 320], "fill rows interrupted");
                seen_fills += 1;
            }
        }
        assert_eq!((seen_fills, seen_pixels), (fills, pixels));
    }

    #[test]
    fn test_concurrent_fill_and_set_pixel_do_not_interleave() {
        const FILLS: usize = 4;
        const PIXELS: usize = 200;

        let mut display = driver(false);
        reset_log(&mut display);
        mock(&mut display).yield_on_write = true;

        std::thread::scope(|scope| {
            let display = &display;
            scope.spawn(move || {
                for i in 0..FILLS {
                    display
                        .fill_screen(0, 239, 0, 319, Color(i as u16))
                        .unwrap();
                }
            });
            scope.spawn(move || {
                for i in 0..PIXELS {
                    let i = i as u16;
                    display.set_pixel(i % 240, i % 320, Color::WHITE).unwrap();
                }
            });
        });

        let interface = display.release();
        assert_no_interleaving(&interface.events, FILLS, PIXELS);
    }
}
