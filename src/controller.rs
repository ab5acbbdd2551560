//! Controller protocol engine
//!
//! [`Controller`] owns the interface and the protocol state (orientation,
//! logical extent, addressing window, backlight) and turns each operation into
//! the command/data sequence the ILI9341 expects. It does no locking; the
//! [`Ili9341`](crate::Ili9341) driver wraps it in a mutex.
//!
//! State is only updated after the transfers that establish it succeed, so a
//! failed operation leaves the last committed orientation and window in place.

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{
    Command, DISPLAY_FUNCTION_CONTROL, ENTRY_MODE, FRAME_CONTROL_NORMAL, GAMMA_CURVE_1,
    PIXEL_FORMAT_16BPP,
};
use crate::config::{MAX_EXTENT, Orientation, PANEL_HEIGHT, PANEL_WIDTH, Window};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::text::Glyph;

type ControllerResult<I> = core::result::Result<(), Error<I>>;

/// Words buffered per transfer when blitting glyph rows
const GLYPH_CHUNK: usize = 32;

/// Mutable driver state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverState {
    /// Logical width in the current orientation
    pub width: u16,
    /// Logical height in the current orientation
    pub height: u16,
    /// Current orientation
    pub orientation: Orientation,
    /// Last backlight level written (stays `false` without a backlight line)
    pub backlight_on: bool,
}

impl Default for DriverState {
    fn default() -> Self {
        let orientation = Orientation::Portrait;
        let (width, height) = orientation.dimensions();
        Self {
            width,
            height,
            orientation,
            backlight_on: false,
        }
    }
}

/// ILI9341 protocol engine
pub struct Controller<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Orientation, extent and backlight
    state: DriverState,
    /// Current addressing window
    window: Window,
}

impl<I> Controller<I>
where
    I: DisplayInterface,
{
    /// Wrap an interface without touching the hardware
    ///
    /// State starts at the power-up defaults; call
    /// [`initialize`](Self::initialize) before drawing.
    pub(crate) fn new(interface: I) -> Self {
        Self {
            interface,
            state: DriverState::default(),
            window: Window::full(PANEL_WIDTH, PANEL_HEIGHT),
        }
    }

    /// Run the power-up sequence
    ///
    /// Leaves the controller in portrait mode with the full native window
    /// armed for memory writes. Any failed transfer aborts the sequence.
    pub(crate) fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<I> {
        log::debug!("ili9341: power-up sequence");

        self.interface.reset(delay).map_err(Error::Interface)?;

        self.command(Command::SoftwareReset, &[])?;
        delay.delay_ms(10);

        self.command(Command::DisplayOff, &[])?;

        let orientation = Orientation::Portrait;
        self.command(
            Command::MemoryAccessControl,
            &[orientation.memory_access_control()],
        )?;
        self.command(Command::PixelFormatSet, &[PIXEL_FORMAT_16BPP])?;
        self.command(Command::FrameControlNormal, &FRAME_CONTROL_NORMAL)?;
        self.command(Command::GammaSet, &[GAMMA_CURVE_1])?;

        // Native panel bounds, independent of the orientation applied later
        let native = Window::full(PANEL_WIDTH, PANEL_HEIGHT);
        self.command(Command::ColumnAddressSet, &native.column_bytes())?;
        self.command(Command::PageAddressSet, &native.page_bytes())?;

        self.command(Command::EntryModeSet, &[ENTRY_MODE])?;
        self.command(Command::DisplayFunctionControl, &DISPLAY_FUNCTION_CONTROL)?;

        self.command(Command::SleepOut, &[])?;
        delay.delay_ms(120);

        self.command(Command::DisplayOn, &[])?;
        delay.delay_ms(100);

        self.command(Command::MemoryWrite, &[])?;

        let (width, height) = orientation.dimensions();
        self.state.orientation = orientation;
        self.state.width = width;
        self.state.height = height;
        self.window = native;

        log::debug!("ili9341: power-up complete");
        Ok(())
    }

    /// Change orientation and reset the window to the full new extent
    pub fn set_orientation(&mut self, orientation: Orientation) -> ControllerResult<I> {
        self.command(
            Command::MemoryAccessControl,
            &[orientation.memory_access_control()],
        )?;

        let (width, height) = orientation.dimensions();
        self.state.orientation = orientation;
        self.state.width = width;
        self.state.height = height;
        log::debug!("ili9341: orientation {:?} ({}x{})", orientation, width, height);

        self.set_window(0, width - 1, 0, height - 1)
    }

    /// Set the addressing window and arm a memory write
    ///
    /// Always sends column address set, page address set and memory write,
    /// in that order. Bounds are passed through unchecked.
    pub fn set_window(
        &mut self,
        left: u16,
        right: u16,
        top: u16,
        bottom: u16,
    ) -> ControllerResult<I> {
        let window = Window::new(left, right, top, bottom);
        log::trace!("ili9341: window {:?}", window);

        self.command(Command::ColumnAddressSet, &window.column_bytes())?;
        self.command(Command::PageAddressSet, &window.page_bytes())?;
        self.command(Command::MemoryWrite, &[])?;

        self.window = window;
        Ok(())
    }

    /// Fill using full-screen rows
    ///
    /// Sets the window to the given bounds, then streams `height` rows of
    /// `width` words, using the *screen* extent rather than the window's.
    /// The controller wraps surplus words within the window, so the result
    /// is correct but a partial fill costs as much bus time as a full one.
    /// Use [`fill_rect`](Self::fill_rect) to send only the window's pixels.
    pub fn fill_screen(
        &mut self,
        left: u16,
        right: u16,
        top: u16,
        bottom: u16,
        color: Color,
    ) -> ControllerResult<I> {
        self.set_window(left, right, top, bottom)?;

        let width = usize::from(self.state.width);
        let mut row = [0u16; MAX_EXTENT as usize];
        row[..width].fill(color.raw());

        for _ in 0..self.state.height {
            self.send_words(&row[..width])?;
        }
        Ok(())
    }

    /// Fill exactly the pixels of a window
    pub fn fill_rect(&mut self, window: Window, color: Color) -> ControllerResult<I> {
        self.set_window(window.left, window.right, window.top, window.bottom)?;

        let row = [color.raw(); MAX_EXTENT as usize];
        let width = window.width();
        for _ in 0..window.height() {
            let mut remaining = width;
            while remaining > 0 {
                let n = remaining.min(row.len());
                self.send_words(&row[..n])?;
                remaining -= n;
            }
        }
        Ok(())
    }

    /// Fill the whole screen with black
    pub fn clear_screen(&mut self) -> ControllerResult<I> {
        self.fill_screen(
            0,
            self.state.width - 1,
            0,
            self.state.height - 1,
            Color::BLACK,
        )
    }

    /// Write a single pixel
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> ControllerResult<I> {
        self.set_window(x, x, y, y)?;
        self.send_words(&[color.raw()])
    }

    /// Set the vertical scroll start line, then re-arm memory writes
    pub fn scroll_up(&mut self, pixels: u16) -> ControllerResult<I> {
        self.command(Command::VerticalScrollingStartAddress, &[])?;
        self.send_words(&[pixels])?;
        self.command(Command::MemoryWrite, &[])
    }

    /// Blit a glyph with its top-left corner at `(x, y)`
    ///
    /// Set bits are written in `color`, clear bits in black. Empty glyphs
    /// draw nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if the bitmap is shorter than the
    /// glyph's width and height require; nothing is sent in that case.
    pub fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        glyph: &Glyph<'_>,
        color: Color,
    ) -> ControllerResult<I> {
        let required = glyph.bitmap_len();
        if glyph.bitmap.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: glyph.bitmap.len(),
            });
        }
        if glyph.width == 0 || glyph.height == 0 {
            return Ok(());
        }

        self.set_window(
            x,
            x.saturating_add(glyph.width - 1),
            y,
            y.saturating_add(glyph.height - 1),
        )?;

        let mut buf = [0u16; GLYPH_CHUNK];
        let mut len = 0;
        for row in 0..glyph.height {
            for col in 0..glyph.width {
                buf[len] = if glyph.pixel(col, row) {
                    color.raw()
                } else {
                    Color::BLACK.raw()
                };
                len += 1;
                if len == GLYPH_CHUNK {
                    self.send_words(&buf)?;
                    len = 0;
                }
            }
        }
        if len > 0 {
            self.send_words(&buf[..len])?;
        }
        Ok(())
    }

    /// Switch the backlight
    ///
    /// Without a backlight line nothing is sent and the tracked state is
    /// left unchanged.
    pub fn set_backlight_on(&mut self, on: bool) -> ControllerResult<I> {
        if self.interface.set_backlight(on).map_err(Error::Interface)? {
            self.state.backlight_on = on;
        }
        Ok(())
    }

    /// Logical width in the current orientation
    pub fn width(&self) -> u16 {
        self.state.width
    }

    /// Logical height in the current orientation
    pub fn height(&self) -> u16 {
        self.state.height
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    /// Whether the backlight was last switched on
    pub fn backlight_on(&self) -> bool {
        self.state.backlight_on
    }

    /// Snapshot of the driver state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Current addressing window
    pub fn window(&self) -> Window {
        self.window
    }

    /// Access the underlying interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    #[cfg(test)]
    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Consume the controller and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Send an opcode followed by its parameter bytes, if any
    fn command(&mut self, command: Command, params: &[u8]) -> ControllerResult<I> {
        self.interface
            .send_command(command.opcode())
            .map_err(Error::Interface)?;
        if !params.is_empty() {
            self.interface.send_data(params).map_err(Error::Interface)?;
        }
        Ok(())
    }

    fn send_words(&mut self, words: &[u16]) -> ControllerResult<I> {
        self.interface
            .send_data_words(words)
            .map_err(Error::Interface)
    }
}
