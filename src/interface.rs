//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the ILI9341 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The ILI9341 serial interface requires:
//! - SPI bus (MOSI + SCK + CS), 8-bit words, [`SPI_MODE`]
//! - GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low, optional)
//!   - **BL**: Backlight enable (output, active high, optional)
//!
//! Chip select and clock frequency belong to the [`SpiDevice`] the caller
//! opens; see [`Config::spi_frequency_hz`](crate::Config::spi_frequency_hz).
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // Board without a backlight control line
//! let mut interface = Interface::new(MockSpi, MockPin, Some(MockPin), None::<MockPin>);
//!
//! // Send command
//! let _ = interface.send_command(0x01); // Software reset
//!
//! // Send pixel words (sent big-endian)
//! let _ = interface.send_data_words(&[0xF800, 0x07E0]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{MODE_0, Mode, SpiDevice};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// SPI mode the controller expects (CPOL = 0, CPHA = 0)
pub const SPI_MODE: Mode = MODE_0;

/// Words packed per SPI write when streaming pixel data
const WORD_CHUNK: usize = 32;

/// Trait for hardware interface to the ILI9341 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Controller`](crate::controller::Controller) to work with any
/// SPI + GPIO implementation, or with a recording mock in tests.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., a parallel bus or inverted pin polarities),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send parameter bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send 16-bit words to the controller
    ///
    /// Same as [`send_data`](Self::send_data), with each word sent high
    /// byte first.
    fn send_data_words(&mut self, words: &[u16]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait at least 10ms
    /// 3. Set RST pin high
    /// 4. Wait at least 10ms
    ///
    /// Without a reset line this does nothing.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Drive the backlight line
    ///
    /// Returns `Ok(false)` without doing anything when there is no backlight
    /// line, `Ok(true)` once the line has been written.
    fn set_backlight(&mut self, on: bool) -> InterfaceResult<bool, Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for ILI9341
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BL` - Backlight pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST, BL> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Backlight pin (active high)
    backlight: Option<BL>,
}

impl<SPI, DC, RST, BL> Interface<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low); `None` skips the reset pulse
    /// * `backlight` - Backlight pin (output, active high); `None` makes
    ///   backlight control a no-op
    pub fn new(spi: SPI, dc: DC, rst: Option<RST>, backlight: Option<BL>) -> Self {
        Self {
            spi,
            dc,
            rst,
            backlight,
        }
    }

    /// Whether a reset line is wired
    pub fn has_reset(&self) -> bool {
        self.rst.is_some()
    }

    /// Whether a backlight line is wired
    pub fn has_backlight(&self) -> bool {
        self.backlight.is_some()
    }

    /// Release the SPI device and pins
    pub fn release(self) -> (SPI, DC, Option<RST>, Option<BL>) {
        (self.spi, self.dc, self.rst, self.backlight)
    }
}

impl<SPI, DC, RST, BL, PinErr> DisplayInterface for Interface<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BL: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data_words(&mut self, words: &[u16]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        let mut buf = [0u8; WORD_CHUNK * 2];
        for chunk in words.chunks(WORD_CHUNK) {
            for (bytes, word) in buf.chunks_exact_mut(2).zip(chunk) {
                bytes.copy_from_slice(&word.to_be_bytes());
            }
            self.spi
                .write(&buf[..chunk.len() * 2])
                .map_err(InterfaceError::Spi)?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };
        // Reset sequence: LOW -> wait 10ms -> HIGH -> wait 10ms
        rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> InterfaceResult<bool, Self::Error> {
        let Some(backlight) = self.backlight.as_mut() else {
            return Ok(false);
        };
        if on {
            backlight.set_high().map_err(InterfaceError::Pin)?;
        } else {
            backlight.set_low().map_err(InterfaceError::Pin)?;
        }
        Ok(true)
    }
}
