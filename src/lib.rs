//! ILI9341 TFT Display Driver
//!
//! A driver for the ILI9341 TFT LCD controller driving 240x320 panels in
//! 16-bit RGB565 over SPI.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Portrait and landscape orientation
//! - Window-addressed fills, pixels and glyph blits
//! - Text layout over caller-supplied fonts
//! - Hardware vertical scrolling
//! - Shareable across threads: every operation runs under one lock
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341::{Builder, Color, FontProvider, Glyph, Ili9341, Interface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (spi, dc, rst, backlight, mut delay) = (MockSpi, MockPin, MockPin, MockPin, MockDelay);
//! struct Blocks;
//!
//! impl FontProvider for Blocks {
//!     fn glyph(&self, _character: char) -> Option<Glyph<'_>> {
//!         Some(Glyph::new(8, 8, 1, &[0xFF; 8]))
//!     }
//! }
//!
//! let interface = Interface::new(spi, dc, Some(rst), Some(backlight));
//! let config = match Builder::new().landscape(true).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let display: Ili9341<_, NoopRawMutex> = match Ili9341::new(interface, &config, &mut delay) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.clear_screen();
//! let _ = display.draw_string(0, 0, "Hello\r\nWorld", Color::WHITE, &Blocks);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// RGB565 color type and named colors
pub mod color;
/// ILI9341 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Unlocked protocol engine
pub mod controller;
/// Lock-guarded driver
pub mod driver;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Text layout and font abstraction
pub mod text;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use color::Color;
pub use command::Command;
pub use config::{
    Builder, Config, DEFAULT_SPI_FREQUENCY_HZ, MAX_SPI_FREQUENCY_HZ, Orientation, PANEL_HEIGHT,
    PANEL_WIDTH, Window,
};
pub use controller::{Controller, DriverState};
pub use driver::Ili9341;
pub use error::{BuilderError, Error};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface, SPI_MODE};
pub use text::{FontProvider, Glyph, MissingGlyph};
