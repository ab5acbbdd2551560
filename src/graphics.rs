//! Graphics support via embedded-graphics
//!
//! [`Ili9341`] implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait with
//! [`Rgb565`] pixels, so primitives, images and `embedded-graphics` text can be
//! drawn straight to the panel. There is no frame buffer: every pixel goes out
//! over the bus as it is drawn.
//!
//! Solid fills (`fill_solid`, `clear`, filled rectangles) are sent as one
//! window and a run of words; everything else is drawn pixel by pixel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use ili9341::{Config, Ili9341, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut delay = MockDelay;
//! let interface = Interface::new(MockSpi, MockPin, Some(MockPin), None::<MockPin>);
//! let mut display: Ili9341<_, NoopRawMutex> =
//!     match Ili9341::new(interface, &Config::default(), &mut delay) {
//!         Ok(display) => display,
//!         Err(_) => return,
//!     };
//!
//! let _ = display.clear(Rgb565::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 2))
//!     .draw(&mut display);
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::config::Window;
use crate::driver::Ili9341;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Clip `area` to the screen and convert it to an inclusive window
fn clipped_window(area: &Rectangle, screen: &Rectangle) -> Option<Window> {
    let area = area.intersection(screen);
    let bottom_right = area.bottom_right()?;
    Some(Window::new(
        area.top_left.x as u16,
        bottom_right.x as u16,
        area.top_left.y as u16,
        bottom_right.y as u16,
    ))
}

impl<I, M> DrawTarget for Ili9341<I, M>
where
    I: DisplayInterface,
    M: RawMutex,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let controller = self.controller_mut();
        let width = i32::from(controller.width());
        let height = i32::from(controller.height());

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            controller.set_pixel(x as u16, y as u16, color.into())?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match clipped_window(area, &self.bounding_box()) {
            Some(window) => self.controller_mut().fill_rect(window, color.into()),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let controller = self.controller_mut();
        let window = Window::full(controller.width(), controller.height());
        controller.fill_rect(window, Color::from(color))
    }
}

impl<I, M> OriginDimensions for Ili9341<I, M>
where
    I: DisplayInterface,
    M: RawMutex,
{
    fn size(&self) -> Size {
        let state = self.state();
        Size::new(u32::from(state.width), u32::from(state.height))
    }
}
