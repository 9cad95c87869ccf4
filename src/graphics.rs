//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps [`Display`]
//! and implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! There is no frame buffer: the panel keeps its own frame memory, so every
//! draw call goes straight to the wire.
//!
//! - Solid fills become one windowed fill
//! - Contiguous fills (images) stream into one window when fully on screen
//! - Everything else is drawn pixel by pixel, clipped to the screen
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use lpc11u68_lcd::{Builder, Display, GraphicDisplay, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus<u16> for MockSpi {
//! #     fn read(&mut self, _words: &mut [u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u16], _write: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u16]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = SpiInterface::new(MockSpi, MockPin);
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = GraphicDisplay::new(Display::new(interface, config));
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

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::{Pixel, PointsIter},
    primitives::Rectangle,
};

use crate::color::to_raw;
use crate::config::Length;
use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

type GraphicsResult<I> = core::result::Result<(), Error<I>>;

/// Display with embedded-graphics support
///
/// Wraps a [`Display`] and draws RGB565 primitives directly into the
/// panel's frame memory.
pub struct GraphicDisplay<I>
where
    I: DisplayInterface,
{
    display: Display<I>,
}

impl<I> GraphicDisplay<I>
where
    I: DisplayInterface,
{
    /// Wrap an initialized display
    pub fn new(display: Display<I>) -> Self {
        Self { display }
    }

    /// Access the underlying display driver
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutably access the underlying display driver
    ///
    /// Use this for raw operations such as
    /// [`copy_image`](Display::copy_image).
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Unwrap the display driver
    pub fn release(self) -> Display<I> {
        self.display
    }

    /// On-screen pixel position, if `point` is inside the display
    fn on_screen(&self, point: Point) -> Option<(u16, u16)> {
        let (width, height) = self.display.size();
        let x = u16::try_from(point.x).ok().filter(|x| *x < width)?;
        let y = u16::try_from(point.y).ok().filter(|y| *y < height)?;
        Some((x, y))
    }
}

impl<I> DrawTarget for GraphicDisplay<I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> GraphicsResult<I>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.on_screen(point) {
                self.display.put_pixel(x, y, to_raw(color))?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<Iter>(&mut self, area: &Rectangle, colors: Iter) -> GraphicsResult<I>
    where
        Iter: IntoIterator<Item = Self::Color>,
    {
        if area.is_zero_sized() {
            return Ok(());
        }
        let visible = area.intersection(&self.bounding_box());
        if visible != *area {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }

        let Some((x, y)) = self.on_screen(area.top_left) else {
            return Ok(());
        };
        // Fully on screen, so the size fits in u16
        let width = area.size.width as u16;
        let height = area.size.height as u16;
        self.display
            .set_window(x, y, Length::Pixels(width), Length::Pixels(height))?;
        let count = width as usize * height as usize;
        self.display
            .write_pixels(colors.into_iter().take(count).map(to_raw))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> GraphicsResult<I> {
        let visible = area.intersection(&self.bounding_box());
        if visible.size.width == 0 || visible.size.height == 0 {
            return Ok(());
        }
        let Some((x, y)) = self.on_screen(visible.top_left) else {
            return Ok(());
        };

        self.display.fill_rect(
            x,
            y,
            Length::Pixels(visible.size.width as u16),
            Length::Pixels(visible.size.height as u16),
            to_raw(color),
        )
    }

    fn clear(&mut self, color: Self::Color) -> GraphicsResult<I> {
        self.display.clear(to_raw(color))
    }
}

impl<I> OriginDimensions for GraphicDisplay<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let (width, height) = self.display.size();
        Size::new(width as u32, height as u32)
    }
}
