//! LPC11U68 Manley Board LCD Driver
//!
//! Board support for the Manley LPC11U68 board and a driver for its 320x240
//! ILI9341 panel, driven over the 3-wire serial interface with 9-bit frames.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Landscape and portrait orientation
//! - Window fills and image copies streamed through a single line buffer
//! - Board pin muxing, clocking and power configuration helpers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use lpc11u68_lcd::{Builder, Display, Length, Orientation, SpiInterface, color};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let cs = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, cs);
//! let config = match Builder::new().orientation(Orientation::Landscape).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//! let _ = display.clear(color::BLACK);
//! let _ = display.fill_rect(10, 10, Length::Pixels(100), Length::Full, color::RED);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Board pin muxing and clocking
pub mod board;
/// RGB565 color helpers
pub mod color;
/// ILI9341 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Panel initialization table
pub mod init_table;
/// Hardware interface abstraction
pub mod interface;
/// Register-level SSP interface
pub mod ssp;
/// System control power configuration
pub mod syscon;
/// Chunked command/data transfers
pub mod transfer;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{
    Builder, Config, DEFAULT_POWER_UP_DELAY_MS, Length, Orientation, PANEL_HEIGHT, PANEL_WIDTH,
    Window,
};
pub use display::{Display, PanelState};
pub use error::{BuilderError, Error, SysconError};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, SpiInterface};
pub use ssp::{DEFAULT_IDLE_SPIN_LIMIT, SspInterface, SspPort};
pub use syscon::{Syscon, SysconRegisters};

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
