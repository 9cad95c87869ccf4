//! RGB565 color helpers
//!
//! The panel takes 16-bit RGB565 words, sent high byte first. The driver
//! API works on the raw `u16`; these helpers build one from 8-bit channels.
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
//! use lpc11u68_lcd::color::{self, rgb565};
//!
//! assert_eq!(rgb565(255, 0, 0), color::RED);
//! assert_eq!(color::components(color::WHITE), (0xF8, 0xFC, 0xF8));
//! ```

/// Black
pub const BLACK: u16 = 0x0000;
/// White
pub const WHITE: u16 = 0xFFFF;
/// Red
pub const RED: u16 = 0xF800;
/// Green
pub const GREEN: u16 = 0x07E0;
/// Blue
pub const BLUE: u16 = 0x001F;
/// Cyan
pub const CYAN: u16 = 0x07FF;
/// Magenta
pub const MAGENTA: u16 = 0xF81F;
/// Yellow
pub const YELLOW: u16 = 0xFFE0;

/// Pack 8-bit channels into an RGB565 word
///
/// The low bits of each channel are dropped.
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Split an RGB565 word into 8-bit channels
///
/// The dropped low bits come back as zero.
pub const fn components(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 8) & 0xF8) as u8;
    let g = ((color >> 3) & 0xFC) as u8;
    let b = ((color << 3) & 0xF8) as u8;
    (r, g, b)
}

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::{
    Rgb565,
    raw::{RawData, RawU16},
};

/// Raw panel word for an embedded-graphics color
#[cfg(feature = "graphics")]
pub fn to_raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

/// embedded-graphics color for a raw panel word
#[cfg(feature = "graphics")]
pub fn from_raw(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}
