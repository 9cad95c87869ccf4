//! Board bring-up for the Manley LPC11U68 board
//!
//! Pin muxing and clocking that must run before the LCD (or anything else)
//! is touched. Register access goes through the [`SystemControl`] trait so
//! the sequence can run against a peripheral access crate or a test mock.
//!
//! ## Example
//!
//! ```
//! use lpc11u68_lcd::board::{self, ClkoutSource, SystemControl};
//!
//! #[derive(Default)]
//! struct Chip {
//!     pins: usize,
//! }
//!
//! impl SystemControl for Chip {
//!     fn enable_iocon_clock(&mut self) {}
//!     fn set_pin_mux(&mut self, _port: u8, _pin: u8, _mode: u32) {
//!         self.pins += 1;
//!     }
//!     fn setup_xtal_clocking(&mut self) {}
//!     fn set_clkout_source(&mut self, _source: ClkoutSource, _divider: u8) {}
//!     fn setup_lcd_ssp(&mut self, _frame_bits: u8, _bitrate: u32) {}
//! }
//!
//! let mut chip = Chip::default();
//! board::system_init(&mut chip);
//! assert_eq!(chip.pins, board::PINMUX.len());
//!
//! board::setup_lcd(&mut chip);
//! assert_eq!(chip.pins, board::PINMUX.len() + 1);
//! ```

/// IOCON pin configuration bits
pub mod iocon {
    /// Pin function 0
    pub const FUNC0: u32 = 0x0;
    /// Pin function 1
    pub const FUNC1: u32 = 0x1;
    /// Pin function 2
    pub const FUNC2: u32 = 0x2;
    /// Pin function 3
    pub const FUNC3: u32 = 0x3;
    /// Pin function 4
    pub const FUNC4: u32 = 0x4;
    /// Pin function 5
    pub const FUNC5: u32 = 0x5;
    /// Pin function 6
    pub const FUNC6: u32 = 0x6;
    /// Pin function 7
    pub const FUNC7: u32 = 0x7;

    /// No pull-up or pull-down
    pub const MODE_INACT: u32 = 0x0;
    /// Pull-down enabled
    pub const MODE_PULLDOWN: u32 = 0x1 << 3;
    /// Pull-up enabled
    pub const MODE_PULLUP: u32 = 0x2 << 3;
    /// Repeater mode
    pub const MODE_REPEATER: u32 = 0x3 << 3;

    /// Hysteresis enabled
    pub const HYS_EN: u32 = 0x1 << 5;
    /// Input inverted
    pub const INV_EN: u32 = 0x1 << 6;
    /// Digital mode (analog function off)
    pub const DIGMODE_EN: u32 = 0x1 << 7;

    /// Standard-mode I2C pad
    pub const SFI2C_EN: u32 = 0x0;
    /// Standard GPIO pad on an I2C pin
    pub const STDI2C_EN: u32 = 0x1 << 8;
    /// Fast-mode Plus I2C pad
    pub const FASTI2C_EN: u32 = 0x2 << 8;
}

use iocon::{DIGMODE_EN, FUNC0, FUNC1, FUNC2, FUNC4, MODE_INACT, STDI2C_EN};

/// GPIO port of the LCD chip select
pub const LCD_CS_PORT: u8 = 0;

/// GPIO pin of the LCD chip select
pub const LCD_CS_PIN: u8 = 2;

/// Bit rate of the SSP port driving the LCD, in Hz
pub const LCD_SSP_BITRATE: u32 = 25_000_000;

/// Frame width of the LCD SSP port: one D/C bit plus eight data bits
pub const LCD_SSP_FRAME_BITS: u8 = 9;

/// IOCON mode of the LCD chip select: plain GPIO, no pull, digital
pub const LCD_CS_MODE: u32 = FUNC0 | MODE_INACT | DIGMODE_EN;

/// One pin muxing entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinMux {
    /// GPIO port
    pub port: u8,
    /// Pin within the port
    pub pin: u8,
    /// IOCON mode word
    pub mode: u32,
}

const fn mux(port: u8, pin: u8, mode: u32) -> PinMux {
    PinMux { port, pin, mode }
}

/// Pins that differ from their reset state on this board
///
/// Not every pin is listed.
pub const PINMUX: &[PinMux] = &[
    // Main oscillator: XTALIN, XTALOUT
    mux(2, 0, FUNC1 | MODE_INACT),
    mux(2, 1, FUNC1 | MODE_INACT),
    // LED0, LED1, LED2
    mux(2, 5, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(2, 10, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(2, 2, FUNC0 | MODE_INACT | DIGMODE_EN),
    // U0_RXD, U0_TXD, RXD1, TXD1
    mux(0, 18, FUNC1 | MODE_INACT | DIGMODE_EN),
    mux(0, 19, FUNC1 | MODE_INACT | DIGMODE_EN),
    mux(0, 13, FUNC4 | MODE_INACT | DIGMODE_EN),
    mux(0, 14, FUNC4 | MODE_INACT | DIGMODE_EN),
    // Joystick: up, left, select, down, right
    mux(0, 22, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(0, 7, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(0, 16, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(0, 23, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(1, 23, FUNC0 | MODE_INACT | DIGMODE_EN),
    // I2C SCL, SDA
    mux(0, 4, FUNC1 | MODE_INACT | STDI2C_EN),
    mux(0, 5, FUNC1 | MODE_INACT | STDI2C_EN),
    // SPI MISO, MOSI, SCLK, memory chip select
    mux(0, 8, FUNC1 | MODE_INACT | DIGMODE_EN),
    mux(0, 9, FUNC1 | MODE_INACT | DIGMODE_EN),
    mux(2, 7, FUNC1 | MODE_INACT | DIGMODE_EN),
    mux(1, 13, FUNC0 | MODE_INACT | DIGMODE_EN),
    // Buttons B2, B3
    mux(0, 20, FUNC0 | MODE_INACT | DIGMODE_EN),
    mux(0, 21, FUNC0 | MODE_INACT | DIGMODE_EN),
    // Potentiometer (ADC8)
    mux(0, 12, FUNC2 | MODE_INACT),
    // VBUS
    mux(0, 3, FUNC1 | MODE_INACT),
];

/// CLKOUT clock source
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum ClkoutSource {
    /// Internal RC oscillator
    Irc = 0,
    /// System oscillator
    SysOsc = 1,
    /// Watchdog oscillator
    WdtOsc = 2,
    /// Main system clock
    MainSysClk = 3,
}

/// Chip-level register access needed for bring-up
pub trait SystemControl {
    /// Enable the IOCON block's clock
    fn enable_iocon_clock(&mut self);

    /// Write the IOCON mode word of one pin
    fn set_pin_mux(&mut self, port: u8, pin: u8, mode: u32);

    /// Switch the main clock to the PLL fed by the external crystal
    ///
    /// The crystal pins must already be muxed.
    fn setup_xtal_clocking(&mut self);

    /// Select the CLKOUT source and divider
    fn set_clkout_source(&mut self, source: ClkoutSource, divider: u8);

    /// Clock, configure and enable the SSP port wired to the LCD
    ///
    /// Master, SPI frame format, mode 0 (CPOL = 0, CPHA = 0), `frame_bits`
    /// bits per frame at `bitrate` Hz.
    fn setup_lcd_ssp(&mut self, frame_bits: u8, bitrate: u32);
}

/// Apply [`PINMUX`]
pub fn setup_muxing<S: SystemControl>(chip: &mut S) {
    chip.enable_iocon_clock();
    for entry in PINMUX {
        chip.set_pin_mux(entry.port, entry.pin, entry.mode);
    }
    log::debug!("muxed {} pins", PINMUX.len());
}

/// Run from the crystal and put the main system clock on CLKOUT
pub fn setup_clocking<S: SystemControl>(chip: &mut S) {
    chip.setup_xtal_clocking();
    chip.set_clkout_source(ClkoutSource::MainSysClk, 1);
}

/// Full board bring-up: muxing, then clocking
///
/// Muxing goes first since it routes the crystal pins.
pub fn system_init<S: SystemControl>(chip: &mut S) {
    setup_muxing(chip);
    setup_clocking(chip);
    log::debug!("board clocks and pins configured");
}

/// Configure the LCD chip select as a plain GPIO
///
/// Direction and level are left to the GPIO driver that provides the
/// [`OutputPin`](embedded_hal::digital::OutputPin).
pub fn setup_lcd_pins<S: SystemControl>(chip: &mut S) {
    chip.set_pin_mux(LCD_CS_PORT, LCD_CS_PIN, LCD_CS_MODE);
}

/// Prepare the LCD link: chip select pin, then the SSP port
///
/// Run after [`system_init`]. The port is then ready for an
/// [`SspInterface`](crate::ssp::SspInterface) or a HAL SPI bus.
pub fn setup_lcd<S: SystemControl>(chip: &mut S) {
    setup_lcd_pins(chip);
    chip.setup_lcd_ssp(LCD_SSP_FRAME_BITS, LCD_SSP_BITRATE);
    log::debug!("LCD SSP at {} Hz", LCD_SSP_BITRATE);
}
