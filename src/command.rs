//! ILI9341 command definitions
//!
//! This module defines the command bytes the driver issues to the ILI9341
//! panel controller. The panel is wired for the 3-wire serial interface, so
//! every byte travels as a 9-bit frame whose top bit selects data (1) or
//! command (0).
//!
//! ## Frame Structure
//!
//! Every write follows the pattern:
//! 1. Assert CS (Chip Select, active low)
//! 2. Send the command frame (`0x0XX`)
//! 3. Send the data frames (`0x1XX`), if any
//! 4. Wait for the serial engine to drain
//! 5. Deassert CS
//!
//! ## Example
//!
//! ```
//! use lpc11u68_lcd::command;
//!
//! assert_eq!(command::command_frame(command::MEMORY_WRITE), 0x002C);
//! assert_eq!(command::data_frame(0xA5), 0x01A5);
//! ```

/// Bit set in a serial frame that carries a data byte
pub const DATA_FRAME_BIT: u16 = 0x100;

/// Build the serial frame for a command byte
pub const fn command_frame(command: u8) -> u16 {
    command as u16
}

/// Build the serial frame for a data byte
pub const fn data_frame(data: u8) -> u16 {
    DATA_FRAME_BIT | data as u16
}

// System commands

/// Sleep out command (0x11)
///
/// Leaves sleep mode. No data.
pub const SLEEP_OUT: u8 = 0x11;

/// Gamma set command (0x26)
///
/// Selects one of the predefined gamma curves. Requires 1 byte.
pub const GAMMA_SET: u8 = 0x26;

/// Display on command (0x29)
///
/// Enables output from frame memory. No data.
pub const DISPLAY_ON: u8 = 0x29;

// Addressing commands

/// Column address set command (0x2A)
///
/// Defines the column range for frame memory access.
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page address set command (0x2B)
///
/// Defines the page (row) range for frame memory access.
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Resets the cursor to the window start and writes pixel data.
/// Requires 2 bytes per RGB565 pixel, high byte first.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Bit that turns [`MEMORY_WRITE`] into [`MEMORY_WRITE_CONTINUE`]
pub const CONTINUE_BIT: u8 = 0x10;

/// Write memory continue command (0x3C)
///
/// Writes pixel data from the cursor position left by the previous memory
/// write, without resetting it to the window start.
pub const MEMORY_WRITE_CONTINUE: u8 = MEMORY_WRITE | CONTINUE_BIT;

// Configuration commands

/// Memory access control command (0x36)
///
/// Controls the scan direction of frame memory (row/column exchange,
/// mirroring) and the RGB/BGR order. Requires 1 byte.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Pixel format set command (0x3A)
///
/// Requires 1 byte: 0x55 = 16 bits per pixel on both interfaces.
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

/// Frame rate control (normal mode) command (0xB1)
pub const FRAME_RATE_CONTROL: u8 = 0xB1;

/// Display function control command (0xB6)
pub const DISPLAY_FUNCTION_CONTROL: u8 = 0xB6;

/// Power control 1 command (0xC0)
pub const POWER_CONTROL_1: u8 = 0xC0;

/// Power control 2 command (0xC1)
pub const POWER_CONTROL_2: u8 = 0xC1;

/// VCOM control 1 command (0xC5)
pub const VCOM_CONTROL_1: u8 = 0xC5;

/// VCOM control 2 command (0xC7)
pub const VCOM_CONTROL_2: u8 = 0xC7;

/// Power control A command (0xCB)
pub const POWER_CONTROL_A: u8 = 0xCB;

/// Power control B command (0xCF)
pub const POWER_CONTROL_B: u8 = 0xCF;

/// Positive gamma correction command (0xE0)
///
/// Requires 15 bytes.
pub const POSITIVE_GAMMA_CORRECTION: u8 = 0xE0;

/// Negative gamma correction command (0xE1)
///
/// Requires 15 bytes.
pub const NEGATIVE_GAMMA_CORRECTION: u8 = 0xE1;

/// Driver timing control A command (0xE8)
pub const DRIVER_TIMING_CONTROL_A: u8 = 0xE8;

/// Driver timing control B command (0xEA)
pub const DRIVER_TIMING_CONTROL_B: u8 = 0xEA;

/// Power on sequence control command (0xED)
pub const POWER_ON_SEQUENCE_CONTROL: u8 = 0xED;

/// Enable 3-gamma control command (0xF2)
pub const ENABLE_3GAMMA: u8 = 0xF2;

/// Pump ratio control command (0xF7)
pub const PUMP_RATIO_CONTROL: u8 = 0xF7;

/// Memory access control value selecting the portrait scan direction
pub const MADCTL_PORTRAIT: u8 = 0x08;

/// Memory access control value the init table programs (landscape)
pub const MADCTL_LANDSCAPE: u8 = 0x28;

/// Whether `command` is a memory write, plain or continued
pub const fn is_memory_write(command: u8) -> bool {
    (command & !CONTINUE_BIT) == MEMORY_WRITE
}
