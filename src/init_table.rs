//! Panel initialization table
//!
//! The ILI9341 is brought up by replaying a fixed list of commands. The table
//! is stored as a flat byte slice of entries, each laid out as
//! `[data_length, command, data...]`, and must be replayed in order: the
//! power control, gamma and pixel format commands depend on the ones before
//! them.
//!
//! ## Example
//!
//! ```
//! use lpc11u68_lcd::init_table::{InitSequence, PANEL_INIT};
//!
//! let mut entries = InitSequence::new(PANEL_INIT);
//! let first = entries.next();
//! assert_eq!(first.map(|entry| entry.command), Some(0xCF));
//! ```

use crate::command::*;

/// Default ILI9341 power-up sequence for the Manley board panel
///
/// Entries are `[data_length, command, data...]`. The memory access control
/// entry programs the landscape scan direction; portrait is selected
/// afterwards by [`Display::init`](crate::Display::init).
#[rustfmt::skip]
pub const PANEL_INIT: &[u8] = &[
    3,  POWER_CONTROL_B, 0x00, 0xC1, 0x30,
    4,  POWER_ON_SEQUENCE_CONTROL, 0x64, 0x03, 0x12, 0x81,
    3,  DRIVER_TIMING_CONTROL_A, 0x85, 0x10, 0x7A,
    5,  POWER_CONTROL_A, 0x39, 0x2C, 0x00, 0x34, 0x02,
    1,  PUMP_RATIO_CONTROL, 0x20,
    2,  DRIVER_TIMING_CONTROL_B, 0x00, 0x00,
    1,  POWER_CONTROL_1, 0x1B,
    1,  POWER_CONTROL_2, 0x01,
    2,  VCOM_CONTROL_1, 0x45, 0x25,
    1,  VCOM_CONTROL_2, 0xB7,
    1,  MEMORY_ACCESS_CONTROL, MADCTL_LANDSCAPE,
    // 16 bits per pixel
    1,  PIXEL_FORMAT_SET, 0x55,
    2,  FRAME_RATE_CONTROL, 0x00, 0x1A,
    2,  DISPLAY_FUNCTION_CONTROL, 0x0A, 0x82,
    1,  ENABLE_3GAMMA, 0x00,
    1,  GAMMA_SET, 0x01,
    15, POSITIVE_GAMMA_CORRECTION, 0x0F, 0x2A, 0x28, 0x08, 0x0E, 0x08, 0x54, 0xA9, 0x43, 0x0A, 0x0F, 0x00, 0x00, 0x00, 0x00,
    15, NEGATIVE_GAMMA_CORRECTION, 0x00, 0x15, 0x17, 0x07, 0x11, 0x06, 0x2B, 0x56, 0x3C, 0x05, 0x10, 0x0F, 0x3F, 0x3F, 0x0F,
    // Full 320x240 window
    4,  COLUMN_ADDRESS_SET, 0x00, 0x00, 0x01, 0x3F,
    4,  PAGE_ADDRESS_SET, 0x00, 0x00, 0x00, 0xEF,
    0,  SLEEP_OUT,
    0,  DISPLAY_ON,
];

/// One entry of an initialization table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitCommand<'a> {
    /// Command byte
    pub command: u8,
    /// Data bytes sent after the command
    pub data: &'a [u8],
}

/// Iterator over the entries of an initialization table
///
/// Iteration stops at the first truncated entry; use [`validate`] to detect
/// one up front.
#[derive(Clone, Debug)]
pub struct InitSequence<'a> {
    table: &'a [u8],
    offset: usize,
}

impl<'a> InitSequence<'a> {
    /// Iterate over `table`
    pub const fn new(table: &'a [u8]) -> Self {
        Self { table, offset: 0 }
    }
}

impl<'a> Iterator for InitSequence<'a> {
    type Item = InitCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.table.get(self.offset..)?;
        let (&len, rest) = rest.split_first()?;
        let (&command, rest) = rest.split_first()?;
        let data = rest.get(..len as usize)?;
        self.offset += 2 + len as usize;
        Some(InitCommand { command, data })
    }
}

/// Check that `table` is a whole number of well-formed entries
///
/// Returns the number of entries, or the byte offset of the first entry
/// that runs past the end of the table.
pub fn validate(table: &[u8]) -> Result<usize, usize> {
    let mut offset = 0;
    let mut count = 0;
    while offset < table.len() {
        let len = table[offset] as usize;
        let next = offset + 2 + len;
        if next > table.len() {
            return Err(offset);
        }
        offset = next;
        count += 1;
    }
    Ok(count)
}
