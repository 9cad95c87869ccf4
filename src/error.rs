//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! display operations ([`Error`]) and system control ([`SysconError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//! - [`SysconError`] - Invalid system control requests
//!
//! ## Example
//!
//! ```
//! use lpc11u68_lcd::{Builder, BuilderError};
//!
//! // Entry claims three data bytes but carries one
//! static BROKEN: [u8; 3] = [3, 0xCF, 0x00];
//! let result = Builder::new().init_sequence(&BROKEN).build();
//! assert!(matches!(result, Err(BuilderError::MalformedInitSequence { offset: 0 })));
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO/timeout)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Image buffer is too small for the requested window
    ///
    /// An image of `hsize * vsize` pixels needs `hsize * vsize * 2` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// The initialization table ends in the middle of an entry
    ///
    /// See [`init_table`](crate::init_table) for the entry layout.
    MalformedInitSequence {
        /// Byte offset of the truncated entry
        offset: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MalformedInitSequence { offset } => {
                write!(f, "Init sequence entry at offset {offset} is truncated")
            }
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors reported by [`Syscon`](crate::syscon::Syscon)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SysconError {
    /// Pin interrupt channel outside 0..=7
    InvalidChannel(u8),
}

impl core::fmt::Display for SysconError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidChannel(channel) => {
                write!(f, "Invalid pin interrupt channel {channel}")
            }
        }
    }
}

impl core::error::Error for SysconError {}
