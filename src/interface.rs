//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`SpiInterface`]
//! struct for talking to the ILI9341 over its 3-wire serial interface.
//!
//! ## Hardware Requirements
//!
//! The panel on the Manley board requires:
//! - SPI bus (MOSI + SCK) configured for 9-bit frames
//! - 1 GPIO pin:
//!   - **CS**: Chip select (output, active low), driven as a plain GPIO so it
//!     can stay asserted across several bursts
//!
//! There is no D/C pin: bit 8 of every frame carries it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use lpc11u68_lcd::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
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
//! let mut interface = SpiInterface::new(MockSpi, MockPin);
//!
//! // Sleep out, framed by chip select
//! let _ = interface.select();
//! let _ = interface.write_frames(&[0x0011]);
//! let _ = interface.wait_idle();
//! let _ = interface.deselect();
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the panel controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// serial link that can send 9-bit frames under a chip select it controls.
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] on top of a HAL SPI bus, or
/// [`SspInterface`](crate::ssp::SspInterface) on top of raw SSP registers.
/// Implement this trait yourself for other transports.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Assert chip select (drive CS low)
    fn select(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Queue one burst of frames
    ///
    /// Frames are 9-bit words: bit 8 set for data, clear for a command.
    /// The implementation may return before the frames have left the wire.
    fn write_frames(&mut self, frames: &[u16]) -> InterfaceResult<(), Self::Error>;

    /// Block until the serial engine reports idle
    ///
    /// # Errors
    ///
    /// Implementations that can bound the wait return a timeout error
    /// (see [`InterfaceError::Timeout`]).
    fn wait_idle(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Release chip select (drive CS high)
    fn deselect(&mut self) -> InterfaceResult<(), Self::Error>;
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
    /// Timeout waiting for the serial engine to go idle
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for serial engine"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface on top of an embedded-hal SPI bus
///
/// Implements [`DisplayInterface`] for an embedded-hal v1.0 [`SpiBus`] with
/// 16-bit words (configured by the HAL for 9-bit frames) and a GPIO chip
/// select. The idle wait is [`SpiBus::flush`], so how long it may block is
/// up to the HAL.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus<u16>`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, CS> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
}

impl<SPI, CS> SpiInterface<SPI, CS>
where
    SPI: SpiBus<u16>,
    CS: OutputPin,
{
    /// Create a new SpiInterface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus, already set up for 9-bit frames, mode 0
    /// * `cs` - Chip select pin (output, active low)
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Give back the bus and the chip select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS, PinErr> DisplayInterface for SpiInterface<SPI, CS>
where
    SPI: SpiBus<u16>,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn select(&mut self) -> InterfaceResult<(), Self::Error> {
        self.cs.set_low().map_err(InterfaceError::Pin)
    }

    fn write_frames(&mut self, frames: &[u16]) -> InterfaceResult<(), Self::Error> {
        self.spi.write(frames).map_err(InterfaceError::Spi)
    }

    fn wait_idle(&mut self) -> InterfaceResult<(), Self::Error> {
        self.spi.flush().map_err(InterfaceError::Spi)
    }

    fn deselect(&mut self) -> InterfaceResult<(), Self::Error> {
        self.cs.set_high().map_err(InterfaceError::Pin)
    }
}
