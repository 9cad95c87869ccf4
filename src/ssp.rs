//! Register-level SSP interface
//!
//! [`SspInterface`] drives the panel straight from the SSP peripheral's
//! transmit FIFO and status flags, the way a bare-metal LPC11U6x program
//! does, instead of through a HAL SPI bus. Because it polls the busy flag
//! itself it can bound the idle wait and report
//! [`InterfaceError::Timeout`] rather than hang.

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;

use crate::interface::{DisplayInterface, InterfaceError};

/// Default number of polls before a FIFO or idle wait gives up
pub const DEFAULT_IDLE_SPIN_LIMIT: u32 = 1_000_000;

/// Minimal view of an SSP peripheral in master mode
///
/// The port must already be configured (clock, 9-bit frames, SPI mode 0,
/// bit rate) and enabled.
pub trait SspPort {
    /// Error type reported by the port
    type Error: Debug;

    /// Push one frame into the transmit FIFO
    ///
    /// Returns [`nb::Error::WouldBlock`] while the FIFO is full. Received
    /// frames are discarded by the port.
    fn write_frame(&mut self, frame: u16) -> nb::Result<(), Self::Error>;

    /// Whether the port is still shifting frames out
    fn is_busy(&mut self) -> Result<bool, Self::Error>;
}

/// Hardware interface on top of raw SSP registers
pub struct SspInterface<P, CS> {
    port: P,
    cs: CS,
    /// Polls before giving up, 0 = wait forever
    idle_spin_limit: u32,
}

impl<P, CS> SspInterface<P, CS>
where
    P: SspPort,
    CS: OutputPin,
{
    /// Create a new SspInterface with [`DEFAULT_IDLE_SPIN_LIMIT`]
    pub fn new(port: P, cs: CS) -> Self {
        Self {
            port,
            cs,
            idle_spin_limit: DEFAULT_IDLE_SPIN_LIMIT,
        }
    }

    /// Set how many polls a FIFO or idle wait may take
    ///
    /// Set to 0 to wait forever.
    pub fn set_idle_spin_limit(&mut self, limit: u32) -> &mut Self {
        self.idle_spin_limit = limit;
        self
    }

    /// Get the current spin limit
    pub fn idle_spin_limit(&self) -> u32 {
        self.idle_spin_limit
    }

    /// Give back the port and the chip select pin
    pub fn release(self) -> (P, CS) {
        (self.port, self.cs)
    }

    fn spin_exhausted(&self, spins: u32) -> bool {
        self.idle_spin_limit > 0 && spins >= self.idle_spin_limit
    }
}

impl<P, CS, PinErr> DisplayInterface for SspInterface<P, CS>
where
    P: SspPort,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<P::Error, PinErr>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(InterfaceError::Pin)
    }

    fn write_frames(&mut self, frames: &[u16]) -> Result<(), Self::Error> {
        for &frame in frames {
            let mut spins = 0u32;
            loop {
                match self.port.write_frame(frame) {
                    Ok(()) => break,
                    Err(nb::Error::Other(e)) => return Err(InterfaceError::Spi(e)),
                    Err(nb::Error::WouldBlock) => {
                        spins += 1;
                        if self.spin_exhausted(spins) {
                            return Err(InterfaceError::Timeout);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        let mut spins = 0u32;
        while self.port.is_busy().map_err(InterfaceError::Spi)? {
            spins += 1;
            if self.spin_exhausted(spins) {
                return Err(InterfaceError::Timeout);
            }
            core::hint::spin_loop();
        }
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(InterfaceError::Pin)
    }
}
