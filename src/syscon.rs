//! System control power configuration
//!
//! Read-modify-write helpers for the LPC11U6x power configuration
//! registers. Each register has bits that must always be written with a
//! fixed value; the helpers force those and only let the documented
//! block bits through from the caller's mask.

use crate::error::SysconError;

/// Power-down bits shared by PDRUNCFG, PDSLEEPCFG and PDWAKECFG
pub mod power {
    /// IRC oscillator output
    pub const IRCOUT_PD: u32 = 1 << 0;
    /// IRC oscillator
    pub const IRC_PD: u32 = 1 << 1;
    /// Flash
    pub const FLASH_PD: u32 = 1 << 2;
    /// Brown-out detector
    pub const BOD_PD: u32 = 1 << 3;
    /// ADC
    pub const ADC_PD: u32 = 1 << 4;
    /// System oscillator
    pub const SYSOSC_PD: u32 = 1 << 5;
    /// Watchdog oscillator
    pub const WDTOSC_PD: u32 = 1 << 6;
    /// System PLL
    pub const SYSPLL_PD: u32 = 1 << 7;
    /// USB PLL
    pub const USBPLL_PD: u32 = 1 << 8;
    /// USB transceiver
    pub const USBPAD_PD: u32 = 1 << 10;
    /// Temperature sensor
    pub const TEMPSENSE_PD: u32 = 1 << 13;

    /// Brown-out detector in deep sleep
    pub const DEEPSLP_BOD_PD: u32 = BOD_PD;
    /// Watchdog oscillator in deep sleep
    pub const DEEPSLP_WDTOSC_PD: u32 = WDTOSC_PD;
}

use power::{DEEPSLP_BOD_PD, DEEPSLP_WDTOSC_PD};

/// PDSLEEPCFG bits that must read as one
const PDSLEEP_FIXED: u32 = 0x0000_0037;
/// PDSLEEPCFG bits the caller may choose
const PDSLEEP_USER: u32 = DEEPSLP_BOD_PD | DEEPSLP_WDTOSC_PD;

/// PDWAKECFG bits that must read as one
const PDWAKE_FIXED: u32 = 0x0000_0800;
/// PDWAKECFG bits the caller may choose
const PDWAKE_USER: u32 = 0x0000_25FF;

/// PDRUNCFG bits that must read as one
const PDRUN_FIXED: u32 = 0x0000_C800;
/// PDRUNCFG bits the caller may choose
const PDRUN_USER: u32 = 0x0000_25FF;

/// Number of pin interrupt channels
pub const PIN_INTERRUPT_CHANNELS: u8 = 8;

/// Register access needed by [`Syscon`]
pub trait SysconRegisters {
    /// Read PDRUNCFG
    fn pdruncfg(&mut self) -> u32;
    /// Write PDRUNCFG
    fn set_pdruncfg(&mut self, value: u32);
    /// Write PDSLEEPCFG
    fn set_pdsleepcfg(&mut self, value: u32);
    /// Write PDWAKECFG
    fn set_pdwakecfg(&mut self, value: u32);
    /// Write PINTSEL register `channel`
    fn set_pintsel(&mut self, channel: u8, value: u32);
}

/// System control block
pub struct Syscon<R> {
    regs: R,
}

impl<R> Syscon<R>
where
    R: SysconRegisters,
{
    /// Wrap the register block
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Give back the register block
    pub fn release(self) -> R {
        self.regs
    }

    /// Choose which blocks stay powered down in deep sleep
    ///
    /// Only the brown-out detector and watchdog oscillator bits of `mask`
    /// are used.
    pub fn set_deep_sleep_pd(&mut self, mask: u32) {
        self.regs
            .set_pdsleepcfg((PDSLEEP_FIXED & !PDSLEEP_USER) | (mask & PDSLEEP_USER));
    }

    /// Choose which blocks are powered when waking from deep sleep
    pub fn set_wakeup(&mut self, mask: u32) {
        self.regs
            .set_pdwakecfg(PDWAKE_FIXED | (mask & PDWAKE_USER));
    }

    /// Power down the blocks in `mask`, leaving the others as they are
    pub fn power_down(&mut self, mask: u32) {
        let pdrun = (self.regs.pdruncfg() & PDRUN_USER) | (mask & PDRUN_USER);
        self.regs.set_pdruncfg(pdrun | PDRUN_FIXED);
    }

    /// Power up the blocks in `mask`, leaving the others as they are
    pub fn power_up(&mut self, mask: u32) {
        let pdrun = (self.regs.pdruncfg() & PDRUN_USER) & !(mask & PDRUN_USER);
        self.regs.set_pdruncfg(pdrun | PDRUN_FIXED);
    }

    /// Route `port`/`pin` to pin interrupt `channel`
    ///
    /// Port 0 pins map to their pin number, other ports to
    /// `(port - 1) * 32 + pin`.
    ///
    /// # Errors
    ///
    /// Returns `SysconError::InvalidChannel` if `channel` is not 0..=7.
    pub fn set_pin_interrupt(&mut self, channel: u8, port: u8, pin: u8) -> Result<(), SysconError> {
        if channel >= PIN_INTERRUPT_CHANNELS {
            return Err(SysconError::InvalidChannel(channel));
        }
        let value = match port {
            0 => pin as u32,
            _ => (port as u32 - 1) * 32 + pin as u32,
        };
        self.regs.set_pintsel(channel, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::power::*;
    use super::*;

    #[derive(Debug, Default)]
    struct MockRegisters {
        pdrun: u32,
        pdsleep: Option<u32>,
        pdwake: Option<u32>,
        pintsel: [Option<u32>; 8],
    }

    impl SysconRegisters for MockRegisters {
        fn pdruncfg(&mut self) -> u32 {
            self.pdrun
        }

        fn set_pdruncfg(&mut self, value: u32) {
            self.pdrun = value;
        }

        fn set_pdsleepcfg(&mut self, value: u32) {
            self.pdsleep = Some(value);
        }

        fn set_pdwakecfg(&mut self, value: u32) {
            self.pdwake = Some(value);
        }

        fn set_pintsel(&mut self, channel: u8, value: u32) {
            self.pintsel[channel as usize] = Some(value);
        }
    }

    #[test]
    fn test_deep_sleep_keeps_fixed_bits() {
        let mut syscon = Syscon::new(MockRegisters::default());
        syscon.set_deep_sleep_pd(0);
        assert_eq!(syscon.regs.pdsleep, Some(0x37 & !0x48));

        syscon.set_deep_sleep_pd(BOD_PD | WDTOSC_PD | ADC_PD);
        assert_eq!(syscon.regs.pdsleep, Some(0x37 | 0x48));
    }

    #[test]
    fn test_wakeup_masks_reserved_bits() {
        let mut syscon = Syscon::new(MockRegisters::default());
        syscon.set_wakeup(0xFFFF_FFFF);
        assert_eq!(syscon.regs.pdwake, Some(0x0800 | 0x25FF));
        syscon.set_wakeup(SYSPLL_PD);
        assert_eq!(syscon.regs.pdwake, Some(0x0880));
    }

    #[test]
    fn test_power_down_and_up() {
        let regs = MockRegisters {
            pdrun: 0xC800 | ADC_PD,
            ..MockRegisters::default()
        };
        let mut syscon = Syscon::new(regs);

        syscon.power_down(SYSPLL_PD | (1 << 15));
        assert_eq!(syscon.regs.pdrun, 0xC800 | ADC_PD | SYSPLL_PD);

        syscon.power_up(ADC_PD);
        assert_eq!(syscon.regs.pdrun, 0xC800 | SYSPLL_PD);
    }

    #[test]
    fn test_pin_interrupt_mapping() {
        let mut syscon = Syscon::new(MockRegisters::default());
        syscon.set_pin_interrupt(0, 0, 16).unwrap();
        syscon.set_pin_interrupt(1, 1, 23).unwrap();
        syscon.set_pin_interrupt(7, 2, 5).unwrap();

        let pintsel = syscon.release().pintsel;
        assert_eq!(pintsel[0], Some(16));
        assert_eq!(pintsel[1], Some(23));
        assert_eq!(pintsel[7], Some(37));
    }

    #[test]
    fn test_pin_interrupt_rejects_channel() {
        let mut syscon = Syscon::new(MockRegisters::default());
        assert_eq!(
            syscon.set_pin_interrupt(8, 0, 1),
            Err(SysconError::InvalidChannel(8))
        );
        assert_eq!(syscon.release().pintsel, [None; 8]);
    }
}
