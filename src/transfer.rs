//! Chunked command/data transfers
//!
//! A write to the panel is one command frame followed by any number of data
//! frames. Payloads go out through a line buffer sized for one landscape
//! line plus the command slot, so a full-screen fill never needs the whole
//! rectangle in memory: the color bytes are replayed as a ring while the
//! buffer is refilled burst by burst.
//!
//! Chip select is asserted once before the first burst and released once,
//! after the serial engine reports idle.

use crate::command::{command_frame, data_frame, is_memory_write};
use crate::config::PANEL_WIDTH;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Capacity of the line buffer in frames: one line plus the command slot
pub const LINE_FRAMES: usize = PANEL_WIDTH as usize + 1;

type TransferResult<I> = core::result::Result<(), Error<I>>;

/// Line buffer and the continuous-memory-write flag
pub struct Transfer {
    line: [u16; LINE_FRAMES],
    continuous: bool,
}

impl Default for Transfer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transfer {
    /// Create an empty transfer engine
    pub const fn new() -> Self {
        Self {
            line: [0; LINE_FRAMES],
            continuous: false,
        }
    }

    /// Whether the last command written was a memory write
    ///
    /// A following pixel can then use the continue variant instead of
    /// restarting at the window origin.
    pub const fn continuous(&self) -> bool {
        self.continuous
    }

    /// Send `command`, then `data` replayed `repeat` times
    ///
    /// An empty `data` or a zero `repeat` sends the command alone. On a
    /// 32-bit target the payload is capped at `usize::MAX` bytes, far more
    /// than any window on the panel holds.
    pub fn write_raw<I: DisplayInterface>(
        &mut self,
        interface: &mut I,
        command: u8,
        data: &[u8],
        repeat: u32,
    ) -> TransferResult<I> {
        let bytes = data
            .iter()
            .copied()
            .cycle()
            .take(replay_len(data.len(), repeat));
        self.write_iter(interface, command, bytes)
    }

    /// Send `command`, then every byte `bytes` yields
    pub fn write_iter<I, B>(
        &mut self,
        interface: &mut I,
        command: u8,
        bytes: B,
    ) -> TransferResult<I>
    where
        I: DisplayInterface,
        B: IntoIterator<Item = u8>,
    {
        self.continuous = is_memory_write(command);

        interface.select().map_err(Error::Interface)?;
        let sent = self.send_bursts(interface, command, bytes.into_iter());
        let finished = sent.and_then(|counts| {
            interface.wait_idle().map_err(Error::Interface)?;
            Ok(counts)
        });

        match finished {
            Ok((frames, bursts)) => {
                log::trace!("cmd {:#04x}: {} frame(s) in {} burst(s)", command, frames, bursts);
                interface.deselect().map_err(Error::Interface)
            }
            Err(e) => {
                log::warn!("cmd {:#04x}: transfer failed, releasing chip select", command);
                let _ = interface.deselect();
                Err(e)
            }
        }
    }

    /// Fill and send bursts until `bytes` is drained
    ///
    /// Returns the number of frames and bursts sent.
    fn send_bursts<I, B>(
        &mut self,
        interface: &mut I,
        command: u8,
        mut bytes: B,
    ) -> Result<(usize, usize), Error<I>>
    where
        I: DisplayInterface,
        B: Iterator<Item = u8>,
    {
        // The first burst leads with the command frame.
        self.line[0] = command_frame(command);
        let mut start = 0;
        let mut frames = 0;
        let mut bursts = 0;

        loop {
            let mut filled = 1;
            for (slot, byte) in self.line[1..].iter_mut().zip(bytes.by_ref()) {
                *slot = data_frame(byte);
                filled += 1;
            }

            if filled > start {
                interface
                    .write_frames(&self.line[start..filled])
                    .map_err(Error::Interface)?;
                frames += filled - start;
                bursts += 1;
            }

            if filled < LINE_FRAMES {
                return Ok((frames, bursts));
            }
            start = 1;
        }
    }
}

/// Bytes sent when `len` bytes are replayed `repeat` times, saturating
fn replay_len(len: usize, repeat: u32) -> usize {
    let total = len as u64 * repeat as u64;
    usize::try_from(total).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE};
    use alloc::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Select,
        Burst(Vec<u16>),
        WaitIdle,
        Deselect,
    }

    #[derive(Debug, Default)]
    struct MockInterface {
        events: Vec<Event>,
        stuck: bool,
    }

    #[derive(Debug, PartialEq)]
    struct Stuck;

    impl DisplayInterface for MockInterface {
        type Error = Stuck;

        fn select(&mut self) -> Result<(), Self::Error> {
            self.events.push(Event::Select);
            Ok(())
        }

        fn write_frames(&mut self, frames: &[u16]) -> Result<(), Self::Error> {
            self.events.push(Event::Burst(frames.to_vec()));
            Ok(())
        }

        fn wait_idle(&mut self) -> Result<(), Self::Error> {
            self.events.push(Event::WaitIdle);
            if self.stuck { Err(Stuck) } else { Ok(()) }
        }

        fn deselect(&mut self) -> Result<(), Self::Error> {
            self.events.push(Event::Deselect);
            Ok(())
        }
    }

    impl MockInterface {
        fn bursts(&self) -> Vec<&Vec<u16>> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    Event::Burst(frames) => Some(frames),
                    _ => None,
                })
                .collect()
        }
    }

    #[test]
    fn test_short_write_is_one_burst() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface::default();
        transfer
            .write_raw(&mut interface, COLUMN_ADDRESS_SET, &[0x00, 0x0A, 0x00, 0x14], 1)
            .unwrap();
        assert_eq!(
            interface.events,
            alloc::vec![
                Event::Select,
                Event::Burst(alloc::vec![0x002A, 0x0100, 0x010A, 0x0100, 0x0114]),
                Event::WaitIdle,
                Event::Deselect,
            ]
        );
    }

    #[test]
    fn test_ring_replay() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface::default();
        transfer
            .write_raw(&mut interface, MEMORY_WRITE, &[0xF8, 0x00], 3)
            .unwrap();
        assert_eq!(
            interface.bursts(),
            alloc::vec![&alloc::vec![0x002C, 0x01F8, 0x0100, 0x01F8, 0x0100, 0x01F8, 0x0100]]
        );
    }

    #[test]
    fn test_empty_payload_sends_command_only() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface::default();
        transfer.write_raw(&mut interface, 0x11, &[], 7).unwrap();
        transfer.write_raw(&mut interface, 0x29, &[0xAA], 0).unwrap();
        assert_eq!(
            interface.bursts(),
            alloc::vec![&alloc::vec![0x0011], &alloc::vec![0x0029]]
        );
    }

    #[test]
    fn test_large_payload_split_under_one_chip_select() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface::default();
        // 1000 pixels = 2000 data frames
        transfer
            .write_raw(&mut interface, MEMORY_WRITE, &[0x12, 0x34], 1000)
            .unwrap();

        let bursts = interface.bursts();
        assert_eq!(bursts.len(), 7);
        assert!(bursts.iter().all(|burst| burst.len() <= LINE_FRAMES));
        assert_eq!(bursts[0].len(), LINE_FRAMES);
        assert_eq!(bursts[0][0], 0x002C);
        assert!(bursts[1..].iter().all(|burst| !burst.contains(&0x002C)));

        let data: Vec<u16> = bursts
            .iter()
            .flat_map(|burst| burst.iter().copied())
            .skip(1)
            .collect();
        assert_eq!(data.len(), 2000);
        assert!(data.chunks(2).all(|pair| pair == [0x0112, 0x0134]));

        let selects = interface.events.iter().filter(|e| **e == Event::Select).count();
        let deselects = interface.events.iter().filter(|e| **e == Event::Deselect).count();
        assert_eq!((selects, deselects), (1, 1));
        assert_eq!(interface.events.first(), Some(&Event::Select));
        assert_eq!(interface.events.last(), Some(&Event::Deselect));
        assert_eq!(
            interface.events[interface.events.len() - 2],
            Event::WaitIdle
        );
    }

    #[test]
    fn test_exact_line_multiple_has_no_empty_burst() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface::default();
        let line = [0x55u8; LINE_FRAMES - 1];
        transfer.write_raw(&mut interface, MEMORY_WRITE, &line, 2).unwrap();
        let bursts = interface.bursts();
        assert_eq!(bursts.len(), 2);
        assert_eq!(bursts[0].len(), LINE_FRAMES);
        assert_eq!(bursts[1].len(), LINE_FRAMES - 1);
    }

    #[test]
    fn test_continuous_flag_follows_last_command() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface::default();
        assert!(!transfer.continuous());
        transfer.write_raw(&mut interface, MEMORY_WRITE, &[0, 0], 1).unwrap();
        assert!(transfer.continuous());
        transfer.write_raw(&mut interface, 0x3C, &[0, 0], 1).unwrap();
        assert!(transfer.continuous());
        transfer
            .write_raw(&mut interface, COLUMN_ADDRESS_SET, &[0, 0, 0, 0], 1)
            .unwrap();
        assert!(!transfer.continuous());
    }

    #[test]
    fn test_idle_failure_still_releases_chip_select() {
        let mut transfer = Transfer::new();
        let mut interface = MockInterface {
            stuck: true,
            ..MockInterface::default()
        };
        let result = transfer.write_raw(&mut interface, MEMORY_WRITE, &[0, 0], 1);
        assert!(matches!(result, Err(Error::Interface(Stuck))));
        assert_eq!(interface.events.last(), Some(&Event::Deselect));
    }

    #[test]
    fn test_replay_len() {
        assert_eq!(replay_len(2, 3), 6);
        assert_eq!(replay_len(0, 7), 0);
        assert_eq!(replay_len(2, 0), 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_replay_len_full_range() {
        // 65535 x 65535 pixels, two bytes each
        let pixels = 65535u32 * 65535;
        assert_eq!(replay_len(2, pixels), 2 * pixels as usize);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_replay_len_saturates() {
        assert_eq!(replay_len(2, 65535 * 65535), usize::MAX);
    }
}
