//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::{
    COLUMN_ADDRESS_SET, MADCTL_PORTRAIT, MEMORY_ACCESS_CONTROL, MEMORY_WRITE,
    MEMORY_WRITE_CONTINUE, PAGE_ADDRESS_SET,
};
use crate::config::{Config, Length, Orientation, Window};
use crate::error::Error;
use crate::init_table::InitSequence;
use crate::interface::DisplayInterface;
use crate::transfer::Transfer;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Bring-up progress of the panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelState {
    /// Serial link and chip select are configured, panel untouched
    SerialConfigured,
    /// Init table replayed
    PanelConfigured,
    /// Orientation applied and power-up delay elapsed
    Ready,
}

/// Core display driver for the ILI9341 panel
///
/// All operations block until their transfer has drained. Colors are raw
/// RGB565 values; see [`color`](crate::color) for helpers.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Line buffer and continuation state
    transfer: Transfer,
    /// Bring-up progress
    state: PanelState,
    /// Last window requested from the controller
    window: Option<Window>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// The interface must already be able to talk to the panel.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            transfer: Transfer::new(),
            state: PanelState::SerialConfigured,
            window: None,
        }
    }

    /// Replay the init table, apply the orientation and wait for the panel
    /// supply to settle
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.deselect().map_err(Error::Interface)?;

        log::debug!("replaying panel init table");
        for entry in InitSequence::new(self.config.init_sequence) {
            self.write_data(entry.command, entry.data)?;
        }
        self.state = PanelState::PanelConfigured;

        if self.config.orientation == Orientation::Portrait {
            self.write_data(MEMORY_ACCESS_CONTROL, &[MADCTL_PORTRAIT])?;
        }

        delay.delay_ms(self.config.power_up_delay_ms);
        self.state = PanelState::Ready;
        log::debug!("panel ready, {:?}", self.config.orientation);
        Ok(())
    }

    /// Send a command followed by `data` repeated `repeat` times
    ///
    /// This is how a fill sends one color for a whole rectangle without
    /// materializing it. An empty `data` or a zero `repeat` sends the
    /// command alone.
    pub fn write_raw(&mut self, command: u8, data: &[u8], repeat: u32) -> DisplayResult<I> {
        self.transfer
            .write_raw(&mut self.interface, command, data, repeat)
    }

    /// Send a command followed by `data` once
    pub fn write_data(&mut self, command: u8, data: &[u8]) -> DisplayResult<I> {
        self.write_raw(command, data, 1)
    }

    /// `(width, height)` of the display in the configured orientation
    ///
    /// This is the full panel size regardless of the active window.
    pub fn size(&self) -> (u16, u16) {
        self.config.size()
    }

    /// Move the write cursor to a single pixel
    ///
    /// Both address commands encode the coordinate as start and end.
    pub fn goto_xy(&mut self, x: u16, y: u16) -> DisplayResult<I> {
        let [x_hi, x_lo] = x.to_be_bytes();
        self.write_data(COLUMN_ADDRESS_SET, &[x_hi, x_lo, x_hi, x_lo])?;
        let [y_hi, y_lo] = y.to_be_bytes();
        self.write_data(PAGE_ADDRESS_SET, &[y_hi, y_lo, y_hi, y_lo])?;
        self.window = Some(Window::new(x, y, 1, 1));
        Ok(())
    }

    /// Set the active window
    ///
    /// Does nothing if either length is `Pixels(0)`. [`Length::Full`] takes
    /// the whole axis of the current orientation and the end bound is still
    /// `start + length - 1`, so a full length with a non-zero start runs
    /// past the panel edge.
    pub fn set_window(
        &mut self,
        x: u16,
        y: u16,
        width: Length,
        height: Length,
    ) -> DisplayResult<I> {
        if width == Length::Pixels(0) || height == Length::Pixels(0) {
            return Ok(());
        }

        let (full_width, full_height) = self.size();
        let window = Window::new(x, y, width.resolve(full_width), height.resolve(full_height));

        let [x_hi, x_lo] = window.x.to_be_bytes();
        let [x_end_hi, x_end_lo] = window.x_end().to_be_bytes();
        self.write_data(COLUMN_ADDRESS_SET, &[x_hi, x_lo, x_end_hi, x_end_lo])?;

        let [y_hi, y_lo] = window.y.to_be_bytes();
        let [y_end_hi, y_end_lo] = window.y_end().to_be_bytes();
        self.write_data(PAGE_ADDRESS_SET, &[y_hi, y_lo, y_end_hi, y_end_lo])?;

        log::debug!(
            "window {}x{} at ({}, {})",
            window.width,
            window.height,
            window.x,
            window.y
        );
        self.window = Some(window);
        Ok(())
    }

    /// Last window requested from the controller, if any
    ///
    /// The controller itself cannot be queried; this mirrors what the
    /// driver last sent. [`goto_xy`](Self::goto_xy) reports a 1x1 window.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Fill the whole screen with `color`
    pub fn clear(&mut self, color: u16) -> DisplayResult<I> {
        self.fill_rect(0, 0, Length::Full, Length::Full, color)
    }

    /// Fill a rectangle with `color`
    ///
    /// A zero-sized rectangle leaves the window untouched but still sends
    /// an empty memory write.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: Length,
        height: Length,
        color: u16,
    ) -> DisplayResult<I> {
        let (full_width, full_height) = self.size();
        let width = width.resolve(full_width);
        let height = height.resolve(full_height);

        self.set_window(x, y, Length::Pixels(width), Length::Pixels(height))?;
        let pixels = width as u32 * height as u32;
        self.write_raw(MEMORY_WRITE, &color.to_be_bytes(), pixels)
    }

    /// Copy an RGB565 image to the display
    ///
    /// `buffer` holds `hsize * vsize` pixels, two bytes each with the high
    /// byte first, ordered top to bottom and left to right. Extra bytes are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` without touching the display if
    /// `buffer` is shorter than `hsize * vsize * 2` bytes.
    pub fn copy_image(
        &mut self,
        buffer: &[u8],
        x: u16,
        y: u16,
        hsize: u16,
        vsize: u16,
    ) -> DisplayResult<I> {
        let required = hsize as usize * vsize as usize * 2;
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }

        self.set_window(x, y, Length::Pixels(hsize), Length::Pixels(vsize))?;
        self.write_data(MEMORY_WRITE, &buffer[..required])
    }

    /// Stream pixels into the active window
    ///
    /// Starts a fresh memory write at the window origin.
    pub fn write_pixels<P>(&mut self, pixels: P) -> DisplayResult<I>
    where
        P: IntoIterator<Item = u16>,
    {
        let bytes = pixels.into_iter().flat_map(u16::to_be_bytes);
        self.transfer
            .write_iter(&mut self.interface, MEMORY_WRITE, bytes)
    }

    /// Draw one pixel at `(x, y)`
    pub fn put_pixel(&mut self, x: u16, y: u16, color: u16) -> DisplayResult<I> {
        self.goto_xy(x, y)?;
        self.set_pixel(color)
    }

    /// Write `color` at the cursor and advance it
    ///
    /// Uses the continue variant of the memory write when the previous
    /// write was already a memory write, so consecutive calls fill the
    /// window in order.
    pub fn set_pixel(&mut self, color: u16) -> DisplayResult<I> {
        let command = if self.transfer.continuous() {
            MEMORY_WRITE_CONTINUE
        } else {
            MEMORY_WRITE
        };
        self.write_data(command, &color.to_be_bytes())
    }

    /// Read back the pixel at `(x, y)`
    ///
    /// Readback is not supported on this wiring: this always returns 0 and
    /// sends nothing.
    pub fn get_pixel(&mut self, _x: u16, _y: u16) -> u16 {
        0
    }

    /// Bring-up progress of the panel
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Get display orientation
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DISPLAY_ON, SLEEP_OUT};
    use crate::config::Builder;
    use alloc::vec::Vec;

    /// Records every burst and chip-select edge
    #[derive(Debug, Default)]
    struct MockInterface {
        bursts: Vec<Vec<u16>>,
        selects: usize,
        deselects: usize,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn select(&mut self) -> Result<(), Self::Error> {
            self.selects += 1;
            Ok(())
        }

        fn write_frames(&mut self, frames: &[u16]) -> Result<(), Self::Error> {
            self.bursts.push(frames.to_vec());
            Ok(())
        }

        fn wait_idle(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn deselect(&mut self) -> Result<(), Self::Error> {
            self.deselects += 1;
            Ok(())
        }
    }

    impl MockInterface {
        /// Frames of each chip-select transaction, split into commands
        fn commands(&self) -> Vec<(u8, Vec<u8>)> {
            let mut commands: Vec<(u8, Vec<u8>)> = Vec::new();
            for frame in self.bursts.iter().flatten() {
                if frame & 0x100 == 0 {
                    commands.push((*frame as u8, Vec::new()));
                } else if let Some((_, data)) = commands.last_mut() {
                    data.push(*frame as u8);
                }
            }
            commands
        }
    }

    struct MockDelay {
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn test_display(orientation: Orientation) -> Display<MockInterface> {
        let config = Builder::new().orientation(orientation).build().unwrap();
        Display::new(MockInterface::default(), config)
    }

    #[test]
    fn test_init_replays_table_in_order() {
        let mut display = test_display(Orientation::Landscape);
        let mut delay = MockDelay { total_ms: 0 };
        assert_eq!(display.state(), PanelState::SerialConfigured);

        display.init(&mut delay).unwrap();

        let commands = display.interface.commands();
        let expected: Vec<(u8, Vec<u8>)> = InitSequence::new(crate::init_table::PANEL_INIT)
            .map(|entry| (entry.command, entry.data.to_vec()))
            .collect();
        assert_eq!(commands, expected);
        assert_eq!(commands.last().map(|c| c.0), Some(DISPLAY_ON));
        assert_eq!(commands[commands.len() - 2].0, SLEEP_OUT);
        assert_eq!(delay.total_ms, 120);
        assert_eq!(display.state(), PanelState::Ready);
    }

    #[test]
    fn test_init_portrait_sets_scan_direction() {
        let mut display = test_display(Orientation::Portrait);
        let mut delay = MockDelay { total_ms: 0 };
        display.init(&mut delay).unwrap();

        let commands = display.interface.commands();
        assert_eq!(
            commands.last(),
            Some(&(MEMORY_ACCESS_CONTROL, alloc::vec![0x08]))
        );
    }

    #[test]
    fn test_size_follows_orientation() {
        assert_eq!(test_display(Orientation::Landscape).size(), (320, 240));
        assert_eq!(test_display(Orientation::Portrait).size(), (240, 320));
    }

    #[test]
    fn test_goto_xy_encodes_single_point() {
        let mut display = test_display(Orientation::Landscape);
        display.goto_xy(0x0123, 0x00EF).unwrap();
        assert_eq!(
            display.interface.commands(),
            alloc::vec![
                (COLUMN_ADDRESS_SET, alloc::vec![0x01, 0x23, 0x01, 0x23]),
                (PAGE_ADDRESS_SET, alloc::vec![0x00, 0xEF, 0x00, 0xEF]),
            ]
        );
        assert_eq!(display.window(), Some(Window::new(0x0123, 0x00EF, 1, 1)));
    }

    #[test]
    fn test_set_window_bounds() {
        let mut display = test_display(Orientation::Landscape);
        display
            .set_window(10, 20, Length::Pixels(100), Length::Pixels(50))
            .unwrap();
        assert_eq!(
            display.interface.commands(),
            alloc::vec![
                (COLUMN_ADDRESS_SET, alloc::vec![0x00, 10, 0x00, 109]),
                (PAGE_ADDRESS_SET, alloc::vec![0x00, 20, 0x00, 69]),
            ]
        );
    }

    #[test]
    fn test_set_window_zero_size_is_noop() {
        let mut display = test_display(Orientation::Landscape);
        display
            .set_window(5, 5, Length::Pixels(0), Length::Pixels(10))
            .unwrap();
        display
            .set_window(5, 5, Length::Pixels(10), Length::Pixels(0))
            .unwrap();
        display
            .set_window(5, 5, Length::Full, Length::Pixels(0))
            .unwrap();
        assert!(display.interface.bursts.is_empty());
        assert_eq!(display.interface.selects, 0);
        assert_eq!(display.window(), None);
    }

    #[test]
    fn test_set_window_full_length_keeps_start_offset() {
        let mut display = test_display(Orientation::Landscape);
        display
            .set_window(10, 0, Length::Full, Length::Full)
            .unwrap();
        // 10 + 320 - 1 = 329, past the last column
        assert_eq!(
            display.interface.commands()[0],
            (COLUMN_ADDRESS_SET, alloc::vec![0x00, 10, 0x01, 0x49])
        );
        assert_eq!(display.window(), Some(Window::new(10, 0, 320, 240)));
    }

    #[test]
    fn test_clear_spans_full_screen() {
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let mut display = test_display(orientation);
            display.clear(0xFFFF).unwrap();
            let (width, height) = orientation.size();
            assert_eq!(display.window(), Some(Window::new(0, 0, width, height)));

            let commands = display.interface.commands();
            let [w_hi, w_lo] = (width - 1).to_be_bytes();
            let [h_hi, h_lo] = (height - 1).to_be_bytes();
            assert_eq!(commands[0], (COLUMN_ADDRESS_SET, alloc::vec![0, 0, w_hi, w_lo]));
            assert_eq!(commands[1], (PAGE_ADDRESS_SET, alloc::vec![0, 0, h_hi, h_lo]));
            assert_eq!(commands[2].0, MEMORY_WRITE);
            assert_eq!(commands[2].1.len(), width as usize * height as usize * 2);
        }
    }

    #[test]
    fn test_fill_rect_sends_one_word_per_pixel() {
        let mut display = test_display(Orientation::Landscape);
        let color = 0xF81F;
        display
            .fill_rect(3, 4, Length::Pixels(17), Length::Pixels(9), color)
            .unwrap();

        let commands = display.interface.commands();
        assert_eq!(commands.len(), 3);
        let (command, data) = &commands[2];
        assert_eq!(*command, MEMORY_WRITE);
        assert_eq!(data.len(), 17 * 9 * 2);
        assert!(
            data.chunks(2)
                .all(|word| u16::from_be_bytes([word[0], word[1]]) == color)
        );
        assert_eq!(display.interface.selects, 3);
        assert_eq!(display.interface.deselects, 3);
    }

    #[test]
    fn test_fill_rect_full_height_substitutes_orientation_axis() {
        let mut display = test_display(Orientation::Portrait);
        display
            .fill_rect(0, 0, Length::Pixels(2), Length::Full, 0x0000)
            .unwrap();
        assert_eq!(display.window(), Some(Window::new(0, 0, 2, 320)));
        assert_eq!(display.interface.commands()[2].1.len(), 2 * 320 * 2);
    }

    #[test]
    fn test_fill_rect_zero_width_sends_bare_memory_write() {
        let mut display = test_display(Orientation::Landscape);
        display
            .fill_rect(0, 0, Length::Pixels(0), Length::Pixels(9), 0x1234)
            .unwrap();
        assert_eq!(
            display.interface.commands(),
            alloc::vec![(MEMORY_WRITE, Vec::new())]
        );
    }

    #[test]
    fn test_copy_image_streams_buffer_once() {
        let mut display = test_display(Orientation::Landscape);
        let image: Vec<u8> = (0..4 * 3 * 2).map(|i| i as u8).collect();
        display.copy_image(&image, 100, 50, 4, 3).unwrap();

        let commands = display.interface.commands();
        assert_eq!(
            commands[0],
            (COLUMN_ADDRESS_SET, alloc::vec![0x00, 100, 0x00, 103])
        );
        assert_eq!(commands[1], (PAGE_ADDRESS_SET, alloc::vec![0x00, 50, 0x00, 52]));
        assert_eq!(commands[2], (MEMORY_WRITE, image));
    }

    #[test]
    fn test_copy_image_rejects_short_buffer() {
        let mut display = test_display(Orientation::Landscape);
        let image = [0u8; 10];
        let result = display.copy_image(&image, 0, 0, 4, 3);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 24,
                provided: 10
            })
        ));
        assert!(display.interface.bursts.is_empty());
    }

    #[test]
    fn test_fill_rect_large_then_continue() {
        let mut display = test_display(Orientation::Landscape);
        display
            .fill_rect(5, 7, Length::Pixels(200), Length::Pixels(3), 0x07E0)
            .unwrap();
        display.set_pixel(0x001F).unwrap();

        // Window, fill split over four bursts, continuation pixel
        assert_eq!(display.interface.bursts.len(), 2 + 4 + 1);
        assert_eq!(display.interface.selects, 4);
        assert_eq!(display.interface.deselects, 4);

        let commands = display.interface.commands();
        let sequence: Vec<u8> = commands.iter().map(|(command, _)| *command).collect();
        assert_eq!(
            sequence,
            alloc::vec![
                COLUMN_ADDRESS_SET,
                PAGE_ADDRESS_SET,
                MEMORY_WRITE,
                MEMORY_WRITE_CONTINUE
            ]
        );
        assert_eq!(commands[2].1.len(), 200 * 3 * 2);
    }

    #[test]
    fn test_copy_image_large_splits_bursts() {
        let mut display = test_display(Orientation::Landscape);
        let image = alloc::vec![0xA5u8; 320 * 2 * 2];
        display.copy_image(&image, 0, 0, 320, 2).unwrap();
        // Two address commands, then 1280 data frames in four bursts
        assert_eq!(display.interface.bursts.len(), 2 + 4);
        assert_eq!(display.interface.selects, 3);
        assert_eq!(display.interface.deselects, 3);
    }

    #[test]
    fn test_put_pixel_then_set_pixel_continues() {
        let mut display = test_display(Orientation::Landscape);
        display.put_pixel(1, 2, 0x07E0).unwrap();
        display.set_pixel(0x001F).unwrap();
        display.set_pixel(0xF800).unwrap();

        let commands = display.interface.commands();
        assert_eq!(commands[0].0, COLUMN_ADDRESS_SET);
        assert_eq!(commands[1].0, PAGE_ADDRESS_SET);
        assert_eq!(commands[2], (MEMORY_WRITE, alloc::vec![0x07, 0xE0]));
        assert_eq!(commands[3], (MEMORY_WRITE_CONTINUE, alloc::vec![0x00, 0x1F]));
        assert_eq!(commands[4], (MEMORY_WRITE_CONTINUE, alloc::vec![0xF8, 0x00]));
    }

    #[test]
    fn test_addressing_clears_continuation() {
        let mut display = test_display(Orientation::Landscape);
        display.set_pixel(0x0001).unwrap();
        display.set_pixel(0x0002).unwrap();
        display.goto_xy(0, 0).unwrap();
        display.set_pixel(0x0003).unwrap();

        let memory_writes: Vec<u8> = display
            .interface
            .commands()
            .iter()
            .map(|(command, _)| *command)
            .filter(|command| *command != COLUMN_ADDRESS_SET && *command != PAGE_ADDRESS_SET)
            .collect();
        assert_eq!(
            memory_writes,
            alloc::vec![MEMORY_WRITE, MEMORY_WRITE_CONTINUE, MEMORY_WRITE]
        );
    }

    #[test]
    fn test_write_pixels_big_endian() {
        let mut display = test_display(Orientation::Landscape);
        display.write_pixels([0x1234, 0xABCD]).unwrap();
        assert_eq!(
            display.interface.commands(),
            alloc::vec![(MEMORY_WRITE, alloc::vec![0x12, 0x34, 0xAB, 0xCD])]
        );
    }

    #[test]
    fn test_get_pixel_is_stub() {
        let mut display = test_display(Orientation::Landscape);
        display.fill_rect(0, 0, Length::Full, Length::Full, 0xFFFF).unwrap();
        let sent = display.interface.bursts.len();
        assert_eq!(display.get_pixel(10, 10), 0);
        assert_eq!(display.interface.bursts.len(), sent);
    }
}
