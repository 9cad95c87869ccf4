//! Display configuration types and builder

pub use crate::error::BuilderError;
use crate::init_table::{self, PANEL_INIT};

/// Panel width in landscape orientation
pub const PANEL_WIDTH: u16 = 320;

/// Panel height in landscape orientation
pub const PANEL_HEIGHT: u16 = 240;

/// Default wait after the init table for the panel supply to settle
pub const DEFAULT_POWER_UP_DELAY_MS: u32 = 120;

/// Display orientation
///
/// The controller's memory access control register does the actual
/// rotation; the driver only swaps the reported width and height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Orientation {
    /// 320x240, the scan direction programmed by the init table
    #[default]
    Landscape,
    /// 240x320
    Portrait,
}

impl Orientation {
    /// `(width, height)` in pixels for this orientation
    pub const fn size(self) -> (u16, u16) {
        match self {
            Self::Landscape => (PANEL_WIDTH, PANEL_HEIGHT),
            Self::Portrait => (PANEL_HEIGHT, PANEL_WIDTH),
        }
    }
}

/// Window width or height
///
/// `Full` stands for the whole axis of the current orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// The full width or height of the current orientation
    Full,
    /// An explicit number of pixels; 0 is a degenerate size
    Pixels(u16),
}

impl Length {
    /// Substitute `full` for [`Length::Full`]
    pub const fn resolve(self, full: u16) -> u16 {
        match self {
            Self::Full => full,
            Self::Pixels(pixels) => pixels,
        }
    }
}

impl From<u16> for Length {
    fn from(pixels: u16) -> Self {
        Self::Pixels(pixels)
    }
}

/// Rectangular region of frame memory
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Window {
    /// Create a new window
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Last column, as sent to the controller (16-bit wrapping)
    pub const fn x_end(&self) -> u16 {
        self.x.wrapping_add(self.width).wrapping_sub(1)
    }

    /// Last row, as sent to the controller (16-bit wrapping)
    pub const fn y_end(&self) -> u16 {
        self.y.wrapping_add(self.height).wrapping_sub(1)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display orientation
    pub orientation: Orientation,
    /// Initialization table, `[data_length, command, data...]` entries
    pub init_sequence: &'static [u8],
    /// Delay after initialization before drawing, in milliseconds
    pub power_up_delay_ms: u32,
}

impl Config {
    /// `(width, height)` of the configured orientation
    pub const fn size(&self) -> (u16, u16) {
        self.orientation.size()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: Orientation::Landscape,
            init_sequence: PANEL_INIT,
            power_up_delay_ms: DEFAULT_POWER_UP_DELAY_MS,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use lpc11u68_lcd::{Builder, Orientation};
///
/// let config = match Builder::new().orientation(Orientation::Portrait).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.size(), (240, 320));
/// ```
#[must_use]
pub struct Builder {
    /// Display orientation
    orientation: Orientation,
    /// Initialization table
    init_sequence: &'static [u8],
    /// Delay after initialization, in milliseconds
    power_up_delay_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        let config = Config::default();
        Self {
            orientation: config.orientation,
            init_sequence: config.init_sequence,
            power_up_delay_ms: config.power_up_delay_ms,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Replace the panel initialization table
    ///
    /// Useful for panel variants that need different power or gamma
    /// settings. The table is checked by [`build`](Self::build).
    pub fn init_sequence(mut self, table: &'static [u8]) -> Self {
        self.init_sequence = table;
        self
    }

    /// Set the delay after initialization, in milliseconds
    pub fn power_up_delay_ms(mut self, delay_ms: u32) -> Self {
        self.power_up_delay_ms = delay_ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MalformedInitSequence` if the init table ends
    /// in the middle of an entry
    pub fn build(self) -> Result<Config, BuilderError> {
        init_table::validate(self.init_sequence)
            .map_err(|offset| BuilderError::MalformedInitSequence { offset })?;
        Ok(Config {
            orientation: self.orientation,
            init_sequence: self.init_sequence,
            power_up_delay_ms: self.power_up_delay_ms,
        })
    }
}
