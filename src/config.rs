//! Board-wide constants and the per-lab configuration record

use static_assertions::const_assert;

use crate::command::CommandTable;
use crate::display::Color;
use crate::period::PeriodConfig;
use crate::sequence::BoundaryPolicy;

/// Core clock when running straight from the 16 MHz main crystal (no PLL)
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// UART0 baud rate used by every lab
pub const BAUD_RATE: u32 = 115_200;

/// Width of the front-panel display [px]
pub const DISPLAY_WIDTH: i32 = 96;
/// Height of the front-panel display [px]
pub const DISPLAY_HEIGHT: i32 = 64;

/// Full-scale reading of the 12-bit ADC
pub const ADC_FULL_SCALE: u32 = 4095;

/// Number of potentiometer channels on the dashboard
pub const CHANNELS: usize = 3;

/// Banner colors cycled by the `C` command, starting from the first
pub const BANNER_PALETTE: [Color; 3] = [Color::DarkBlue, Color::Red, Color::Green];

/// Colors cycled by party mode
pub const PARTY_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Orange,
    Color::Green,
    Color::DeepSkyBlue,
    Color::DarkBlue,
    Color::Salmon,
];

// UART0 divides the clock by 16 per bit
const_assert!(SYSTEM_CLOCK_HZ / 16 >= BAUD_RATE);
const_assert!(DISPLAY_WIDTH > 0 && DISPLAY_HEIGHT >= 64);
const_assert!(BANNER_PALETTE.len() > 1);

/// Main-loop iterations spent in each half of the LED heartbeat
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Iterations with the LED lit
    pub on: u32,
    /// Iterations with the LED dark
    pub off: u32,
}

impl HeartbeatConfig {
    /// Roughly a one-second blink on a 16 MHz core polling the UART
    pub const DEFAULT: HeartbeatConfig = HeartbeatConfig {
        on: 100_000,
        off: 100_000,
    };
}

/// Everything that distinguishes one lab from another
#[derive(Clone, Copy, Debug)]
pub struct LabConfig {
    /// Text drawn in the banner at the top of the display
    pub title: &'static str,
    /// Banner fill color
    pub banner: Color,
    /// Serial commands the lab understands
    pub commands: CommandTable,
    /// What the ticker does at the end of the output sequence
    pub policy: BoundaryPolicy,
    /// Tick rate and how `+`/`-` move it
    pub pace: PeriodConfig,
    /// LED heartbeat timing
    pub heartbeat: HeartbeatConfig,
    /// Clock feeding the tick timer [Hz]
    pub clock_hz: u32,
    /// Show the loading bar before the menu
    pub splash: bool,
    /// Echo every state change to the console
    pub trace: bool,
}
