//! Peripheral collaborators consumed by the dispatcher and ticker
//!
//! The labs only ever talk to hardware through these traits; the register-level
//! implementations live behind the `board` feature and tests supply fakes.

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;
use ufmt::derive::uDebug;

/// Byte-wide serial console
pub trait SerialPort {
    /// Next received byte, or `None` when the receive FIFO is empty
    fn read_byte_nonblocking(&mut self) -> Option<u8>;
    /// Transmit one byte, waiting for room in the FIFO
    fn write_byte(&mut self, byte: u8);
}

impl<T> SerialPort for T
where
    T: serial::Read<u8> + serial::Write<u8>,
{
    fn read_byte_nonblocking(&mut self) -> Option<u8> {
        // Receive errors (overrun, framing) read as "no data"
        self.read().ok()
    }

    fn write_byte(&mut self, byte: u8) {
        let _ = nb::block!(self.write(byte));
    }
}

/// A group of GPIO outputs addressed by index
pub trait PinBank {
    /// Drive output `pin` to `level`; indices past the end are ignored
    fn set_output(&mut self, pin: usize, level: bool);
}

impl<P: OutputPin, const N: usize> PinBank for [P; N] {
    fn set_output(&mut self, pin: usize, level: bool) {
        if let Some(p) = self.get_mut(pin) {
            let _ = if level { p.set_high() } else { p.set_low() };
        }
    }
}

/// Square-wave tone output
pub trait ToneGenerator {
    /// Load a new period and high time, both in PWM clock ticks
    fn configure_tone(&mut self, period: u32, duty: u32);
    /// Stop driving the output
    fn silence(&mut self);
}

/// Single-shot analog sampling
pub trait AnalogInput {
    /// Trigger a conversion on `channel` and wait for the 12-bit result
    fn read_adc(&mut self, channel: usize) -> u16;
}

/// The periodic timer that paces the tick handler
pub trait TickTimer {
    /// Reload value in timer clock ticks
    fn set_period(&mut self, ticks: u32);
}

/// Buttons on the navigation pad
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Button {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Select,
}

impl Button {
    /// Number shown to the operator, 1 through 5
    pub fn number(self) -> u32 {
        match self {
            Button::Up => 1,
            Button::Down => 2,
            Button::Left => 3,
            Button::Right => 4,
            Button::Select => 5,
        }
    }
}

/// Level-sampled push buttons
pub trait ButtonPad {
    /// The button currently held down, if any
    fn pressed(&mut self) -> Option<Button>;
}
