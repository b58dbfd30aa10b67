//! Text written to the serial terminal

use core::convert::Infallible;

use ufmt::derive::uDebug;
use ufmt::{uDebug, uWrite, uwrite};

use crate::command::CommandTable;
use crate::hal::SerialPort;
use crate::state::{ChannelView, SystemMode};

/// Clears the terminal window
pub const FORM_FEED: u8 = 12;
/// First line of every menu
pub const MENU_HEADER: &str = "\rMenu Selection: \n\r";
/// Reply to a byte with no binding
pub const INVALID: &str = "\n\rInvalid. Try Again: ";
/// Last words on `Q`
pub const GOODBYE: &str = "\n\rBYE!";

/// State changes reported when tracing is enabled
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
#[allow(missing_docs)]
pub enum Event {
    Mode(SystemMode),
    Rate { hz: u32, period: u32 },
    Heartbeat(bool),
    Flood(bool),
    Party(bool),
    Banner(u32),
    View { channel: u8, view: ChannelView },
    EndOfSequence,
    Terminated,
}

/// Serial console with the lab's fixed messages
pub struct Console<S> {
    port: S,
    trace: bool,
}

impl<S: SerialPort> Console<S> {
    /// Wrap `port`; `trace` enables [`Console::trace`] output
    pub fn new(port: S, trace: bool) -> Self {
        Console { port, trace }
    }

    /// Borrow the underlying port
    pub fn port(&self) -> &S {
        &self.port
    }

    /// Next received byte, if any
    pub fn read_byte(&mut self) -> Option<u8> {
        self.port.read_byte_nonblocking()
    }

    #[allow(missing_docs)]
    pub fn write_byte(&mut self, byte: u8) {
        self.port.write_byte(byte);
    }

    #[allow(missing_docs)]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.port.write_byte(byte);
        }
    }

    /// Form feed; terminals clear their window
    pub fn clear(&mut self) {
        self.write_byte(FORM_FEED);
    }

    /// The whole menu as one block, one line per binding
    pub fn menu(&mut self, commands: &CommandTable) {
        self.write_bytes(MENU_HEADER.as_bytes());
        for binding in commands.bindings() {
            self.write_byte(binding.symbol);
            self.write_bytes(b" - ");
            self.write_bytes(binding.help.as_bytes());
            self.write_bytes(b"\n\r");
        }
    }

    #[allow(missing_docs)]
    pub fn invalid(&mut self) {
        self.write_bytes(INVALID.as_bytes());
    }

    #[allow(missing_docs)]
    pub fn goodbye(&mut self) {
        self.write_bytes(GOODBYE.as_bytes());
    }

    /// Report `event` on its own line when tracing is on
    pub fn trace<E: uDebug>(&mut self, event: &E) {
        if self.trace {
            let _ = uwrite!(self, "\n\r[trace] {:?}", event);
        }
    }
}

impl<S: SerialPort> uWrite for Console<S> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
