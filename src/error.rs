//! Errors raised while assembling lab configuration

use core::fmt;
use ufmt::derive::uDebug;

/// Configuration errors. Nothing at run time is fallible in a meaningful sense:
/// unknown input is handled by the default action and out-of-range periods are
/// clamped, so these only surface while building tables and cursors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Error {
    /// A sequence with no frames was handed to a cursor
    EmptySequence,
    /// Two bindings in one command table share this symbol
    DuplicateSymbol(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySequence => write!(f, "sequence has no frames"),
            Error::DuplicateSymbol(symbol) => {
                write!(f, "symbol {:#04x} is bound more than once", symbol)
            }
        }
    }
}
