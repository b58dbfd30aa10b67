//! Single-byte serial commands and the table that binds them to actions

use ufmt::derive::uDebug;

use crate::error::Error;
use crate::state::SystemMode;

/// What a command byte asks the lab to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Action {
    /// Send a form feed to the terminal
    ClearTerminal,
    /// Enable or disable the LED heartbeat
    ToggleHeartbeat,
    /// Send the menu again
    PrintMenu,
    /// Say goodbye and leave the main loop
    Quit,
    /// Select the operating mode consumed by the ticker
    SetMode(SystemMode),
    /// Raise the tick rate by one step
    SpeedUp,
    /// Lower the tick rate by one step
    SpeedDown,
    /// Start or stop flooding the terminal with '@'
    ToggleFlood,
    /// Start or stop cycling the display colors
    TogglePartyMode,
    /// Move the banner to the next palette color
    CycleBanner,
    /// Step a potentiometer channel to its next view
    CycleChannelView(u8),
    /// Default for bytes that are not in the table
    Invalid,
}

/// One row of a command table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Byte received on the serial port, matched case-sensitively
    pub symbol: u8,
    /// Action run when the byte arrives
    pub action: Action,
    /// Menu text printed after the symbol
    pub help: &'static str,
}

impl Binding {
    #[allow(missing_docs)]
    pub const fn new(symbol: u8, action: Action, help: &'static str) -> Self {
        Binding {
            symbol,
            action,
            help,
        }
    }
}

/// `C`
pub const ERASE: Binding = Binding::new(b'C', Action::ClearTerminal, "Erase Terminal Window");
/// `L`
pub const FLASH_LED: Binding = Binding::new(b'L', Action::ToggleHeartbeat, "Flash LED");
/// `M`
pub const MENU: Binding = Binding::new(b'M', Action::PrintMenu, "Print the Menu");
/// `Q`
pub const QUIT: Binding = Binding::new(b'Q', Action::Quit, "Quit this program");

/// Immutable symbol-to-action map with at most one binding per symbol
#[derive(Clone, Copy, Debug)]
pub struct CommandTable {
    bindings: &'static [Binding],
}

impl CommandTable {
    /// Build a table at compile time. A repeated symbol fails const evaluation.
    pub const fn new(bindings: &'static [Binding]) -> Self {
        if first_duplicate(bindings).is_some() {
            panic!("command table binds a symbol twice");
        }
        CommandTable { bindings }
    }

    /// Build a table from bindings assembled at run time
    pub fn try_new(bindings: &'static [Binding]) -> Result<Self, Error> {
        match first_duplicate(bindings) {
            Some(symbol) => Err(Error::DuplicateSymbol(symbol)),
            None => Ok(CommandTable { bindings }),
        }
    }

    /// Exact-match lookup
    pub fn lookup(&self, symbol: u8) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| binding.symbol == symbol)
            .map(|binding| binding.action)
    }

    /// Bindings in menu order
    pub fn bindings(&self) -> &'static [Binding] {
        self.bindings
    }
}

const fn first_duplicate(bindings: &[Binding]) -> Option<u8> {
    let mut i = 0;
    while i < bindings.len() {
        let mut j = i + 1;
        while j < bindings.len() {
            if bindings[i].symbol == bindings[j].symbol {
                return Some(bindings[i].symbol);
            }
            j += 1;
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: CommandTable = CommandTable::new(&[
        ERASE,
        FLASH_LED,
        MENU,
        Binding::new(b'N', Action::SetMode(SystemMode::Normal), "Normal Mode"),
        QUIT,
    ]);

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(TABLE.lookup(b'M'), Some(Action::PrintMenu));
        assert_eq!(TABLE.lookup(b'N'), Some(Action::SetMode(SystemMode::Normal)));
        assert_eq!(TABLE.lookup(b'm'), None);
        assert_eq!(TABLE.lookup(b'q'), None);
        assert_eq!(TABLE.lookup(0), None);
    }

    #[test]
    fn bindings_keep_menu_order() {
        let symbols: Vec<u8> = TABLE.bindings().iter().map(|b| b.symbol).collect();
        assert_eq!(symbols, b"CLMNQ");
    }

    #[test]
    fn run_time_tables_reject_repeated_symbols() {
        static TWICE: [Binding; 3] = [
            ERASE,
            MENU,
            Binding::new(b'C', Action::CycleBanner, "Change Banner Color"),
        ];
        assert_eq!(
            CommandTable::try_new(&TWICE).map(|t| t.bindings().len()),
            Err(Error::DuplicateSymbol(b'C'))
        );

        static ONCE: [Binding; 2] = [ERASE, MENU];
        assert!(CommandTable::try_new(&ONCE).is_ok());
    }
}
