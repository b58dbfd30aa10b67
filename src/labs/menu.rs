//! Lab 2: menu-driven LED, terminal flood, party colors and the button counter

use ufmt::uwrite;

use crate::app::Lab;
use crate::command::{Action, Binding, CommandTable, FLASH_LED, MENU, QUIT};
use crate::config::{HeartbeatConfig, LabConfig, SYSTEM_CLOCK_HZ};
use crate::console::Console;
use crate::display::{Color, Display, Line, Screen};
use crate::hal::{Button, ButtonPad, SerialPort};
use crate::labs::Decor;
use crate::period::PeriodConfig;
use crate::sequence::BoundaryPolicy;
use crate::state::Controls;

/// `P`
pub const PARTY: Binding = Binding::new(b'P', Action::TogglePartyMode, "Party Mode");
/// `C` cycles the banner here; the terminal is erased with `E`
pub const BANNER: Binding = Binding::new(b'C', Action::CycleBanner, "Change Background Color");
/// `E`
pub const ERASE: Binding = Binding::new(b'E', Action::ClearTerminal, "Erase Terminal Window");
/// `F`
pub const FLOOD: Binding = Binding::new(b'F', Action::ToggleFlood, "Flood Character");

/// Menu order as printed to the terminal
pub const COMMANDS: CommandTable =
    CommandTable::new(&[PARTY, BANNER, ERASE, FLASH_LED, FLOOD, MENU, QUIT]);

#[allow(missing_docs)]
pub const CONFIG: LabConfig = LabConfig {
    title: "Button Menu",
    banner: Color::DarkBlue,
    commands: COMMANDS,
    policy: BoundaryPolicy::Stop,
    pace: PeriodConfig {
        initial: 1,
        step: 1,
        safe_default: 1,
    },
    heartbeat: HeartbeatConfig::DEFAULT,
    clock_hz: SYSTEM_CLOCK_HZ,
    splash: true,
    trace: false,
};

/// Power-up shared state. Nothing is sequenced, so the cursor has one frame.
pub const CONTROLS: Controls = match Controls::new(&CONFIG, 1) {
    Ok(controls) => controls,
    Err(_) => panic!("menu lab state"),
};

const LAST_ROW: i32 = 30;
const COUNT_ROW: i32 = 40;

/// Counts press edges on the button pad and shows the tally under the banner
pub struct MenuLab<B> {
    buttons: B,
    decor: Decor,
    held: Option<Button>,
    last: Option<Button>,
    presses: u32,
    stale: bool,
}

impl<B: ButtonPad> MenuLab<B> {
    #[allow(missing_docs)]
    pub fn new(buttons: B) -> Self {
        MenuLab {
            buttons,
            decor: Decor::new(),
            held: None,
            last: None,
            presses: 0,
            stale: true,
        }
    }

    /// Most recently pressed button
    pub fn last_pressed(&self) -> Option<Button> {
        self.last
    }

    /// Press edges seen so far
    pub fn presses(&self) -> u32 {
        self.presses
    }

    fn sample_buttons(&mut self) {
        let pressed = self.buttons.pressed();
        if pressed.is_some() && pressed != self.held {
            self.presses = self.presses.wrapping_add(1);
            self.last = pressed;
            self.stale = true;
        }
        self.held = pressed;
    }
}

impl<B: ButtonPad> Lab for MenuLab<B> {
    fn config(&self) -> &LabConfig {
        &CONFIG
    }

    fn render<S: SerialPort, D: Display>(
        &mut self,
        controls: &Controls,
        console: &mut Console<S>,
        screen: &mut Screen<D>,
    ) {
        self.sample_buttons();
        if self.decor.render(CONFIG.title, controls, console, screen) {
            self.stale = true;
        }
        if !self.stale {
            return;
        }
        self.stale = false;

        let mut line = Line::new();
        let _ = uwrite!(line, "Last: {}", self.last.map_or(0, Button::number));
        screen.centered_line(LAST_ROW, &line, Color::White);

        line.clear();
        let _ = uwrite!(line, "Presses: {}", self.presses);
        screen.centered_line(COUNT_ROW, &line, Color::White);
    }
}
