//! Input dispatcher: one received byte in, one action out

use crate::command::{Action, CommandTable};
use crate::config::BANNER_PALETTE;
use crate::console::{Console, Event};
use crate::display::{Display, Screen};
use crate::hal::SerialPort;
use crate::state::{Controls, Shared, SystemMode};

/// Runs in the main loop. Sole owner of the serial console and the display.
pub struct Dispatcher<'a, S, D> {
    commands: CommandTable,
    shared: &'a Shared<Controls>,
    console: Console<S>,
    screen: Screen<D>,
}

impl<'a, S: SerialPort, D: Display> Dispatcher<'a, S, D> {
    #[allow(missing_docs)]
    pub fn new(
        commands: CommandTable,
        shared: &'a Shared<Controls>,
        console: Console<S>,
        screen: Screen<D>,
    ) -> Self {
        Dispatcher {
            commands,
            shared,
            console,
            screen,
        }
    }

    #[allow(missing_docs)]
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    #[allow(missing_docs)]
    pub fn shared(&self) -> &'a Shared<Controls> {
        self.shared
    }

    #[allow(missing_docs)]
    pub fn console(&self) -> &Console<S> {
        &self.console
    }

    #[allow(missing_docs)]
    pub fn screen(&self) -> &Screen<D> {
        &self.screen
    }

    /// Both output resources at once, for rendering
    pub fn outputs(&mut self) -> (&mut Console<S>, &mut Screen<D>) {
        (&mut self.console, &mut self.screen)
    }

    /// Nonblocking read from the serial console
    pub fn read_byte(&mut self) -> Option<u8> {
        self.console.read_byte()
    }

    /// Echo `symbol`, then run whatever it is bound to.
    ///
    /// Unbound bytes print the invalid-input reply and touch no state.
    pub fn dispatch(&mut self, symbol: u8) -> Action {
        self.console.write_byte(symbol);
        match self.commands.lookup(symbol) {
            Some(action) => {
                self.execute(action);
                action
            }
            None => {
                self.console.invalid();
                Action::Invalid
            }
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::ClearTerminal => self.console.clear(),
            Action::PrintMenu => self.console.menu(&self.commands),
            Action::ToggleHeartbeat => {
                let on = self.shared.lock(|c| {
                    c.heartbeat = !c.heartbeat;
                    c.heartbeat
                });
                self.console.trace(&Event::Heartbeat(on));
            }
            Action::Quit => {
                self.shared.lock(|c| {
                    c.running = false;
                    c.mode = SystemMode::Stopped;
                });
                self.console.goodbye();
                self.screen.goodbye();
                self.console.trace(&Event::Terminated);
            }
            Action::SetMode(mode) => {
                self.shared.lock(|c| c.set_mode(mode));
                self.console.trace(&Event::Mode(mode));
            }
            Action::SpeedUp | Action::SpeedDown => {
                let period = self.shared.lock(|c| {
                    if action == Action::SpeedUp {
                        c.period.increase();
                    } else {
                        c.period.decrease();
                    }
                    c.period
                });
                self.console.trace(&Event::Rate {
                    hz: period.rate(),
                    period: period.period_ticks(),
                });
            }
            Action::ToggleFlood => {
                let on = self.shared.lock(|c| {
                    c.flood = !c.flood;
                    c.flood
                });
                self.console.trace(&Event::Flood(on));
            }
            Action::TogglePartyMode => {
                let on = self.shared.lock(|c| {
                    c.party = !c.party;
                    c.party
                });
                self.console.trace(&Event::Party(on));
            }
            Action::CycleBanner => {
                let index = self.shared.lock(|c| {
                    c.banner = (c.banner + 1) % BANNER_PALETTE.len();
                    c.banner
                });
                self.console.trace(&Event::Banner(index as u32));
            }
            Action::CycleChannelView(channel) => {
                let view = self.shared.lock(|c| {
                    c.views.get_mut(usize::from(channel)).map(|view| {
                        *view = view.next();
                        *view
                    })
                });
                if let Some(view) = view {
                    self.console.trace(&Event::View { channel, view });
                }
            }
            Action::Invalid => self.console.invalid(),
        }
    }
}
