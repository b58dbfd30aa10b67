//! The main loop shared by every lab

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::command::Action;
use crate::config::LabConfig;
use crate::console::Console;
use crate::dispatch::Dispatcher;
use crate::display::{Display, Screen};
use crate::hal::{SerialPort, TickTimer};
use crate::heartbeat::Heartbeat;
use crate::state::{Controls, Shared};

/// Per-lab presentation on top of the common dispatcher
pub trait Lab {
    /// Static description of the lab
    fn config(&self) -> &LabConfig;

    /// First frame on the display, drawn after the splash
    fn on_start<D: Display>(&mut self, screen: &mut Screen<D>) {
        let config = self.config();
        screen.banner(config.title, config.banner);
    }

    /// Called once per main-loop iteration with a snapshot of the shared state
    fn render<S: SerialPort, D: Display>(
        &mut self,
        _controls: &Controls,
        _console: &mut Console<S>,
        _screen: &mut Screen<D>,
    ) {
    }
}

/// Whether the main loop should keep going
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    #[allow(missing_docs)]
    Running,
    /// `Q` was received
    Exited,
}

/// Main-loop side of a lab: dispatcher, heartbeat and lab presentation
pub struct Frontend<'a, S, D, P, L> {
    dispatcher: Dispatcher<'a, S, D>,
    heartbeat: Heartbeat<P>,
    lab: L,
    applied_period: Option<u32>,
}

impl<'a, S, D, P, L> Frontend<'a, S, D, P, L>
where
    S: SerialPort,
    D: Display,
    P: OutputPin,
    L: Lab,
{
    /// Assemble the main loop around the peripherals it owns
    pub fn new(shared: &'a Shared<Controls>, serial: S, display: D, led: P, lab: L) -> Self {
        let config = *lab.config();
        Frontend {
            dispatcher: Dispatcher::new(
                config.commands,
                shared,
                Console::new(serial, config.trace),
                Screen::new(display),
            ),
            heartbeat: Heartbeat::new(led, config.heartbeat),
            lab,
            applied_period: None,
        }
    }

    #[allow(missing_docs)]
    pub fn dispatcher(&self) -> &Dispatcher<'a, S, D> {
        &self.dispatcher
    }

    #[allow(missing_docs)]
    pub fn heartbeat(&self) -> &Heartbeat<P> {
        &self.heartbeat
    }

    #[allow(missing_docs)]
    pub fn lab(&self) -> &L {
        &self.lab
    }

    /// Power-up sequence: splash, clear terminal, menu, lab screen
    pub fn start<T: DelayMs<u32>>(&mut self, delay: &mut T) {
        let config = *self.lab.config();
        let (console, screen) = self.dispatcher.outputs();
        if config.splash {
            screen.splash(delay);
        }
        console.clear();
        console.menu(&config.commands);
        self.lab.on_start(screen);
    }

    /// One main-loop iteration. Returns `Exited` as soon as `Q` has been
    /// handled; bytes received after it are left unread.
    pub fn poll(&mut self) -> LoopState {
        let shared = self.dispatcher.shared();
        if !shared.lock(|c| c.running) {
            return LoopState::Exited;
        }
        self.heartbeat.poll(shared.lock(|c| c.heartbeat));

        while let Some(symbol) = self.dispatcher.read_byte() {
            if self.dispatcher.dispatch(symbol) == Action::Quit {
                self.heartbeat.poll(false);
                return LoopState::Exited;
            }
        }

        let controls = shared.snapshot();
        let (console, screen) = self.dispatcher.outputs();
        self.lab.render(&controls, console, screen);
        LoopState::Running
    }

    /// Push the current tick period to `timer` if it changed since last time
    pub fn retime<T: TickTimer>(&mut self, timer: &mut T) {
        let ticks = self
            .dispatcher
            .shared()
            .lock(|c| c.period.period_ticks());
        if self.applied_period != Some(ticks) {
            timer.set_period(ticks);
            self.applied_period = Some(ticks);
        }
    }

    /// Loop until `Q`, calling `each` at the top of every iteration
    pub fn run<F: FnMut(&mut Self)>(&mut self, mut each: F) {
        loop {
            each(self);
            if self.poll() == LoopState::Exited {
                break;
            }
        }
    }
}
