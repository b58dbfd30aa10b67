//! Lab 9: interrupt latency sampler
//!
//! A slow 1 Hz tick reads the potentiometer and turns it into a requested rate
//! for a fast timer; the fast timer only counts how often it was serviced. Each
//! slow tick publishes what was requested against what was actually serviced.

use static_assertions::const_assert;
use ufmt::uwrite;

use crate::app::Lab;
use crate::command::{CommandTable, ERASE, FLASH_LED, MENU, QUIT};
use crate::config::{HeartbeatConfig, LabConfig, SYSTEM_CLOCK_HZ};
use crate::console::Console;
use crate::display::{Color, Display, Line, Screen};
use crate::hal::SerialPort;
use crate::period::PeriodConfig;
use crate::sequence::BoundaryPolicy;
use crate::state::{Controls, Readout};

/// Potentiometer channel that sets the fast-timer rate
pub const RATE_CHANNEL: usize = 0;

/// Fast-timer rate from power-up until the first capture [Hz]
pub const SERVICE_START_HZ: u32 = 10_000;

const_assert!(SERVICE_START_HZ > 0 && SERVICE_START_HZ <= SYSTEM_CLOCK_HZ);

/// Fast-timer reload value used before the first capture [clock ticks]
pub const fn initial_service_period(clock_hz: u32) -> u32 {
    let period = clock_hz / SERVICE_START_HZ;
    if period == 0 {
        1
    } else {
        period
    }
}

#[allow(missing_docs)]
pub const COMMANDS: CommandTable = CommandTable::new(&[ERASE, FLASH_LED, MENU, QUIT]);

#[allow(missing_docs)]
pub const CONFIG: LabConfig = LabConfig {
    title: "00010000 01000000",
    banner: Color::DarkBlue,
    commands: COMMANDS,
    policy: BoundaryPolicy::Stop,
    // The slow capture tick
    pace: PeriodConfig {
        initial: 1,
        step: 1,
        safe_default: 1,
    },
    heartbeat: HeartbeatConfig::DEFAULT,
    clock_hz: SYSTEM_CLOCK_HZ,
    splash: false,
    trace: false,
};

#[allow(missing_docs)]
pub const CONTROLS: Controls = match Controls::new(&CONFIG, 1) {
    Ok(controls) => controls,
    Err(_) => panic!("sampler lab state"),
};

/// Prints each new readout
#[derive(Debug, Default)]
pub struct SamplerLab {
    shown: Option<Readout>,
}

impl SamplerLab {
    #[allow(missing_docs)]
    pub const fn new() -> Self {
        SamplerLab { shown: None }
    }
}

impl Lab for SamplerLab {
    fn config(&self) -> &LabConfig {
        &CONFIG
    }

    fn render<S: SerialPort, D: Display>(
        &mut self,
        controls: &Controls,
        _console: &mut Console<S>,
        screen: &mut Screen<D>,
    ) {
        let readout = controls.readout;
        if self.shown == Some(readout) {
            return;
        }
        self.shown = Some(readout);

        let mut line = Line::new();
        let _ = uwrite!(line, "Req: {}", readout.requested);
        screen.text_line(26, &line);

        line.clear();
        let _ = uwrite!(line, "Srv: {}", readout.serviced);
        screen.text_line(38, &line);

        line.clear();
        let _ = uwrite!(line, "Per: {}", readout.period);
        screen.text_line(50, &line);
    }
}
