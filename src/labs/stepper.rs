//! Lab 8: four-phase stepper motor with selectable direction and speed

use static_assertions::const_assert;
use ufmt::uwrite;

use crate::app::Lab;
use crate::command::{Action, Binding, CommandTable, ERASE, FLASH_LED, MENU, QUIT};
use crate::config::{HeartbeatConfig, LabConfig, SYSTEM_CLOCK_HZ};
use crate::console::Console;
use crate::display::{Color, Display, Line, Screen};
use crate::hal::SerialPort;
use crate::period::PeriodConfig;
use crate::sequence::{BoundaryPolicy, OutputFrame};
use crate::state::{Controls, SystemMode};

/// Phases per electrical cycle
pub const PHASE_COUNT: usize = 4;

/// Full-step drive, two coils energised per phase
pub static PHASES: [OutputFrame; PHASE_COUNT] = [
    OutputFrame::phase(0x6),
    OutputFrame::phase(0xC),
    OutputFrame::phase(0x9),
    OutputFrame::phase(0x3),
];

#[allow(missing_docs)]
pub const COMMANDS: CommandTable = CommandTable::new(&[
    ERASE,
    Binding::new(b'F', Action::SetMode(SystemMode::Forward), "Follow Mode"),
    FLASH_LED,
    MENU,
    Binding::new(b'N', Action::SetMode(SystemMode::Normal), "Normal Mode"),
    QUIT,
    Binding::new(b'R', Action::SetMode(SystemMode::Reverse), "Reverse Mode"),
    Binding::new(b'S', Action::SetMode(SystemMode::Stopped), "Stop Mode"),
    Binding::new(b'+', Action::SpeedUp, "Increase Speed"),
    Binding::new(b'-', Action::SpeedDown, "Decrease Speed"),
]);

/// Steps per second at power-up, per `+`/`-`, and after an underflow
pub const PACE: PeriodConfig = PeriodConfig {
    initial: 200,
    step: 200,
    safe_default: 60,
};

const_assert!(PACE.safe_default > 0 && PACE.safe_default <= SYSTEM_CLOCK_HZ);

#[allow(missing_docs)]
pub const CONFIG: LabConfig = LabConfig {
    title: "Round & Round",
    banner: Color::DarkBlue,
    commands: COMMANDS,
    policy: BoundaryPolicy::Wrap,
    pace: PACE,
    heartbeat: HeartbeatConfig::DEFAULT,
    clock_hz: SYSTEM_CLOCK_HZ,
    splash: false,
    trace: false,
};

#[allow(missing_docs)]
pub const CONTROLS: Controls = match Controls::new(&CONFIG, PHASE_COUNT) {
    Ok(controls) => controls,
    Err(_) => panic!("stepper lab state"),
};

/// Shows the mode and shaft speed whenever either changes
#[derive(Debug, Default)]
pub struct StepperLab {
    shown: Option<(SystemMode, u32)>,
}

impl StepperLab {
    #[allow(missing_docs)]
    pub const fn new() -> Self {
        StepperLab { shown: None }
    }
}

impl Lab for StepperLab {
    fn config(&self) -> &LabConfig {
        &CONFIG
    }

    fn render<S: SerialPort, D: Display>(
        &mut self,
        controls: &Controls,
        _console: &mut Console<S>,
        screen: &mut Screen<D>,
    ) {
        let now = (controls.mode, controls.period.rate());
        if self.shown == Some(now) {
            return;
        }
        self.shown = Some(now);

        let mut line = Line::new();
        let _ = uwrite!(line, "Mode: {:?}", controls.mode);
        screen.text_line(26, &line);

        line.clear();
        let _ = uwrite!(line, "RPM: {}", controls.period.rpm());
        screen.text_line(38, &line);

        line.clear();
        let _ = uwrite!(line, "Steps/s: {}", controls.period.rate());
        screen.text_line(50, &line);
    }
}
