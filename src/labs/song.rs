//! Lab 10: a melody played on the PWM buzzer, one note per tick

use static_assertions::const_assert_eq;
use ufmt::uwrite;

use crate::app::Lab;
use crate::command::{Action, Binding, CommandTable, ERASE, FLASH_LED, MENU, QUIT};
use crate::config::{HeartbeatConfig, LabConfig, SYSTEM_CLOCK_HZ};
use crate::console::{Console, Event};
use crate::display::{Color, Display, Line, Screen};
use crate::hal::SerialPort;
use crate::period::PeriodConfig;
use crate::sequence::{BoundaryPolicy, OutputFrame};
use crate::state::{Controls, SystemMode};

// Note periods in 16 MHz PWM clock ticks
const F: OutputFrame = OutputFrame::note(45815);
const G: OutputFrame = OutputFrame::note(40816);
const AB: OutputFrame = OutputFrame::note(38554);
const BB: OutputFrame = OutputFrame::note(34323);
const C: OutputFrame = OutputFrame::note(30578);
const DB: OutputFrame = OutputFrame::note(28862);
const EB: OutputFrame = OutputFrame::note(25713);
const REST: OutputFrame = OutputFrame::Rest;

/// Number of beats in [`SONG`]
pub const SONG_LEN: usize = 97;

/// One frame per beat
#[rustfmt::skip]
pub static SONG: [OutputFrame; SONG_LEN] = [
    F, F, G, AB, AB, G, F, REST,
    C, C, BB, AB, BB, C, REST, REST,
    F, F, G, AB, AB, BB, C, REST,
    DB, C, BB, AB, G, F, REST, REST,
    C, C, DB, EB, EB, DB, C, REST,
    BB, BB, C, DB, C, BB, AB, REST,
    AB, AB, BB, C, C, BB, AB, G,
    F, G, AB, BB, AB, G, F, REST,
    C, DB, EB, DB, C, BB, AB, REST,
    G, AB, BB, C, BB, AB, G, REST,
    F, F, AB, AB, C, C, BB, REST,
    AB, G, F, G, F, REST, REST, REST,
    F,
];

const_assert_eq!(SONG_LEN, 97);

#[allow(missing_docs)]
pub const COMMANDS: CommandTable = CommandTable::new(&[
    ERASE,
    Binding::new(b'F', Action::SetMode(SystemMode::Forward), "Play From the Start"),
    FLASH_LED,
    MENU,
    Binding::new(b'N', Action::SetMode(SystemMode::Normal), "Resume Playing"),
    QUIT,
    Binding::new(b'R', Action::SetMode(SystemMode::Reverse), "Play in Reverse"),
    Binding::new(b'S', Action::SetMode(SystemMode::Stopped), "Stop Playing"),
    Binding::new(b'+', Action::SpeedUp, "Increase Tempo"),
    Binding::new(b'-', Action::SpeedDown, "Decrease Tempo"),
]);

#[allow(missing_docs)]
pub const CONFIG: LabConfig = LabConfig {
    title: "Song Player",
    banner: Color::DarkBlue,
    commands: COMMANDS,
    policy: BoundaryPolicy::Stop,
    // Beats per second
    pace: PeriodConfig {
        initial: 4,
        step: 1,
        safe_default: 4,
    },
    heartbeat: HeartbeatConfig::DEFAULT,
    clock_hz: SYSTEM_CLOCK_HZ,
    splash: true,
    trace: false,
};

#[allow(missing_docs)]
pub const CONTROLS: Controls = match Controls::new(&CONFIG, SONG_LEN) {
    Ok(controls) => controls,
    Err(_) => panic!("song lab state"),
};

/// Dedication line and the note counter
#[derive(Debug, Default)]
pub struct SongLab {
    shown: Option<usize>,
    finished: bool,
}

impl SongLab {
    #[allow(missing_docs)]
    pub const fn new() -> Self {
        SongLab {
            shown: None,
            finished: false,
        }
    }
}

impl Lab for SongLab {
    fn config(&self) -> &LabConfig {
        &CONFIG
    }

    fn on_start<D: Display>(&mut self, screen: &mut Screen<D>) {
        screen.banner(CONFIG.title, CONFIG.banner);
        screen.centered_line(30, "A song for you.", Color::Salmon);
    }

    fn render<S: SerialPort, D: Display>(
        &mut self,
        controls: &Controls,
        console: &mut Console<S>,
        screen: &mut Screen<D>,
    ) {
        let finished = controls.mode == SystemMode::Idle;
        if finished && !self.finished {
            console.trace(&Event::EndOfSequence);
        }
        self.finished = finished;

        let position = controls.position();
        if self.shown == Some(position) {
            return;
        }
        self.shown = Some(position);

        let mut line = Line::new();
        let _ = uwrite!(line, "Note: {}/{}", position + 1, SONG_LEN);
        screen.text_line(50, &line);
    }
}
