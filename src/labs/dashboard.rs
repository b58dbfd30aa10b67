//! Lab 3: three potentiometers shown as numbers or bars

use ufmt::uwrite;

use crate::app::Lab;
use crate::command::{Action, Binding, CommandTable, FLASH_LED, MENU, QUIT};
use crate::config::{HeartbeatConfig, LabConfig, ADC_FULL_SCALE, CHANNELS, SYSTEM_CLOCK_HZ};
use crate::console::Console;
use crate::display::{Color, Display, Line, Screen};
use crate::hal::SerialPort;
use crate::labs::menu::{BANNER, ERASE, FLOOD, PARTY};
use crate::labs::Decor;
use crate::period::PeriodConfig;
use crate::sequence::BoundaryPolicy;
use crate::state::{ChannelView, Controls};

#[allow(missing_docs)]
pub const COMMANDS: CommandTable = CommandTable::new(&[
    PARTY,
    BANNER,
    ERASE,
    FLASH_LED,
    FLOOD,
    MENU,
    Binding::new(
        b'1',
        Action::CycleChannelView(0),
        "Toggle Display Mode for First Potentiometer",
    ),
    Binding::new(
        b'2',
        Action::CycleChannelView(1),
        "Toggle Display Mode for Second Potentiometer",
    ),
    Binding::new(
        b'3',
        Action::CycleChannelView(2),
        "Toggle Display Mode for Third Potentiometer",
    ),
    QUIT,
]);

#[allow(missing_docs)]
pub const CONFIG: LabConfig = LabConfig {
    title: "Dashboard",
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

#[allow(missing_docs)]
pub const CONTROLS: Controls = match Controls::new(&CONFIG, 1) {
    Ok(controls) => controls,
    Err(_) => panic!("dashboard lab state"),
};

/// Bar color per channel
const BAR_COLORS: [Color; CHANNELS] = [Color::Red, Color::Green, Color::DeepSkyBlue];
/// Height of one channel row [px]
const ROW_HEIGHT: i32 = 16;

/// Scale a raw 12-bit reading to `0..=width` pixels
pub fn scale(raw: u16, width: i32) -> i32 {
    let raw = u32::from(raw).min(ADC_FULL_SCALE);
    let width = width.max(0) as u32;
    (width * raw / ADC_FULL_SCALE) as i32
}

/// Top and bottom rows of the band for `channel`
pub fn band(channel: usize) -> (i32, i32) {
    let top = ROW_HEIGHT * (channel as i32 + 1);
    (top, top + ROW_HEIGHT - 1)
}

/// Redraws a channel row only when its view or scaled value changes
#[derive(Debug, Default)]
pub struct DashboardLab {
    decor: Decor,
    shown: [Option<(ChannelView, i32)>; CHANNELS],
}

impl DashboardLab {
    #[allow(missing_docs)]
    pub const fn new() -> Self {
        DashboardLab {
            decor: Decor::new(),
            shown: [None; CHANNELS],
        }
    }
}

impl Lab for DashboardLab {
    fn config(&self) -> &LabConfig {
        &CONFIG
    }

    fn render<S: SerialPort, D: Display>(
        &mut self,
        controls: &Controls,
        console: &mut Console<S>,
        screen: &mut Screen<D>,
    ) {
        if self.decor.render(CONFIG.title, controls, console, screen) {
            self.shown = [None; CHANNELS];
        }

        let width = screen.display().width();
        let rows = controls.views.iter().zip(controls.samples.iter());
        for (channel, (&view, &raw)) in rows.enumerate() {
            let value = scale(raw, width);
            let Some(shown) = self.shown.get_mut(channel) else {
                continue;
            };
            if *shown == Some((view, value)) {
                continue;
            }
            *shown = Some((view, value));

            let (top, bottom) = band(channel);
            match view {
                ChannelView::Off => screen.histogram(top, bottom, 0, Color::Black),
                ChannelView::Numeric => {
                    screen.histogram(top, bottom, 0, Color::Black);
                    let mut line = Line::new();
                    let _ = uwrite!(line, "Pot {}: {}", channel + 1, value);
                    screen.text_line(top + 4, &line);
                }
                ChannelView::Histogram => {
                    let color = BAR_COLORS.get(channel).copied().unwrap_or(Color::White);
                    screen.histogram(top, bottom, value, color);
                }
            }
        }
    }
}
