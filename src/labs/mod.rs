//! The individual lab programs, each a `LabConfig` plus a `Lab` presentation

use crate::config::{BANNER_PALETTE, PARTY_PALETTE};
use crate::console::Console;
use crate::display::{Color, Display, Screen};
use crate::hal::SerialPort;
use crate::state::Controls;

pub mod dashboard;
pub mod menu;
pub mod sampler;
pub mod song;
pub mod stepper;

/// Main-loop iterations between flood characters
const FLOOD_EVERY: u32 = 3;

/// Terminal flood and display color effects shared by the menu-style labs
#[derive(Debug, Default)]
pub struct Decor {
    iteration: u32,
    party_index: usize,
    partying: bool,
    painted_banner: Option<usize>,
}

impl Decor {
    #[allow(missing_docs)]
    pub const fn new() -> Self {
        Decor {
            iteration: 0,
            party_index: 0,
            partying: false,
            painted_banner: None,
        }
    }

    /// Run one iteration of effects. Returns `true` when the whole screen was
    /// repainted and anything drawn below the banner must be drawn again.
    pub fn render<S: SerialPort, D: Display>(
        &mut self,
        title: &str,
        controls: &Controls,
        console: &mut Console<S>,
        screen: &mut Screen<D>,
    ) -> bool {
        self.iteration = self.iteration.wrapping_add(1);
        if controls.flood && self.iteration % FLOOD_EVERY == 0 {
            console.write_byte(b'@');
        }

        if controls.party {
            let color = PARTY_PALETTE
                .get(self.party_index)
                .copied()
                .unwrap_or(Color::DarkBlue);
            self.party_index = (self.party_index + 1) % PARTY_PALETTE.len();
            self.partying = true;
            self.painted_banner = None;
            screen.fill(color);
            screen.banner(title, color);
            return true;
        }

        let repaint = self.partying;
        if repaint {
            self.partying = false;
            screen.clear();
        }
        if repaint || self.painted_banner != Some(controls.banner) {
            let color = BANNER_PALETTE
                .get(controls.banner)
                .copied()
                .unwrap_or(Color::DarkBlue);
            screen.banner(title, color);
            self.painted_banner = Some(controls.banner);
        }
        repaint
    }
}
