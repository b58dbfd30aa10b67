//! State shared between the main loop and the tick interrupt

use core::cell::RefCell;

use critical_section::Mutex;
use ufmt::derive::uDebug;

use crate::config::{LabConfig, CHANNELS};
use crate::error::Error;
use crate::period::PeriodRegister;
use crate::sequence::{BoundaryPolicy, Direction, Playback, SequenceCursor};

/// Operating mode selected over the serial console
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum SystemMode {
    /// Output halted by the operator
    Stopped,
    /// Advance forward from wherever the cursor is
    Normal,
    /// Advance forward, restarting a stop-policy sequence from its first frame
    Forward,
    /// Advance backward from wherever the cursor is
    Reverse,
    /// The sequence ran out under the stop policy
    Idle,
}

impl SystemMode {
    /// Direction the ticker should move in, if it should move at all
    pub fn direction(self) -> Option<Direction> {
        match self {
            SystemMode::Normal | SystemMode::Forward => Some(Direction::Forward),
            SystemMode::Reverse => Some(Direction::Reverse),
            SystemMode::Stopped | SystemMode::Idle => None,
        }
    }
}

/// How one potentiometer is shown on the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum ChannelView {
    /// Row left blank
    Off,
    /// Scaled value printed as a number
    Numeric,
    /// Scaled value drawn as a bar
    Histogram,
}

impl ChannelView {
    /// Next view in the Off, Numeric, Histogram cycle
    pub fn next(self) -> Self {
        match self {
            ChannelView::Off => ChannelView::Numeric,
            ChannelView::Numeric => ChannelView::Histogram,
            ChannelView::Histogram => ChannelView::Off,
        }
    }
}

/// One capture of the interrupt-latency sampler
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readout {
    /// Fast-timer rate requested by the potentiometer [Hz]
    pub requested: u32,
    /// Fast-timer interrupts serviced since the previous capture
    pub serviced: u32,
    /// Fast-timer reload value derived from the request [clock ticks]
    pub period: u32,
}

impl Readout {
    /// Nothing captured yet
    pub const EMPTY: Readout = Readout {
        requested: 0,
        serviced: 0,
        period: 0,
    };
}

/// Everything the dispatcher and ticker both touch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    /// Selected by the dispatcher, read by the ticker
    pub mode: SystemMode,
    /// Cleared once by `Q`
    pub running: bool,
    /// LED heartbeat enable
    pub heartbeat: bool,
    /// Tick rate
    pub period: PeriodRegister,
    /// Cursor through the output sequence
    pub playback: Playback,
    /// Ticks serviced, for operator feedback
    pub serviced: u32,
    /// Latest sampler capture
    pub readout: Readout,
    /// Latest raw potentiometer readings
    pub samples: [u16; CHANNELS],
    /// Per-channel dashboard view
    pub views: [ChannelView; CHANNELS],
    /// Flood the terminal with '@'
    pub flood: bool,
    /// Cycle the display colors
    pub party: bool,
    /// Index into the banner palette
    pub banner: usize,
}

impl Controls {
    /// Power-up state for a lab whose output sequence has `sequence_len` frames
    pub const fn new(config: &LabConfig, sequence_len: usize) -> Result<Self, Error> {
        let cursor = match SequenceCursor::new(sequence_len, config.policy) {
            Ok(cursor) => cursor,
            Err(e) => return Err(e),
        };
        Ok(Controls {
            mode: SystemMode::Stopped,
            running: true,
            heartbeat: true,
            period: PeriodRegister::new(config.pace, config.clock_hz),
            playback: Playback::new(cursor),
            serviced: 0,
            readout: Readout::EMPTY,
            samples: [0; CHANNELS],
            views: [ChannelView::Off; CHANNELS],
            flood: false,
            party: false,
            banner: 0,
        })
    }

    /// Select a mode. `Forward` also rewinds a stop-policy sequence; a
    /// wrapping one carries on from the frame it is on.
    pub fn set_mode(&mut self, mode: SystemMode) {
        if mode == SystemMode::Forward && self.policy() == BoundaryPolicy::Stop {
            self.playback.rewind();
        }
        self.mode = mode;
    }

    /// Frame most recently applied, or the one the next tick plays after a rewind
    pub fn position(&self) -> usize {
        self.playback.cursor().position()
    }

    /// Boundary policy of the output sequence
    pub fn policy(&self) -> BoundaryPolicy {
        self.playback.cursor().policy()
    }
}

/// A value guarded by a critical section.
///
/// The tick interrupt and the main loop both reach `Controls` through
/// [`Shared::lock`]; on a single core the critical section masks the tick for
/// the duration of the closure, so neither side ever sees a half-made update.
pub struct Shared<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> Shared<T> {
    /// Wrap `value`; usable in a `static`
    pub const fn new(value: T) -> Self {
        Shared {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access. Must not be re-entered from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

impl<T: Copy> Shared<T> {
    /// Copy of the current value
    pub fn snapshot(&self) -> T {
        self.lock(|value| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labs::song;

    #[test]
    fn forward_rewinds_but_normal_resumes() {
        let mut controls = Controls::new(&song::CONFIG, 4).unwrap();
        controls.set_mode(SystemMode::Normal);
        for _ in 0..3 {
            controls.playback.step(controls.mode.direction());
        }
        assert_eq!(controls.position(), 2);

        controls.set_mode(SystemMode::Reverse);
        assert_eq!(controls.position(), 2);

        controls.set_mode(SystemMode::Forward);
        assert_eq!(controls.position(), 0);
        assert_eq!(controls.mode, SystemMode::Forward);
    }

    #[test]
    fn forward_keeps_a_wrapping_sequence_in_phase() {
        let config = LabConfig {
            policy: BoundaryPolicy::Wrap,
            ..song::CONFIG
        };
        let mut controls = Controls::new(&config, 4).unwrap();
        controls.set_mode(SystemMode::Normal);
        for _ in 0..3 {
            controls.playback.step(controls.mode.direction());
        }
        assert_eq!(controls.position(), 2);

        controls.set_mode(SystemMode::Forward);
        assert_eq!(controls.position(), 2);
        controls.playback.step(controls.mode.direction());
        assert_eq!(controls.position(), 3);
    }

    #[test]
    fn views_cycle_back_to_off() {
        let view = ChannelView::Off;
        assert_eq!(view.next(), ChannelView::Numeric);
        assert_eq!(view.next().next(), ChannelView::Histogram);
        assert_eq!(view.next().next().next(), ChannelView::Off);
    }

    #[test]
    fn shared_state_round_trips_through_the_lock() {
        let shared = Shared::new(Controls::new(&song::CONFIG, 1).unwrap());
        shared.lock(|c| c.heartbeat = false);
        assert!(!shared.snapshot().heartbeat);
        assert_eq!(shared.lock(|c| c.serviced), 0);
    }
}
