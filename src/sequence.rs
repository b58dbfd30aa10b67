//! Precomputed output sequences and the cursor that walks them

use modular_bitfield::prelude::*;
use ufmt::derive::uDebug;

use crate::error::Error;

/// Stepper coil lines, one bit per line, line A in bit 0
#[bitfield(bits = 8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoilPattern {
    pub coil_a: bool,
    pub coil_b: bool,
    pub coil_c: bool,
    pub coil_d: bool,
    #[skip]
    __: B4,
}

impl CoilPattern {
    /// Pattern from the low nibble of `bits`
    pub const fn from_bits(bits: u8) -> Self {
        CoilPattern::from_bytes([bits & 0x0F])
    }

    /// Coil levels in line order
    pub fn levels(self) -> [bool; 4] {
        [self.coil_a(), self.coil_b(), self.coil_c(), self.coil_d()]
    }
}

/// One step of hardware output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFrame {
    /// Square wave: `period` and high time `duty`, in PWM clock ticks
    Tone {
        #[allow(missing_docs)]
        period: u32,
        #[allow(missing_docs)]
        duty: u32,
    },
    /// Tone output silenced for one tick
    Rest,
    /// Energise the stepper coils
    Coils(CoilPattern),
}

impl OutputFrame {
    /// Tone at 50% duty
    pub const fn note(period: u32) -> Self {
        OutputFrame::Tone {
            period,
            duty: period / 2,
        }
    }

    /// Stepper phase from the low nibble of `bits`
    pub const fn phase(bits: u8) -> Self {
        OutputFrame::Coils(CoilPattern::from_bits(bits))
    }
}

/// What happens when the cursor runs off the end of its sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum BoundaryPolicy {
    /// Hold at the last frame and let playback go idle
    Stop,
    /// Continue from the opposite end
    Wrap,
}

/// Direction of travel through a sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Direction {
    #[allow(missing_docs)]
    Forward,
    #[allow(missing_docs)]
    Reverse,
}

/// Result of one cursor step
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Advance {
    /// Moved one position
    Moved,
    /// Crossed the boundary and continued from the other end
    Wrapped,
    /// Stayed put: the first frame after a rewind, or a stop-policy boundary
    Held,
}

/// Index into a fixed-length sequence. Always within `0..len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceCursor {
    position: usize,
    len: usize,
    policy: BoundaryPolicy,
}

impl SequenceCursor {
    /// Cursor at position 0 of a sequence of `len` frames
    pub const fn new(len: usize, policy: BoundaryPolicy) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::EmptySequence);
        }
        Ok(SequenceCursor {
            position: 0,
            len,
            policy,
        })
    }

    #[allow(missing_docs)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(missing_docs)]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Back to the first frame
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Whether `direction` would run off the end of the sequence from here
    pub fn at_boundary(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.position == self.len - 1,
            Direction::Reverse => self.position == 0,
        }
    }

    /// Move one position, applying the boundary policy at either end
    pub fn advance(&mut self, direction: Direction) -> Advance {
        let last = self.len - 1;
        match (direction, self.policy) {
            (Direction::Forward, _) if self.position < last => {
                self.position += 1;
                Advance::Moved
            }
            (Direction::Reverse, _) if self.position > 0 => {
                self.position -= 1;
                Advance::Moved
            }
            (_, BoundaryPolicy::Stop) => Advance::Held,
            (Direction::Forward, BoundaryPolicy::Wrap) => {
                self.position = 0;
                Advance::Wrapped
            }
            (Direction::Reverse, BoundaryPolicy::Wrap) => {
                self.position = last;
                Advance::Wrapped
            }
        }
    }
}

/// Where playback stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum PlaybackState {
    /// Nothing is being output
    Idle,
    /// A frame was applied on the last tick
    Advancing,
    /// The last frame of a stop-policy sequence is playing out
    EndOfSequence,
}

/// What the ticker should do this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do
    Rest,
    /// Playback was just halted by the mode; silence the output
    Release,
    /// Apply the frame at `position`, which the cursor reached per `advance`
    Play {
        #[allow(missing_docs)]
        position: usize,
        #[allow(missing_docs)]
        advance: Advance,
    },
    /// A stop-policy sequence has finished; silence the output and go idle
    Finished,
}

/// Cursor plus the playback state machine.
///
/// The cursor rests on the frame most recently applied. Each tick moves it
/// first and then plays where it landed, so a change of direction steps back
/// straight away. After a rewind the first tick plays frame 0 without moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playback {
    cursor: SequenceCursor,
    state: PlaybackState,
    started: bool,
}

impl Playback {
    #[allow(missing_docs)]
    pub const fn new(cursor: SequenceCursor) -> Self {
        Playback {
            cursor,
            state: PlaybackState::Idle,
            started: false,
        }
    }

    #[allow(missing_docs)]
    pub fn cursor(&self) -> &SequenceCursor {
        &self.cursor
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Play from the first frame on the next tick
    pub fn rewind(&mut self) {
        self.cursor.rewind();
        self.started = false;
        if self.state == PlaybackState::EndOfSequence {
            self.state = PlaybackState::Advancing;
        }
    }

    /// Run the state machine once. `direction` is `None` when the current
    /// mode does not advance.
    ///
    /// A stop-policy sequence that has run out stays finished in that
    /// direction until it is rewound.
    pub fn step(&mut self, direction: Option<Direction>) -> Step {
        let Some(direction) = direction else {
            if self.state == PlaybackState::Idle {
                return Step::Rest;
            }
            self.state = PlaybackState::Idle;
            return Step::Release;
        };

        if !self.started {
            self.started = true;
            return self.play(direction, Advance::Held);
        }
        match self.cursor.advance(direction) {
            Advance::Held => {
                self.state = PlaybackState::Idle;
                Step::Finished
            }
            advance => self.play(direction, advance),
        }
    }

    fn play(&mut self, direction: Direction, advance: Advance) -> Step {
        let last = self.cursor.policy() == BoundaryPolicy::Stop && self.cursor.at_boundary(direction);
        self.state = if last {
            PlaybackState::EndOfSequence
        } else {
            PlaybackState::Advancing
        };
        Step::Play {
            position: self.cursor.position(),
            advance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: Option<Direction> = Some(Direction::Forward);
    const REVERSE: Option<Direction> = Some(Direction::Reverse);

    fn played(step: Step) -> usize {
        match step {
            Step::Play { position, .. } => position,
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    #[test]
    fn empty_sequences_are_rejected() {
        assert_eq!(
            SequenceCursor::new(0, BoundaryPolicy::Wrap),
            Err(Error::EmptySequence)
        );
    }

    #[test]
    fn stop_policy_holds_at_either_end() {
        let mut cursor = SequenceCursor::new(3, BoundaryPolicy::Stop).unwrap();
        assert_eq!(cursor.advance(Direction::Reverse), Advance::Held);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.advance(Direction::Forward), Advance::Moved);
        assert_eq!(cursor.advance(Direction::Forward), Advance::Moved);
        assert_eq!(cursor.advance(Direction::Forward), Advance::Held);
        assert_eq!(cursor.advance(Direction::Forward), Advance::Held);
        assert_eq!(cursor.position(), 2);
        assert!(cursor.at_boundary(Direction::Forward));
        assert!(!cursor.at_boundary(Direction::Reverse));
    }

    #[test]
    fn wrap_policy_continues_from_the_other_end() {
        let mut cursor = SequenceCursor::new(4, BoundaryPolicy::Wrap).unwrap();
        assert_eq!(cursor.advance(Direction::Reverse), Advance::Wrapped);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.advance(Direction::Forward), Advance::Wrapped);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn single_frame_sequences_stay_in_range() {
        for policy in [BoundaryPolicy::Stop, BoundaryPolicy::Wrap] {
            let mut cursor = SequenceCursor::new(1, policy).unwrap();
            for direction in [Direction::Forward, Direction::Reverse, Direction::Forward] {
                cursor.advance(direction);
                assert_eq!(cursor.position(), 0);
            }
        }
    }

    #[test]
    fn first_tick_plays_the_first_frame_in_place() {
        let cursor = SequenceCursor::new(4, BoundaryPolicy::Wrap).unwrap();
        let mut playback = Playback::new(cursor);
        assert_eq!(
            playback.step(FORWARD),
            Step::Play { position: 0, advance: Advance::Held }
        );
        assert_eq!(
            playback.step(FORWARD),
            Step::Play { position: 1, advance: Advance::Moved }
        );
        assert_eq!(playback.cursor().position(), 1);
    }

    #[test]
    fn reversing_steps_back_at_once() {
        let cursor = SequenceCursor::new(4, BoundaryPolicy::Wrap).unwrap();
        let mut playback = Playback::new(cursor);
        assert_eq!(played(playback.step(FORWARD)), 0);
        assert_eq!(played(playback.step(FORWARD)), 1);
        assert_eq!(played(playback.step(FORWARD)), 2);
        assert_eq!(played(playback.step(REVERSE)), 1);
        assert_eq!(played(playback.step(REVERSE)), 0);
        assert_eq!(
            playback.step(REVERSE),
            Step::Play { position: 3, advance: Advance::Wrapped }
        );
    }

    #[test]
    fn last_frame_gets_a_full_tick_before_finishing() {
        let cursor = SequenceCursor::new(2, BoundaryPolicy::Stop).unwrap();
        let mut playback = Playback::new(cursor);

        assert_eq!(played(playback.step(FORWARD)), 0);
        assert_eq!(playback.state(), PlaybackState::Advancing);
        assert_eq!(
            playback.step(FORWARD),
            Step::Play { position: 1, advance: Advance::Moved }
        );
        assert_eq!(playback.state(), PlaybackState::EndOfSequence);
        assert_eq!(playback.step(FORWARD), Step::Finished);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.step(None), Step::Rest);
    }

    #[test]
    fn finished_sequences_stay_finished_until_rewound() {
        let cursor = SequenceCursor::new(2, BoundaryPolicy::Stop).unwrap();
        let mut playback = Playback::new(cursor);
        playback.step(FORWARD);
        playback.step(FORWARD);
        assert_eq!(playback.step(FORWARD), Step::Finished);

        // Resuming forward does not replay the last frame
        assert_eq!(playback.step(FORWARD), Step::Finished);
        assert_eq!(playback.cursor().position(), 1);

        playback.rewind();
        assert_eq!(played(playback.step(FORWARD)), 0);
    }

    #[test]
    fn halting_mid_sequence_releases_once() {
        let cursor = SequenceCursor::new(4, BoundaryPolicy::Wrap).unwrap();
        let mut playback = Playback::new(cursor);

        playback.step(FORWARD);
        playback.step(FORWARD);
        assert_eq!(playback.step(None), Step::Release);
        assert_eq!(playback.step(None), Step::Rest);
        assert_eq!(playback.cursor().position(), 1);
        assert_eq!(played(playback.step(FORWARD)), 2);
    }

    #[test]
    fn single_frame_stop_sequence_plays_once() {
        let cursor = SequenceCursor::new(1, BoundaryPolicy::Stop).unwrap();
        let mut playback = Playback::new(cursor);
        assert_eq!(played(playback.step(FORWARD)), 0);
        assert_eq!(playback.state(), PlaybackState::EndOfSequence);
        assert_eq!(playback.step(FORWARD), Step::Finished);
    }

    #[test]
    fn coil_patterns_map_bits_to_lines() {
        let pattern = CoilPattern::from_bits(0x6);
        assert_eq!(pattern.levels(), [false, true, true, false]);
        assert_eq!(CoilPattern::from_bits(0xF9).levels(), [true, false, false, true]);
        assert_eq!(OutputFrame::note(30578), OutputFrame::Tone { period: 30578, duty: 15289 });
    }
}
