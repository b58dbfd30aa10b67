//! Periodic tick handler and the jobs it runs
//!
//! A tick is one timer interrupt, or one pass of the main loop in the
//! cooperative labs. Every job runs inside the shared-state lock, so the
//! dispatcher can never observe a half-applied tick.

use crate::hal::{AnalogInput, PinBank, ToneGenerator};
use crate::sequence::{Advance, OutputFrame, Step};
use crate::state::{Controls, Readout, Shared, SystemMode};

/// What one tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Mode does not advance; nothing was output
    Idle,
    /// Applied the frame at `position`
    Played {
        #[allow(missing_docs)]
        position: usize,
        #[allow(missing_docs)]
        advance: Advance,
    },
    /// Output silenced because the mode stopped advancing
    Released,
    /// A stop-policy sequence ran out; mode is now `Idle`
    Finished,
    /// Captured one sampler reading
    Sampled(Readout),
    /// Read every potentiometer channel
    Scanned,
    /// Counted one fast-timer interrupt
    Serviced,
    /// The program has quit
    Halted,
}

/// Work done once per tick
pub trait TickJob {
    /// Called with the shared state locked
    fn on_tick(&mut self, controls: &mut Controls) -> TickOutcome;

    /// Called once after `Q`; leave outputs safe
    fn halt(&mut self) {}
}

/// Binds a job to the shared state
pub struct TickHandler<'a, J> {
    shared: &'a Shared<Controls>,
    job: J,
    halted: bool,
}

impl<'a, J: TickJob> TickHandler<'a, J> {
    #[allow(missing_docs)]
    pub fn new(shared: &'a Shared<Controls>, job: J) -> Self {
        TickHandler {
            shared,
            job,
            halted: false,
        }
    }

    #[allow(missing_docs)]
    pub fn job(&self) -> &J {
        &self.job
    }

    /// Run one tick
    pub fn on_tick(&mut self) -> TickOutcome {
        let job = &mut self.job;
        let halted = &mut self.halted;
        self.shared.lock(|controls| {
            if controls.running {
                return job.on_tick(controls);
            }
            if !*halted {
                *halted = true;
                job.halt();
            }
            TickOutcome::Halted
        })
    }
}

/// Peripheral that turns output frames into signals
pub trait FrameSink {
    /// Output `frame`
    fn apply(&mut self, frame: OutputFrame);
    /// Stop outputting anything
    fn release(&mut self);
}

/// Plays tone frames on a tone generator
pub struct Voice<T>(pub T);

impl<T: ToneGenerator> FrameSink for Voice<T> {
    fn apply(&mut self, frame: OutputFrame) {
        match frame {
            OutputFrame::Tone { period, duty } if period > 0 => {
                self.0.configure_tone(period, duty)
            }
            _ => self.0.silence(),
        }
    }

    fn release(&mut self) {
        self.0.silence();
    }
}

/// Drives coil frames onto four stepper lines
pub struct Motor<P>(pub P);

impl<P: PinBank> FrameSink for Motor<P> {
    fn apply(&mut self, frame: OutputFrame) {
        if let OutputFrame::Coils(pattern) = frame {
            for (pin, level) in pattern.levels().into_iter().enumerate() {
                self.0.set_output(pin, level);
            }
        }
    }

    fn release(&mut self) {
        for pin in 0..4 {
            self.0.set_output(pin, false);
        }
    }
}

/// Walks a frame sequence in the direction the mode selects
pub struct SequencePlayer<K> {
    frames: &'static [OutputFrame],
    sink: K,
}

impl<K: FrameSink> SequencePlayer<K> {
    #[allow(missing_docs)]
    pub fn new(frames: &'static [OutputFrame], sink: K) -> Self {
        SequencePlayer { frames, sink }
    }

    #[allow(missing_docs)]
    pub fn sink(&self) -> &K {
        &self.sink
    }
}

impl<K: FrameSink> TickJob for SequencePlayer<K> {
    fn on_tick(&mut self, controls: &mut Controls) -> TickOutcome {
        match controls.playback.step(controls.mode.direction()) {
            Step::Rest => TickOutcome::Idle,
            Step::Release => {
                self.sink.release();
                TickOutcome::Released
            }
            Step::Play { position, advance } => {
                if let Some(&frame) = self.frames.get(position) {
                    self.sink.apply(frame);
                }
                controls.serviced = controls.serviced.wrapping_add(1);
                TickOutcome::Played { position, advance }
            }
            Step::Finished => {
                self.sink.release();
                controls.mode = SystemMode::Idle;
                TickOutcome::Finished
            }
        }
    }

    fn halt(&mut self) {
        self.sink.release();
    }
}

/// Slow sampler tick: turn the potentiometer into a requested fast-timer rate
pub struct SampleCapture<A> {
    adc: A,
    channel: usize,
    clock_hz: u32,
}

impl<A: AnalogInput> SampleCapture<A> {
    #[allow(missing_docs)]
    pub fn new(adc: A, channel: usize, clock_hz: u32) -> Self {
        SampleCapture {
            adc,
            channel,
            clock_hz,
        }
    }
}

impl<A: AnalogInput> TickJob for SampleCapture<A> {
    fn on_tick(&mut self, controls: &mut Controls) -> TickOutcome {
        let sample = u32::from(self.adc.read_adc(self.channel));
        let requested = sample * (self.clock_hz / 80_000) + 1;
        let readout = Readout {
            requested,
            serviced: controls.serviced,
            period: self.clock_hz.checked_div(requested).unwrap_or(self.clock_hz),
        };
        controls.readout = readout;
        controls.serviced = 0;
        TickOutcome::Sampled(readout)
    }
}

/// Fast sampler tick: count that the interrupt was serviced
pub struct ServiceCounter;

impl TickJob for ServiceCounter {
    fn on_tick(&mut self, controls: &mut Controls) -> TickOutcome {
        controls.serviced = controls.serviced.wrapping_add(1);
        TickOutcome::Serviced
    }
}

/// Reads every potentiometer channel into `Controls::samples`
pub struct ChannelScan<A>(pub A);

impl<A: AnalogInput> TickJob for ChannelScan<A> {
    fn on_tick(&mut self, controls: &mut Controls) -> TickOutcome {
        for (channel, sample) in controls.samples.iter_mut().enumerate() {
            *sample = self.0.read_adc(channel);
        }
        TickOutcome::Scanned
    }
}
