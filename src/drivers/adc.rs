//! Potentiometer sampling on the analog-to-digital converter module
//!
//! Uses ADC0 sample sequencer 3, which holds a single step: select the input,
//! trigger from the processor, spin until the raw interrupt flag is set, and
//! pop the one result from the FIFO.

use tm4c123x_hal::gpio::{gpiod::*, Floating, Input};
use tm4c123x_hal::sysctl::{control_power, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::tm4c123x::{ADC0, GPIO_PORTD};

use crate::config::CHANNELS;
use crate::hal::AnalogInput;

/// Sequencer 3 bit in ACTSS, PSSI, RIS and ISC
const SS3: u32 = 1 << 3;
/// First sample is the end of the sequence and raises the interrupt flag
const SS3_END0_IE0: u32 = 0b0110;
/// Trigger-select field for sequencer 3 in EMUX
const EMUX_SS3: u32 = 0xF << 12;
/// Analog input number for each potentiometer channel
const INPUTS: [u32; CHANNELS] = [4, 5, 6];
/// PD1..=PD3
const ANALOG_PINS: u32 = 0b1110;

/// Pins handed over to the converter
pub type AnalogPins = (
    PD3<Input<Floating>>,
    PD2<Input<Floating>>,
    PD1<Input<Floating>>,
);

/// ADC0 reading the three potentiometers one conversion at a time
pub struct Adc {
    registers: ADC0,
    _pins: AnalogPins,
}

impl Adc {
    /// Power on ADC0 and set up sequencer 3 for processor-triggered single samples
    pub fn new(
        registers: ADC0,
        pins: AnalogPins,
        power_control: &PowerControl,
        oversample_multiplier: OverSampleMultiplier,
    ) -> Self {
        //
        // 1. Switch the pins from digital to analog
        //
        let portd = unsafe { &*GPIO_PORTD::ptr() };
        portd
            .den
            .modify(|r, w| unsafe { w.bits(r.bits() & !ANALOG_PINS) });
        portd
            .amsel
            .modify(|r, w| unsafe { w.bits(r.bits() | ANALOG_PINS) });

        //
        // 2. Power on the ADC peripheral
        //
        control_power(power_control, Domain::Adc0, RunMode::Run, PowerState::On);

        //
        // 3. Configure sequencer 3 (must be disabled while configuring)
        //
        registers
            .actss
            .modify(|r, w| unsafe { w.bits(r.bits() & !SS3) });
        // Processor trigger
        registers
            .emux
            .modify(|r, w| unsafe { w.bits(r.bits() & !EMUX_SS3) });
        registers.ssctl3.write(|w| unsafe { w.bits(SS3_END0_IE0) });
        // Hardware oversample-and-average
        registers
            .sac
            .write(|w| unsafe { w.bits(oversample_multiplier as u32) });

        //
        // 4. Enable the sequencer
        //
        registers
            .actss
            .modify(|r, w| unsafe { w.bits(r.bits() | SS3) });

        Self {
            registers,
            _pins: pins,
        }
    }
}

impl AnalogInput for Adc {
    /// Channels past the last potentiometer read as zero.
    ///
    /// This may loop indefinitely if the converter never finishes.
    fn read_adc(&mut self, channel: usize) -> u16 {
        let Some(&input) = INPUTS.get(channel) else {
            return 0;
        };
        self.registers.ssmux3.write(|w| unsafe { w.bits(input) });
        self.registers.pssi.write(|w| unsafe { w.bits(SS3) });
        while self.registers.ris.read().bits() & SS3 == 0 {}
        let sample = self.registers.ssfifo3.read().bits() & 0x0FFF;
        self.registers.isc.write(|w| unsafe { w.bits(SS3) });
        sample as u16
    }
}

/// Number of samples to take and average in hardware
/// per sample delivered to the FIFO
#[repr(u32)]
#[allow(missing_docs)]
pub enum OverSampleMultiplier {
    _1x,
    _2x,
    _4x,
    _8x,
    _16x,
    _32x,
    _64x,
}
