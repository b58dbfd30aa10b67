//! Tone output on PWM0 generator 0, pin PB6 (M0PWM0)

use tm4c123x_hal::gpio::{gpiob::PB6, AlternateFunction, PushPull, AF4};
use tm4c123x_hal::sysctl::{control_power, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::tm4c123x::PWM0;

use crate::hal::ToneGenerator;

/// Output A high on LOAD, low on CMPA while counting down
const GENA_HIGH_ON_LOAD_LOW_ON_CMPA: u32 = 0x8C;
/// M0PWM0 output enable
const PWM0EN: u32 = 1 << 0;
/// Generator counter width
const MAX_PERIOD: u32 = 1 << 16;

/// Piezo buzzer driven by a square wave
pub struct Buzzer {
    registers: PWM0,
    _pin: PB6<AlternateFunction<AF4, PushPull>>,
}

impl Buzzer {
    /// Power on PWM0 and leave the generator stopped
    pub fn new(
        registers: PWM0,
        pin: PB6<AlternateFunction<AF4, PushPull>>,
        power_control: &PowerControl,
    ) -> Self {
        control_power(power_control, Domain::Pwm0, RunMode::Run, PowerState::On);
        registers._0_ctl.write(|w| unsafe { w.bits(0) });
        registers
            ._0_gena
            .write(|w| unsafe { w.bits(GENA_HIGH_ON_LOAD_LOW_ON_CMPA) });
        Buzzer {
            registers,
            _pin: pin,
        }
    }
}

impl ToneGenerator for Buzzer {
    fn configure_tone(&mut self, period: u32, duty: u32) {
        let period = period.clamp(2, MAX_PERIOD);
        let load = period - 1;
        let compare = period.saturating_sub(duty).min(load);

        // The generator must be stopped to change its period
        self.registers._0_ctl.write(|w| unsafe { w.bits(0) });
        self.registers._0_load.write(|w| unsafe { w.bits(load) });
        self.registers._0_cmpa.write(|w| unsafe { w.bits(compare) });
        self.registers._0_ctl.write(|w| unsafe { w.bits(1) });
        self.registers
            .enable
            .modify(|r, w| unsafe { w.bits(r.bits() | PWM0EN) });
    }

    fn silence(&mut self) {
        self.registers
            .enable
            .modify(|r, w| unsafe { w.bits(r.bits() & !PWM0EN) });
        self.registers._0_ctl.write(|w| unsafe { w.bits(0) });
    }
}
