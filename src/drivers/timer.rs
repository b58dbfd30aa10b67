//! Periodic timers that pace the tick handlers

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{NVIC, SYST};
use tm4c123x_hal::sysctl::{control_power, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::tm4c123x::{Interrupt, TIMER1};

use crate::hal::TickTimer;

/// SysTick reload register width
const SYST_MAX_RELOAD: u32 = 0x00FF_FFFF;
/// Timer A enable in GPTMCTL
const TAEN: u32 = 1 << 0;
/// Periodic mode in GPTMTAMR
const TAMR_PERIODIC: u32 = 0x2;
/// Timer A time-out in GPTMIMR and GPTMICR
const TATO: u32 = 1 << 0;

/// The core SysTick, firing the `SysTick` exception
pub struct SysTickTimer {
    syst: SYST,
}

impl SysTickTimer {
    /// Take the SysTick; it stays stopped until the first `set_period`
    pub fn new(mut syst: SYST) -> Self {
        syst.disable_interrupt();
        syst.disable_counter();
        syst.set_clock_source(SystClkSource::Core);
        SysTickTimer { syst }
    }
}

impl TickTimer for SysTickTimer {
    /// Periods longer than the 24-bit counter are clamped
    fn set_period(&mut self, ticks: u32) {
        let reload = ticks.saturating_sub(1).clamp(1, SYST_MAX_RELOAD);
        self.syst.set_reload(reload);
        self.syst.clear_current();
        self.syst.enable_counter();
        self.syst.enable_interrupt();
    }
}

/// 32-bit periodic TIMER1A, firing the `TIMER1A` interrupt
pub struct ServiceTimer {
    registers: TIMER1,
}

impl ServiceTimer {
    /// Power on TIMER1 and configure it as a stopped 32-bit periodic timer
    pub fn new(registers: TIMER1, power_control: &PowerControl) -> Self {
        control_power(power_control, Domain::Timer1, RunMode::Run, PowerState::On);
        registers.ctl.write(|w| unsafe { w.bits(0) });
        registers.cfg.write(|w| unsafe { w.bits(0) });
        registers.tamr.write(|w| unsafe { w.bits(TAMR_PERIODIC) });
        registers.icr.write(|w| unsafe { w.bits(TATO) });
        registers.imr.write(|w| unsafe { w.bits(TATO) });
        ServiceTimer { registers }
    }

    /// Stop counting and mask the interrupt
    pub fn stop(&mut self) {
        NVIC::mask(Interrupt::TIMER1A);
        self.registers.ctl.write(|w| unsafe { w.bits(0) });
    }

    /// Clear the time-out flag from inside the interrupt handler
    pub fn acknowledge() {
        let registers = unsafe { &*TIMER1::ptr() };
        registers.icr.write(|w| unsafe { w.bits(TATO) });
    }
}

impl TickTimer for ServiceTimer {
    fn set_period(&mut self, ticks: u32) {
        self.registers.ctl.write(|w| unsafe { w.bits(0) });
        self.registers
            .tailr
            .write(|w| unsafe { w.bits(ticks.saturating_sub(1).max(1)) });
        self.registers.ctl.write(|w| unsafe { w.bits(TAEN) });
        unsafe { NVIC::unmask(Interrupt::TIMER1A) };
    }
}
