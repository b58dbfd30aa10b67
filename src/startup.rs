//! Handles board-specific CPU startup

use cortex_m_rt::{entry, exception, ExceptionFrame};

use super::board::{clocks, safe, Board};
use crate::config::BAUD_RATE;
use tm4c123x_hal::{
    gpio::{GpioExt, AF1},
    serial,
    sysctl::SysctlExt,
    time::Bps,
};

use irq::{handler, scope, scoped_interrupts};

#[cfg(debug_assertions)]
use core::fmt::Write;

// Provided by each lab binary
extern "Rust" {
    fn lab_main(board: Board);
}

/// Reset entry: install the default handlers, bring up the board, run the lab
#[entry]
unsafe fn call_main() -> ! {
    // Initialize runtime-defined exception handlers before running any
    // lab code or doing anything that might trigger them
    handler!(systick_default_handler = || {});
    handler!(pendsv_default_handler = || {});
    handler!(svcall_default_handler = || {});

    scope(|default| {
        default.register(Interrupt::SysTick, systick_default_handler);
        default.register(Interrupt::PendSV, pendsv_default_handler);
        default.register(Interrupt::SVCall, svcall_default_handler);

        let board = Board::new();
        lab_main(board);
    });

    // The lab has quit; nothing left to do but sleep
    loop {
        cortex_m::asm::wfi();
    }
}

/// Report the stacked frame on UART0 in debug builds, then park
#[exception]
unsafe fn HardFault(_sf: &ExceptionFrame) -> ! {
    let peripherals = tm4c123x_hal::Peripherals::steal();
    let sysctl = peripherals.SYSCTL.constrain();
    let mut pins = peripherals.GPIO_PORTA.split(&sysctl.power_control);
    let mut _uart = serial::Serial::uart0(
        peripherals.UART0,
        pins.pa1.into_af_push_pull::<AF1>(&mut pins.control),
        pins.pa0.into_af_push_pull::<AF1>(&mut pins.control),
        (),
        (),
        Bps(BAUD_RATE),
        serial::NewlineMode::SwapLFtoCRLF,
        clocks(),
        &sysctl.power_control,
    );

    // Debug formatter can panic, so this can't be run with panic_never
    #[cfg(debug_assertions)]
    writeln!(_uart, "SF: {:?}", _sf).unwrap_or_default();

    safe();
}

#[exception]
unsafe fn NonMaskableInt() {
    safe();
}

#[exception]
fn MemoryManagement() {
    safe();
}

#[exception]
fn BusFault() {
    safe();
}

#[exception]
fn UsageFault() {
    safe();
}

#[exception]
fn DebugMonitor() {}

/// Device interrupts a lab does not handle
#[exception]
unsafe fn DefaultHandler(_irq_number: i16) {}

scoped_interrupts! {
    /// Core exceptions a lab can take over for the length of an `irq::scope`.
    /// The preemptive labs run their tick from `SysTick`.
    #[allow(missing_docs)]
    pub enum Interrupt {
        SysTick,
        SVCall,
        PendSV
    }

    use #[exception];
}
