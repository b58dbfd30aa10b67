//! Lab 9: interrupt latency sampler
//!
//! SysTick at 1 Hz turns the potentiometer into a requested rate for TIMER1A,
//! and TIMER1A counts how often it actually got serviced.

#![no_std]
#![no_main]

use irq::{handler, scope};
use tm4c123g_labs::app::Frontend;
use tm4c123g_labs::board::{Board, SpinDelay};
use tm4c123g_labs::drivers::timer::ServiceTimer;
use tm4c123g_labs::hal::TickTimer;
use tm4c123g_labs::labs::sampler::{self, SamplerLab};
use tm4c123g_labs::startup::Interrupt;
use tm4c123g_labs::state::{Controls, Shared};
use tm4c123g_labs::tick::{SampleCapture, ServiceCounter, TickHandler, TickOutcome};
use tm4c123x_hal::tm4c123x::interrupt;

static CONTROLS: Shared<Controls> = Shared::new(sampler::CONTROLS);

#[interrupt]
fn TIMER1A() {
    ServiceTimer::acknowledge();
    TickHandler::new(&CONTROLS, ServiceCounter).on_tick();
}

#[no_mangle]
pub fn lab_main(board: Board) {
    let config = sampler::CONFIG;
    let mut frontend = Frontend::new(
        &CONTROLS,
        board.uart,
        board.oled,
        board.led,
        SamplerLab::new(),
    );
    let mut capture = TickHandler::new(
        &CONTROLS,
        SampleCapture::new(board.adc, sampler::RATE_CHANNEL, config.clock_hz),
    );
    let mut service_timer = board.service_timer;
    let mut systick = board.systick;

    frontend.start(&mut SpinDelay);
    service_timer.set_period(sampler::initial_service_period(config.clock_hz));
    {
        handler!(
            systick_handler = || {
                if let TickOutcome::Sampled(readout) = capture.on_tick() {
                    service_timer.set_period(readout.period);
                }
            }
        );

        scope(|s| {
            s.register(Interrupt::SysTick, systick_handler);
            frontend.run(|frontend| frontend.retime(&mut systick));
        });
    }

    service_timer.stop();
}
