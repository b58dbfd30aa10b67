//! Lab 8: stepper motor driven from the SysTick interrupt

#![no_std]
#![no_main]

use irq::{handler, scope};
use tm4c123g_labs::app::Frontend;
use tm4c123g_labs::board::{Board, SpinDelay};
use tm4c123g_labs::labs::stepper::{self, StepperLab};
use tm4c123g_labs::startup::Interrupt;
use tm4c123g_labs::state::{Controls, Shared};
use tm4c123g_labs::tick::{Motor, SequencePlayer, TickHandler};

static CONTROLS: Shared<Controls> = Shared::new(stepper::CONTROLS);

#[no_mangle]
pub fn lab_main(board: Board) {
    let mut frontend = Frontend::new(
        &CONTROLS,
        board.uart,
        board.oled,
        board.led,
        StepperLab::new(),
    );
    let mut ticker = TickHandler::new(
        &CONTROLS,
        SequencePlayer::new(&stepper::PHASES, Motor(board.coils)),
    );
    let mut systick = board.systick;

    frontend.start(&mut SpinDelay);
    {
        handler!(
            systick_handler = || {
                ticker.on_tick();
            }
        );

        scope(|s| {
            s.register(Interrupt::SysTick, systick_handler);
            frontend.run(|frontend| frontend.retime(&mut systick));
        });
    }

    // De-energise the coils even if no tick landed after `Q`
    ticker.on_tick();
}
