//! Lab 10: a song on the PWM buzzer, one note per SysTick

#![no_std]
#![no_main]

use irq::{handler, scope};
use tm4c123g_labs::app::Frontend;
use tm4c123g_labs::board::{Board, SpinDelay};
use tm4c123g_labs::labs::song::{self, SongLab};
use tm4c123g_labs::startup::Interrupt;
use tm4c123g_labs::state::{Controls, Shared};
use tm4c123g_labs::tick::{SequencePlayer, TickHandler, Voice};

static CONTROLS: Shared<Controls> = Shared::new(song::CONTROLS);

#[no_mangle]
pub fn lab_main(board: Board) {
    let mut frontend = Frontend::new(
        &CONTROLS,
        board.uart,
        board.oled,
        board.led,
        SongLab::new(),
    );
    let mut player = TickHandler::new(
        &CONTROLS,
        SequencePlayer::new(&song::SONG, Voice(board.buzzer)),
    );
    let mut systick = board.systick;

    frontend.start(&mut SpinDelay);
    {
        handler!(
            systick_handler = || {
                player.on_tick();
            }
        );

        scope(|s| {
            s.register(Interrupt::SysTick, systick_handler);
            frontend.run(|frontend| frontend.retime(&mut systick));
        });
    }

    // Silence the buzzer even if no tick landed after `Q`
    player.on_tick();
}
