//! Lab 2: serial menu, LED heartbeat, terminal flood, party colors and the
//! button press counter, all polled from one loop

#![no_std]
#![no_main]

use tm4c123g_labs::app::Frontend;
use tm4c123g_labs::board::{Board, SpinDelay};
use tm4c123g_labs::labs::menu::{self, MenuLab};
use tm4c123g_labs::state::{Controls, Shared};

static CONTROLS: Shared<Controls> = Shared::new(menu::CONTROLS);

#[no_mangle]
pub fn lab_main(board: Board) {
    let mut frontend = Frontend::new(
        &CONTROLS,
        board.uart,
        board.oled,
        board.led,
        MenuLab::new(board.buttons),
    );
    frontend.start(&mut SpinDelay);
    frontend.run(|_| {});
}
