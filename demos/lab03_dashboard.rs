//! Lab 3: potentiometer dashboard
//!
//! The ADC scan is a cooperative tick at the top of every main-loop iteration.

#![no_std]
#![no_main]

use tm4c123g_labs::app::Frontend;
use tm4c123g_labs::board::{Board, SpinDelay};
use tm4c123g_labs::labs::dashboard::{self, DashboardLab};
use tm4c123g_labs::state::{Controls, Shared};
use tm4c123g_labs::tick::{ChannelScan, TickHandler};

static CONTROLS: Shared<Controls> = Shared::new(dashboard::CONTROLS);

#[no_mangle]
pub fn lab_main(board: Board) {
    let mut frontend = Frontend::new(
        &CONTROLS,
        board.uart,
        board.oled,
        board.led,
        DashboardLab::new(),
    );
    let mut scan = TickHandler::new(&CONTROLS, ChannelScan(board.adc));

    frontend.start(&mut SpinDelay);
    frontend.run(|_| {
        scan.on_tick();
    });
}
