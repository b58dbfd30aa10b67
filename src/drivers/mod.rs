//! Register-level drivers for the lab peripherals the HAL does not cover

pub mod adc;
pub mod oled;
pub mod pwm;
pub mod timer;
