//! Serial-menu dispatcher and periodic ticker for TM4C123G classroom labs
//!
//! Everything outside the `board` feature is free of register access and is
//! exercised on the host by `cargo test`.

#![cfg_attr(not(test), no_std)]
#![warn(dead_code)]
#![warn(missing_docs)]

#[cfg(all(feature = "board", not(debug_assertions)))]
extern crate panic_never;

pub mod app;
pub mod command;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod hal;
pub mod heartbeat;
pub mod labs;
pub mod period;
pub mod sequence;
pub mod state;
pub mod tick;

#[cfg(feature = "board")]
pub mod board;
#[cfg(feature = "board")]
pub mod builtins;
#[cfg(feature = "board")]
pub mod drivers;
#[cfg(feature = "board")]
pub mod startup;

pub use error::Error;
