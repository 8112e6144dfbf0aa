//! Firmware for an 8x5 LED matrix face that moves its mouth with the sound
//! it hears, blinks, and looks around when nobody talks to it.
//!
//! The timer interrupt scans the matrix through [`os::System`]; the main
//! loop in [`application::Application`] picks the face and the eyes.
#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod blink;
pub mod clock;
pub mod config;
pub mod drivers;
pub mod error;
pub mod face;
#[cfg(target_arch = "avr")]
pub mod hal;
pub mod logger;
pub mod os;

pub use error::Error;
