//! AVR-specific HAL for the extint external interrupt driver
//!
//! This crate provides the AVR implementation of the shared `extint-hal`
//! register trait, plus the static binding tables of the supported parts:
//!
//! - [`registers::AvrRegisters`] - volatile access to the data space
//! - [`atmega1280`] - ATmega1280/2560 (INT0..INT7, PCINT0..PCINT23)
//! - [`atmega328p`] - ATmega328P (INT0..INT1, PCINT0..PCINT23 minus PCINT15)
//!
//! Enable the `atmega1280` or `atmega328p` feature to re-export the matching
//! module as [`target`].

#![cfg_attr(not(test), no_std)]

pub mod atmega1280;
pub mod atmega328p;
pub mod registers;

pub use registers::AvrRegisters;

#[cfg(all(feature = "atmega1280", feature = "atmega328p"))]
compile_error!("select exactly one of the `atmega1280` and `atmega328p` features");

#[cfg(feature = "atmega1280")]
pub use atmega1280 as target;
#[cfg(feature = "atmega328p")]
pub use atmega328p as target;
