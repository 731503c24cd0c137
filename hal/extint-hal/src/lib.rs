//! Extint Hardware Abstraction Layer
//!
//! This crate defines the register access trait that the external interrupt
//! driver is written against. Chip-specific crates implement it over their
//! memory-mapped I/O space; host tests implement it over plain memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  extint-core (channels, driver, ISRs)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  extint-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ extint-hal-   │       │ sim (host     │
//! │    avr        │       │   tests)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`register::RegisterAccess`] - 8-bit register reads and writes

#![no_std]
#![deny(unsafe_code)]

pub mod register;
#[cfg(feature = "sim")]
pub mod sim;

pub use register::{BitRef, RegAddr, RegisterAccess};
#[cfg(feature = "sim")]
pub use sim::SimRegisters;
