//! Board-agnostic external interrupt channels
//!
//! This crate unifies two physically different interrupt mechanisms behind
//! one set of logically numbered channels:
//!
//! - Dedicated-edge lines, where the hardware detects rising/falling edges
//!   for a single pin
//! - Grouped pin-change vectors, where up to eight pins share one vector and
//!   edges are recovered in software by diffing successive samples
//!
//! Which mechanism backs which channel is described by a static
//! [`BindingTable`] supplied per target. The [`ExtDriver`] owns lifecycle
//! state and dispatches interrupts to the per-channel callbacks installed
//! through a [`Configuration`].
//!
//! Nothing here allocates or blocks; every operation is bounded-time and
//! safe to call from interrupt context.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod binding;
pub mod channel;
pub mod dedicated;
pub mod driver;
pub mod error;
pub mod grouped;
pub mod isr;
pub mod pin;

#[cfg(test)]
mod testing;

pub use binding::{
    BindingTable, DedicatedLine, GroupDescriptor, GroupEnablePolicy, GroupSample, GroupedBit,
    Mechanism, PhysicalBinding, PinLocation, PortRegisters,
};
pub use channel::{Channel, ChannelConfig, Configuration, ExtCallback, TriggerMode};
pub use driver::{DriverState, ExtDriver};
pub use error::{BindingError, ExtError};
pub use isr::Vector;
pub use pin::ChannelPin;

/// Maximum number of channels a binding table may describe
pub const MAX_CHANNELS: usize = 32;

/// Maximum number of grouped vectors a binding table may describe
pub const MAX_GROUPS: usize = 4;

/// Maximum number of dedicated-edge lines a binding table may describe
pub const MAX_LINES: usize = 8;

/// Channels (pins) multiplexed onto one grouped vector
pub const CHANNELS_PER_GROUP: usize = 8;
