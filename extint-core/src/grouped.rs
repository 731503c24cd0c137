//! Grouped-sample strategy
//!
//! Up to eight pins share one pin-change vector. The hardware only reports
//! that some enabled pin in the group changed level, so the handler samples
//! all pins and diffs against the previous sample:
//!
//! ```text
//! changed = (current ^ previous) & enable_mask
//! previous = current            // always, whatever the mask says
//! ```
//!
//! Each set bit of `changed` is one level change on an enabled pin. Rising
//! and falling edges cannot be told apart.

use core::cell::Cell;

use critical_section::Mutex;
use extint_hal::RegisterAccess;

use crate::binding::{GroupDescriptor, GroupEnablePolicy, GroupSample, PinLocation};
use crate::channel::ChannelConfig;
use crate::pin::prepare_input;
use crate::CHANNELS_PER_GROUP;

/// Bits that changed level on enabled pins
pub const fn changed_bits(previous: u8, current: u8, mask: u8) -> u8 {
    (previous ^ current) & mask
}

/// Per-group edge detection state
///
/// Written only by the group's interrupt handler, and reset when the driver
/// stops.
pub struct GroupState {
    previous_sample: Mutex<Cell<u8>>,
}

impl Default for GroupState {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupState {
    #[allow(clippy::declare_interior_mutable_const)]
    pub(crate) const INIT: Self = Self::new();

    /// Create a group state with a zero previous sample
    pub const fn new() -> Self {
        Self {
            previous_sample: Mutex::new(Cell::new(0)),
        }
    }

    /// Last sample taken by the group's handler
    pub fn previous_sample(&self) -> u8 {
        critical_section::with(|cs| self.previous_sample.borrow(cs).get())
    }

    /// Forget the last sample
    pub(crate) fn reset(&self) {
        critical_section::with(|cs| self.previous_sample.borrow(cs).set(0));
    }

    pub(crate) fn clear(&self, cs: critical_section::CriticalSection<'_>) {
        self.previous_sample.borrow(cs).set(0);
    }

    /// Store a new sample and return the enabled bits that changed
    pub(crate) fn advance(&self, current: u8, mask: u8) -> u8 {
        critical_section::with(|cs| {
            let previous = self.previous_sample.borrow(cs).replace(current);
            changed_bits(previous, current, mask)
        })
    }
}

/// Register operations for grouped pin-change vectors
pub struct GroupedSample<'a> {
    regs: &'a dyn RegisterAccess,
    policy: GroupEnablePolicy,
}

impl<'a> GroupedSample<'a> {
    /// Create the strategy over a register bank
    pub const fn new(regs: &'a dyn RegisterAccess, policy: GroupEnablePolicy) -> Self {
        Self { regs, policy }
    }

    /// Read the current level of every pin in a group
    pub fn sample_group(&self, desc: &GroupDescriptor) -> u8 {
        match desc.sample {
            GroupSample::Port(port) => self.regs.read(port.input),
            GroupSample::Pins(pins) => pins
                .iter()
                .take(CHANNELS_PER_GROUP)
                .enumerate()
                .filter(|(_, pin)| self.regs.read_bit(pin.input()))
                .fold(0, |value, (bit, _)| value | (1 << bit)),
        }
    }

    /// Handle one interrupt of a group
    ///
    /// Calls `on_change` with every changed enabled bit in increasing order
    /// and returns the changed bits.
    pub fn on_group_interrupt(
        &self,
        desc: &GroupDescriptor,
        state: &GroupState,
        mut on_change: impl FnMut(u8),
    ) -> u8 {
        let current = self.sample_group(desc);
        let mask = self.regs.read(desc.mask);
        let changed = state.advance(current, mask);

        for bit in 0..CHANNELS_PER_GROUP as u8 {
            if changed & (1 << bit) != 0 {
                on_change(bit);
            }
        }
        changed
    }

    /// Check whether a channel passes this target's enable gate
    pub fn may_enable(&self, config: &ChannelConfig) -> bool {
        match self.policy {
            GroupEnablePolicy::CallbackOnly => config.has_callback(),
            GroupEnablePolicy::CallbackAndMode => config.has_callback() && config.mode.is_active(),
        }
    }

    /// Enable one bit of a group
    ///
    /// Does nothing and returns `false` when the channel does not pass the
    /// enable gate.
    pub fn enable(
        &self,
        desc: &GroupDescriptor,
        bit: u8,
        pin: &PinLocation,
        config: &ChannelConfig,
    ) -> bool {
        if !self.may_enable(config) {
            return false;
        }
        critical_section::with(|_| {
            prepare_input(self.regs, pin, config.pull_up);
            self.regs.set_bits(desc.mask, 1 << bit);
        });
        true
    }

    /// Disable one bit of a group
    pub fn disable(&self, desc: &GroupDescriptor, bit: u8) {
        critical_section::with(|_| self.regs.clear_bits(desc.mask, 1 << bit));
    }

    /// Check if a group bit is enabled
    pub fn is_enabled(&self, desc: &GroupDescriptor, bit: u8) -> bool {
        self.regs.read(desc.mask) & (1 << bit) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, TriggerMode};
    use crate::driver::ExtDriver;
    use crate::testing::{GROUPED, PCMSK0, PCMSK1, PORT_B, PORT_E, PORT_J};
    use extint_hal::SimRegisters;
    use proptest::prelude::*;

    fn noop(_: &ExtDriver<'_>, _: Channel) {}

    fn collect(strategy: &GroupedSample<'_>, group: u8, state: &GroupState) -> Vec<u8> {
        let mut fired = Vec::new();
        let desc = GROUPED.group(group).unwrap();
        strategy.on_group_interrupt(desc, state, |bit| fired.push(bit));
        fired
    }

    #[test]
    fn test_single_rising_bit() {
        let regs = SimRegisters::new();
        let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
        let state = GroupState::new();
        regs.poke(PCMSK0, 0b0000_0001);
        regs.poke(PORT_B.input, 0b0000_0001);

        assert_eq!(collect(&strategy, 0, &state), vec![0]);
        assert_eq!(state.previous_sample(), 0b0000_0001);
    }

    #[test]
    fn test_masked_bit_is_not_reported() {
        let regs = SimRegisters::new();
        let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
        let state = GroupState::new();
        state.advance(0b0000_0011, 0);
        regs.poke(PCMSK0, 0b0000_0010);
        regs.poke(PORT_B.input, 0b0000_0000);

        assert_eq!(collect(&strategy, 0, &state), vec![1]);
        assert_eq!(state.previous_sample(), 0);
    }

    #[test]
    fn test_sample_updates_while_masked() {
        let regs = SimRegisters::new();
        let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
        let state = GroupState::new();

        // Pin 4 goes high while masked off
        regs.poke(PORT_B.input, 0b0001_0000);
        assert!(collect(&strategy, 0, &state).is_empty());

        // Enabling it later must not replay that transition
        regs.poke(PCMSK0, 0b0001_0000);
        assert!(collect(&strategy, 0, &state).is_empty());
    }

    #[test]
    fn test_sample_spans_ports() {
        let regs = SimRegisters::new();
        let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
        let desc = GROUPED.group(1).unwrap();

        // PE0 -> bit 0, PJ0..PJ6 -> bits 1..7; PJ7 and PE1 are not in the group
        regs.poke(PORT_E.input, 0b0000_0011);
        regs.poke(PORT_J.input, 0b1000_0101);
        assert_eq!(strategy.sample_group(desc), 0b0000_1011);
    }

    #[test]
    fn test_bits_reported_in_order() {
        let regs = SimRegisters::new();
        let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
        let state = GroupState::new();
        regs.poke(PCMSK0, 0xFF);
        regs.poke(PORT_B.input, 0b1010_0101);

        assert_eq!(collect(&strategy, 0, &state), vec![0, 2, 5, 7]);
    }

    #[test]
    fn test_enable_policy_gates() {
        let regs = SimRegisters::new();
        let desc = GROUPED.group(1).unwrap();
        let pin = desc.sample.pin(3).unwrap();
        let modeless = ChannelConfig {
            callback: Some(noop),
            ..ChannelConfig::DISABLED
        };

        let strict = GroupedSample::new(&regs, GroupEnablePolicy::CallbackAndMode);
        assert!(!strict.enable(desc, 3, &pin, &modeless));
        assert!(!strict.is_enabled(desc, 3));

        let lenient = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
        assert!(!lenient.enable(desc, 3, &pin, &ChannelConfig::DISABLED));
        assert!(lenient.enable(desc, 3, &pin, &modeless));
        assert_eq!(regs.peek(PCMSK1), 0b0000_1000);
    }

    #[test]
    fn test_enable_disable_leave_neighbours() {
        let regs = SimRegisters::new();
        let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackAndMode);
        let desc = GROUPED.group(0).unwrap();
        let config = ChannelConfig::new(TriggerMode::BothEdges, noop);
        regs.poke(PCMSK0, 0b1000_0001);

        strategy.enable(desc, 4, &PORT_B.pin(4), &config);
        assert_eq!(regs.peek(PCMSK0), 0b1001_0001);

        strategy.disable(desc, 0);
        assert_eq!(regs.peek(PCMSK0), 0b1001_0000);
    }

    proptest! {
        #[test]
        fn prop_diff_reports_exactly_changed_enabled_bits(
            previous in any::<u8>(),
            current in any::<u8>(),
            mask in any::<u8>(),
        ) {
            let regs = SimRegisters::new();
            let strategy = GroupedSample::new(&regs, GroupEnablePolicy::CallbackOnly);
            let state = GroupState::new();
            state.advance(previous, 0);
            regs.poke(PCMSK0, mask);
            regs.poke(PORT_B.input, current);

            let fired = collect(&strategy, 0, &state);
            let expected: Vec<u8> = (0..8)
                .filter(|bit| ((previous ^ current) & mask) & (1 << bit) != 0)
                .collect();

            prop_assert_eq!(fired, expected);
            prop_assert_eq!(state.previous_sample(), current);
        }
    }
}
