//! Dedicated-edge strategy
//!
//! Each channel owns one interrupt line and the hardware performs edge
//! detection. Configuration is a 2-bit edge-select field in a control
//! register shared with other lines, plus one enable bit in a shared mask
//! register. Both are read-modify-write targets, so every write happens in a
//! critical section and only touches the channel's own bits.

use extint_hal::RegisterAccess;

use crate::binding::DedicatedLine;
use crate::channel::{ChannelConfig, TriggerMode};
use crate::pin::prepare_input;

/// Width mask of an edge-select field
pub const EDGE_FIELD_MASK: u8 = 0b11;

/// Hardware edge-select encoding of a trigger mode
///
/// This mirrors the physical encoding and is not ordered by edge semantics:
/// `0` is the low-level setting the hardware falls back to when no edge is
/// selected.
pub const fn edge_select(mode: TriggerMode) -> u8 {
    match mode {
        TriggerMode::Disabled => 0,
        TriggerMode::BothEdges => 1,
        TriggerMode::FallingEdge => 2,
        TriggerMode::RisingEdge => 3,
    }
}

/// Register operations for dedicated-edge lines
pub struct DedicatedEdge<'a> {
    regs: &'a dyn RegisterAccess,
}

impl<'a> DedicatedEdge<'a> {
    /// Create the strategy over a register bank
    pub const fn new(regs: &'a dyn RegisterAccess) -> Self {
        Self { regs }
    }

    /// Program a line's edge-select field
    pub fn configure(&self, line: &DedicatedLine, mode: TriggerMode) {
        let clear = EDGE_FIELD_MASK << line.shift;
        let set = edge_select(mode) << line.shift;
        critical_section::with(|_| self.regs.modify(line.control, clear, set));
    }

    /// Current contents of a line's edge-select field
    pub fn edge_field(&self, line: &DedicatedLine) -> u8 {
        (self.regs.read(line.control) >> line.shift) & EDGE_FIELD_MASK
    }

    /// Enable a line
    ///
    /// Does nothing and returns `false` when the channel has no callback.
    pub fn enable(&self, line: &DedicatedLine, config: &ChannelConfig) -> bool {
        if !config.has_callback() {
            return false;
        }
        critical_section::with(|_| {
            prepare_input(self.regs, &line.pin, config.pull_up);
            self.regs.write_bit(line.enable, true);
        });
        true
    }

    /// Disable a line
    pub fn disable(&self, line: &DedicatedLine) {
        critical_section::with(|_| self.regs.write_bit(line.enable, false));
    }

    /// Check if a line's enable bit is set
    pub fn is_enabled(&self, line: &DedicatedLine) -> bool {
        self.regs.read_bit(line.enable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::PhysicalBinding;
    use crate::channel::Channel;
    use crate::driver::ExtDriver;
    use crate::testing::{DEDICATED, EICRA, EIMSK, PORT_D};
    use extint_hal::SimRegisters;

    fn noop(_: &ExtDriver<'_>, _: Channel) {}

    fn line(index: u8) -> DedicatedLine {
        match DEDICATED.binding_for(Channel::new(index)).unwrap() {
            PhysicalBinding::DedicatedEdge(line) => line,
            other => panic!("unexpected binding {other:?}"),
        }
    }

    #[test]
    fn test_edge_select_table() {
        assert_eq!(edge_select(TriggerMode::Disabled), 0);
        assert_eq!(edge_select(TriggerMode::BothEdges), 1);
        assert_eq!(edge_select(TriggerMode::FallingEdge), 2);
        assert_eq!(edge_select(TriggerMode::RisingEdge), 3);
    }

    #[test]
    fn test_configure_writes_field() {
        let regs = SimRegisters::new();
        let strategy = DedicatedEdge::new(&regs);

        strategy.configure(&line(2), TriggerMode::FallingEdge);
        assert_eq!(regs.peek(EICRA), 0b0010_0000);
        assert_eq!(strategy.edge_field(&line(2)), 2);
    }

    #[test]
    fn test_configure_replaces_previous_mode() {
        let regs = SimRegisters::new();
        let strategy = DedicatedEdge::new(&regs);

        strategy.configure(&line(1), TriggerMode::RisingEdge);
        strategy.configure(&line(1), TriggerMode::BothEdges);
        assert_eq!(strategy.edge_field(&line(1)), 1);

        strategy.configure(&line(1), TriggerMode::Disabled);
        assert_eq!(regs.peek(EICRA), 0);
    }

    #[test]
    fn test_configure_preserves_neighbours() {
        let regs = SimRegisters::new();
        let strategy = DedicatedEdge::new(&regs);
        regs.poke(EICRA, 0b1111_1111);

        strategy.configure(&line(1), TriggerMode::FallingEdge);
        assert_eq!(regs.peek(EICRA), 0b1111_1011);

        strategy.configure(&line(3), TriggerMode::Disabled);
        assert_eq!(regs.peek(EICRA), 0b0011_1011);
    }

    #[test]
    fn test_enable_requires_callback() {
        let regs = SimRegisters::new();
        let strategy = DedicatedEdge::new(&regs);

        assert!(!strategy.enable(&line(0), &ChannelConfig::DISABLED));
        assert!(!strategy.is_enabled(&line(0)));
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn test_enable_sets_one_bit() {
        let regs = SimRegisters::new();
        let strategy = DedicatedEdge::new(&regs);
        regs.poke(EIMSK, 0b1000_0001);

        let config = ChannelConfig::new(TriggerMode::RisingEdge, noop);
        assert!(strategy.enable(&line(2), &config));
        assert_eq!(regs.peek(EIMSK), 0b1000_0101);

        strategy.disable(&line(2));
        assert_eq!(regs.peek(EIMSK), 0b1000_0001);
    }

    #[test]
    fn test_enable_prepares_pin() {
        let regs = SimRegisters::new();
        let strategy = DedicatedEdge::new(&regs);
        regs.poke(PORT_D.direction, 0xFF);

        let config = ChannelConfig::new(TriggerMode::RisingEdge, noop).with_pull_up();
        strategy.enable(&line(3), &config);
        assert_eq!(regs.peek(PORT_D.direction), 0b1111_0111);
        assert_eq!(regs.peek(PORT_D.output), 0b0000_1000);
    }
}
