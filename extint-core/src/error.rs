//! Error types
//!
//! Runtime errors are rare: every resource is bound statically, so the only
//! things that can go wrong are asking for a channel that does not exist or
//! starting with a configuration of the wrong length. Binding table defects
//! are caught while the table is evaluated at build time.

/// Runtime driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtError {
    /// Channel index is not below the table's channel count
    OutOfRange {
        /// Requested channel index
        channel: u8,
        /// Number of channels in the binding table
        count: u8,
    },
    /// Configuration length does not match the binding table
    ChannelCountMismatch {
        /// Channels in the binding table
        expected: usize,
        /// Channels in the configuration
        found: usize,
    },
}

/// Binding table validation error
///
/// Produced by [`crate::BindingTable::new`]. Target tables are built in
/// const context, so any of these aborts the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindingError {
    /// More channels than `MAX_CHANNELS`
    TooManyChannels,
    /// More groups than `MAX_GROUPS`
    TooManyGroups,
    /// Grouped channel refers to a group the table does not describe
    GroupOutOfRange { channel: u8 },
    /// Grouped channel bit is outside the group's sampled pins
    BitNotCovered { channel: u8 },
    /// Two channels are bound to the same group bit
    DuplicateGroupBit { channel: u8 },
    /// Two groups share one mask register
    SharedGroupMask { group: u8 },
    /// Group gate or sample pin uses a bit above 7, or lists more than 8 pins
    InvalidGroup { group: u8 },
    /// Bit index above 7 in a gate, mask or pin reference
    BitOutOfRange { channel: u8 },
    /// Dedicated line number is not below `MAX_LINES`
    LineOutOfRange { channel: u8 },
    /// Two channels are bound to the same dedicated line
    DuplicateLine { channel: u8 },
    /// Two dedicated lines share one enable bit
    DuplicateEnableBit { channel: u8 },
    /// Edge-select field is misaligned or extends past bit 7
    FieldOutOfRange { channel: u8 },
    /// Two dedicated lines share an edge-select field
    OverlappingField { channel: u8 },
}
