//! Resource binding table
//!
//! Maps every logical channel to its [`PhysicalBinding`] and precomputes the
//! reverse maps the interrupt handlers need (group bit to channel, line to
//! channel). The constructor is a `const fn` that checks the table for
//! coverage and disjointness, so a target table declared as a `const` or
//! `static` fails the build instead of misbehaving at run time:
//!
//! ```ignore
//! pub const PCINT: BindingTable =
//!     match BindingTable::new(&BINDINGS, &GROUPS, GroupEnablePolicy::CallbackAndMode) {
//!         Ok(table) => table,
//!         Err(_) => panic!("invalid binding table"),
//!     };
//! ```

use super::{GroupDescriptor, GroupEnablePolicy, PhysicalBinding, PinLocation};
use crate::channel::Channel;
use crate::error::{BindingError, ExtError};
use crate::{CHANNELS_PER_GROUP, MAX_CHANNELS, MAX_GROUPS, MAX_LINES};

/// Validated channel-to-hardware mapping for one target
#[derive(Debug, Clone, Copy)]
pub struct BindingTable {
    bindings: &'static [PhysicalBinding],
    groups: &'static [GroupDescriptor],
    policy: GroupEnablePolicy,
    /// Channel bound to each group bit
    group_channels: [[Option<Channel>; CHANNELS_PER_GROUP]; MAX_GROUPS],
    /// Channel bound to each dedicated line
    line_channels: [Option<Channel>; MAX_LINES],
}

impl BindingTable {
    /// Validate and build a binding table
    ///
    /// Channel `i` is bound to `bindings[i]`. Grouped bindings refer to
    /// entries of `groups` by index.
    pub const fn new(
        bindings: &'static [PhysicalBinding],
        groups: &'static [GroupDescriptor],
        policy: GroupEnablePolicy,
    ) -> Result<Self, BindingError> {
        if bindings.len() > MAX_CHANNELS {
            return Err(BindingError::TooManyChannels);
        }
        if groups.len() > MAX_GROUPS {
            return Err(BindingError::TooManyGroups);
        }

        let mut g = 0;
        while g < groups.len() {
            let group = g as u8;
            let desc = &groups[g];
            if desc.gate.bit > 7 || desc.sample.width() > CHANNELS_PER_GROUP {
                return Err(BindingError::InvalidGroup { group });
            }
            let mut b = 0;
            while b < desc.sample.width() {
                match desc.sample.pin(b as u8) {
                    Some(pin) if pin.bit <= 7 => {}
                    _ => return Err(BindingError::InvalidGroup { group }),
                }
                b += 1;
            }
            let mut other = 0;
            while other < g {
                if groups[other].mask == desc.mask {
                    return Err(BindingError::SharedGroupMask { group });
                }
                other += 1;
            }
            g += 1;
        }

        let mut group_channels = [[None; CHANNELS_PER_GROUP]; MAX_GROUPS];
        let mut line_channels = [None; MAX_LINES];

        let mut i = 0;
        while i < bindings.len() {
            let channel = i as u8;
            match bindings[i] {
                PhysicalBinding::GroupedSample(grouped) => {
                    let g = grouped.group as usize;
                    let b = grouped.bit as usize;
                    if g >= groups.len() {
                        return Err(BindingError::GroupOutOfRange { channel });
                    }
                    if b >= groups[g].sample.width() {
                        return Err(BindingError::BitNotCovered { channel });
                    }
                    if group_channels[g][b].is_some() {
                        return Err(BindingError::DuplicateGroupBit { channel });
                    }
                    group_channels[g][b] = Some(Channel::new(channel));
                }
                PhysicalBinding::DedicatedEdge(line) => {
                    let l = line.line as usize;
                    if l >= MAX_LINES {
                        return Err(BindingError::LineOutOfRange { channel });
                    }
                    if line.enable.bit > 7 || line.pin.bit > 7 {
                        return Err(BindingError::BitOutOfRange { channel });
                    }
                    if line.shift % 2 != 0 || line.shift > 6 {
                        return Err(BindingError::FieldOutOfRange { channel });
                    }
                    if line_channels[l].is_some() {
                        return Err(BindingError::DuplicateLine { channel });
                    }
                    let mut j = 0;
                    while j < i {
                        if let PhysicalBinding::DedicatedEdge(other) = bindings[j] {
                            if other.enable.register == line.enable.register
                                && other.enable.bit == line.enable.bit
                            {
                                return Err(BindingError::DuplicateEnableBit { channel });
                            }
                            if other.control == line.control && other.shift == line.shift {
                                return Err(BindingError::OverlappingField { channel });
                            }
                        }
                        j += 1;
                    }
                    line_channels[l] = Some(Channel::new(channel));
                }
            }
            i += 1;
        }

        Ok(Self {
            bindings,
            groups,
            policy,
            group_channels,
            line_channels,
        })
    }

    /// Number of bound channels
    pub const fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the table binds no channels
    pub const fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of grouped vectors
    pub const fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Grouped-channel enable gate for this target
    pub const fn policy(&self) -> GroupEnablePolicy {
        self.policy
    }

    /// Physical binding of a channel
    pub fn binding_for(&self, channel: Channel) -> Result<PhysicalBinding, ExtError> {
        self.bindings
            .get(usize::from(channel))
            .copied()
            .ok_or(ExtError::OutOfRange {
                channel: channel.index(),
                count: self.bindings.len() as u8,
            })
    }

    /// All bindings, indexed by channel
    pub fn bindings(&self) -> &'static [PhysicalBinding] {
        self.bindings
    }

    /// Descriptor of one group
    pub fn group(&self, group: u8) -> Option<&'static GroupDescriptor> {
        self.groups.get(group as usize)
    }

    /// All group descriptors
    pub fn groups(&self) -> &'static [GroupDescriptor] {
        self.groups
    }

    /// Channel bound to a group bit
    pub fn channel_at(&self, group: u8, bit: u8) -> Option<Channel> {
        self.group_channels
            .get(group as usize)?
            .get(bit as usize)
            .copied()
            .flatten()
    }

    /// Check if any channel is bound to a group
    pub fn group_has_channels(&self, group: u8) -> bool {
        self.group_channels
            .get(group as usize)
            .is_some_and(|bits| bits.iter().any(Option::is_some))
    }

    /// Channel bound to a dedicated line
    pub fn channel_for_line(&self, line: u8) -> Option<Channel> {
        self.line_channels.get(line as usize).copied().flatten()
    }

    /// Pin wired to a channel, whichever mechanism backs it
    pub fn pin_for(&self, channel: Channel) -> Option<PinLocation> {
        match self.binding_for(channel).ok()? {
            PhysicalBinding::DedicatedEdge(line) => Some(line.pin),
            PhysicalBinding::GroupedSample(grouped) => {
                self.group(grouped.group)?.sample.pin(grouped.bit)
            }
        }
    }

    /// Iterate over every bound channel
    pub fn channels(&self) -> impl Iterator<Item = Channel> {
        (0..self.bindings.len() as u8).map(Channel::new)
    }
}
