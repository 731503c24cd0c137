//! External interrupt driver
//!
//! Owns lifecycle state and the active configuration, and routes channel
//! operations to the strategy that backs each channel.
//!
//! ```text
//!            start(config)
//!   Stopped ───────────────▶ Active
//!      ▲                        │
//!      └────────── stop() ──────┘
//! ```
//!
//! `start` on an active driver and `stop` on a stopped one do nothing.
//! Every method takes `&self`, so a driver can live in a `static` and be
//! shared between the main path and the interrupt handlers.

use core::cell::Cell;

use critical_section::Mutex;
use extint_hal::RegisterAccess;
use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::binding::{BindingTable, PhysicalBinding};
use crate::channel::{Channel, ChannelConfig, Configuration};
use crate::dedicated::DedicatedEdge;
use crate::error::ExtError;
use crate::grouped::{GroupState, GroupedSample};
use crate::{MAX_CHANNELS, MAX_GROUPS};

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DriverState {
    /// No interrupt source enabled
    Stopped,
    /// Configuration installed, group gates open
    Active,
}

/// External interrupt driver for one interrupt controller
pub struct ExtDriver<'a> {
    table: &'a BindingTable,
    regs: &'a dyn RegisterAccess,
    state: Mutex<Cell<DriverState>>,
    config: Mutex<Cell<Option<&'a [ChannelConfig]>>>,
    /// Channels enabled while stopped, one bit per channel
    deferred: Mutex<Cell<u32>>,
    groups: [GroupState; MAX_GROUPS],
}

impl<'a> ExtDriver<'a> {
    /// Create a stopped driver over a binding table and register bank
    pub const fn new(table: &'a BindingTable, regs: &'a dyn RegisterAccess) -> Self {
        Self {
            table,
            regs,
            state: Mutex::new(Cell::new(DriverState::Stopped)),
            config: Mutex::new(Cell::new(None)),
            deferred: Mutex::new(Cell::new(0)),
            groups: [GroupState::INIT; MAX_GROUPS],
        }
    }

    /// Return the driver to its freshly created state
    ///
    /// Does not touch hardware; call [`stop`](Self::stop) first on a running
    /// driver.
    pub fn init(&self) {
        critical_section::with(|cs| {
            self.state.borrow(cs).set(DriverState::Stopped);
            self.config.borrow(cs).set(None);
            self.deferred.borrow(cs).set(0);
        });
        for group in &self.groups {
            group.reset();
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Check if the driver is active
    pub fn is_active(&self) -> bool {
        self.state() == DriverState::Active
    }

    /// Binding table this driver was built for
    pub fn table(&self) -> &'a BindingTable {
        self.table
    }

    pub(crate) fn regs(&self) -> &'a dyn RegisterAccess {
        self.regs
    }

    pub(crate) fn group_state(&self, group: u8) -> Option<&GroupState> {
        if (group as usize) < self.table.group_count() {
            self.groups.get(group as usize)
        } else {
            None
        }
    }

    fn dedicated(&self) -> DedicatedEdge<'a> {
        DedicatedEdge::new(self.regs)
    }

    pub(crate) fn grouped(&self) -> GroupedSample<'a> {
        GroupedSample::new(self.regs, self.table.policy())
    }

    /// Installed configuration of a channel
    ///
    /// `None` before the first `start` or for unbound channels.
    pub fn channel_config(&self, channel: Channel) -> Option<ChannelConfig> {
        let config = critical_section::with(|cs| self.config.borrow(cs).get())?;
        config.get(usize::from(channel)).copied()
    }

    /// Start the driver with a configuration
    ///
    /// Programs the edge-select field of every dedicated channel, enables the
    /// autostart channels and any channel enabled while stopped, then opens
    /// the gate of every group that has bound channels. Channels enabled while
    /// stopped are checked against `config`, not the configuration that was
    /// installed when they were requested.
    ///
    /// Does nothing on an active driver, whatever `config` holds.
    pub fn start<const N: usize>(&self, config: &'a Configuration<N>) -> Result<(), ExtError> {
        let started = critical_section::with(|cs| {
            let state = self.state.borrow(cs);
            if state.get() == DriverState::Active {
                return Ok(false);
            }
            if N != self.table.len() {
                return Err(ExtError::ChannelCountMismatch {
                    expected: self.table.len(),
                    found: N,
                });
            }
            self.config.borrow(cs).set(Some(config.channels()));
            state.set(DriverState::Active);
            Ok(true)
        })?;
        if !started {
            return Ok(());
        }

        let dedicated = self.dedicated();
        for (binding, channel_config) in self.table.bindings().iter().zip(config.channels()) {
            if let PhysicalBinding::DedicatedEdge(line) = binding {
                dedicated.configure(line, channel_config.mode);
            }
        }

        let deferred = critical_section::with(|cs| self.deferred.borrow(cs).replace(0));
        for channel in self.table.channels() {
            let requested = deferred & (1 << channel.index()) != 0;
            if requested || config.channels[usize::from(channel)].autostart {
                self.enable_channel(channel);
            }
        }

        critical_section::with(|_| {
            for (group, desc) in self.table.groups().iter().enumerate() {
                if self.table.group_has_channels(group as u8) {
                    self.regs.write_bit(desc.gate, true);
                }
            }
        });

        debug!("ext: started with {} channels", N);
        Ok(())
    }

    /// Stop the driver
    ///
    /// Closes every group gate, clears every group mask and dedicated enable
    /// bit, and forgets every group's previous sample.
    pub fn stop(&self) {
        critical_section::with(|cs| {
            let state = self.state.borrow(cs);
            if state.get() != DriverState::Active {
                return;
            }

            // Gates first so no group handler sees a half-cleared mask
            for desc in self.table.groups() {
                self.regs.write_bit(desc.gate, false);
            }
            for desc in self.table.groups() {
                self.regs.write(desc.mask, 0);
            }
            for binding in self.table.bindings() {
                if let PhysicalBinding::DedicatedEdge(line) = binding {
                    self.regs.write_bit(line.enable, false);
                }
            }
            for group in &self.groups {
                group.clear(cs);
            }
            state.set(DriverState::Stopped);

            debug!("ext: stopped");
        });
    }

    /// Enable a channel
    ///
    /// A channel without a callback (or, under
    /// [`GroupEnablePolicy::CallbackAndMode`](crate::GroupEnablePolicy), a
    /// grouped channel with mode `Disabled`) stays disabled. Before the first
    /// `start` there is no configuration, so nothing is enabled. While the
    /// driver is stopped no register is touched: the channel is remembered
    /// and enabled by the next `start` if its new configuration allows it.
    ///
    /// Passing a channel the binding table does not describe is a programming
    /// error; it panics in debug builds and is ignored otherwise.
    pub fn enable_channel(&self, channel: Channel) {
        let Some(binding) = self.checked_binding(channel) else {
            return;
        };
        let Some(config) = self.channel_config(channel) else {
            return;
        };

        let enabled = match binding {
            _ if !self.is_active() => {
                critical_section::with(|cs| {
                    let deferred = self.deferred.borrow(cs);
                    deferred.set(deferred.get() | (1 << channel.index()));
                });
                false
            }
            PhysicalBinding::DedicatedEdge(line) => self.dedicated().enable(&line, &config),
            PhysicalBinding::GroupedSample(grouped) => {
                match (
                    self.table.group(grouped.group),
                    self.table.pin_for(channel),
                ) {
                    (Some(desc), Some(pin)) => {
                        self.grouped().enable(desc, grouped.bit, &pin, &config)
                    }
                    _ => false,
                }
            }
        };

        if enabled {
            trace!("ext: channel {} enabled", channel);
        }
    }

    /// Disable a channel
    pub fn disable_channel(&self, channel: Channel) {
        let Some(binding) = self.checked_binding(channel) else {
            return;
        };

        critical_section::with(|cs| {
            let deferred = self.deferred.borrow(cs);
            deferred.set(deferred.get() & !(1 << channel.index()));
        });
        match binding {
            PhysicalBinding::DedicatedEdge(line) => self.dedicated().disable(&line),
            PhysicalBinding::GroupedSample(grouped) => {
                if let Some(desc) = self.table.group(grouped.group) {
                    self.grouped().disable(desc, grouped.bit);
                }
            }
        }
        trace!("ext: channel {} disabled", channel);
    }

    /// Check if a channel's enable bit is set
    ///
    /// Unbound channels, and channels waiting for `start`, report
    /// `false`.
    pub fn is_enabled(&self, channel: Channel) -> bool {
        match self.table.binding_for(channel) {
            Ok(PhysicalBinding::DedicatedEdge(line)) => self.dedicated().is_enabled(&line),
            Ok(PhysicalBinding::GroupedSample(grouped)) => self
                .table
                .group(grouped.group)
                .is_some_and(|desc| self.grouped().is_enabled(desc, grouped.bit)),
            Err(_) => false,
        }
    }

    /// All channels whose enable bit is set, in channel order
    pub fn enabled_channels(&self) -> Vec<Channel, MAX_CHANNELS> {
        let mut enabled = Vec::new();
        for channel in self.table.channels().filter(|&c| self.is_enabled(c)) {
            // The table never holds more than MAX_CHANNELS channels
            let _ = enabled.push(channel);
        }
        enabled
    }

    /// Previous sample held for a group
    pub fn previous_sample(&self, group: u8) -> Option<u8> {
        self.group_state(group).map(GroupState::previous_sample)
    }

    fn checked_binding(&self, channel: Channel) -> Option<PhysicalBinding> {
        let binding = self.table.binding_for(channel);
        debug_assert!(binding.is_ok(), "channel {} is not bound", channel.index());
        match binding {
            Ok(binding) => Some(binding),
            Err(_) => {
                warn!("ext: channel {} is not bound", channel);
                None
            }
        }
    }
}
