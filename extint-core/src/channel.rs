//! Channel model and per-channel configuration
//!
//! A channel is a logical index; everything physical about it lives in the
//! binding table. What the application controls is the [`ChannelConfig`]:
//! which transition to report, which callback to run, and whether the
//! channel comes up enabled when the driver starts.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::driver::ExtDriver;

/// Logical channel index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Create a channel from its index
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Channel index
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl From<u8> for Channel {
    fn from(index: u8) -> Self {
        Self(index)
    }
}

impl From<Channel> for usize {
    fn from(channel: Channel) -> Self {
        channel.0 as usize
    }
}

/// Pin transition that triggers a channel
///
/// Grouped-sample channels cannot tell edges apart; for them any mode other
/// than `Disabled` means "report every level change".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerMode {
    /// No transition selected
    #[default]
    Disabled,
    /// Low-to-high transition
    RisingEdge,
    /// High-to-low transition
    FallingEdge,
    /// Any transition
    BothEdges,
}

impl TriggerMode {
    /// Check if a transition is selected at all
    pub const fn is_active(self) -> bool {
        !matches!(self, TriggerMode::Disabled)
    }
}

/// Channel callback
///
/// Runs in interrupt context with the driver and the channel that fired, so
/// one function can serve several channels. Implementations must not block
/// and must treat any state shared with other vectors as concurrently
/// accessed.
pub type ExtCallback = for<'d> fn(&ExtDriver<'d>, Channel);

/// Configuration of one channel
#[derive(Clone, Copy)]
pub struct ChannelConfig {
    /// Transition to report
    pub mode: TriggerMode,
    /// Callback invoked on each reported transition
    pub callback: Option<ExtCallback>,
    /// Enable the channel automatically on driver start
    pub autostart: bool,
    /// Enable the pin's internal pull-up when the channel is enabled
    pub pull_up: bool,
}

impl ChannelConfig {
    /// A channel with no callback; it can never be enabled
    pub const DISABLED: Self = Self {
        mode: TriggerMode::Disabled,
        callback: None,
        autostart: false,
        pull_up: false,
    };

    /// Create a channel config with a callback
    pub const fn new(mode: TriggerMode, callback: ExtCallback) -> Self {
        Self {
            mode,
            callback: Some(callback),
            autostart: false,
            pull_up: false,
        }
    }

    /// Enable the channel when the driver starts
    pub const fn autostart(mut self) -> Self {
        self.autostart = true;
        self
    }

    /// Enable the internal pull-up on the channel's pin
    pub const fn with_pull_up(mut self) -> Self {
        self.pull_up = true;
        self
    }

    /// Check if a callback is installed
    pub const fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("mode", &self.mode)
            .field("callback", &self.callback.is_some())
            .field("autostart", &self.autostart)
            .field("pull_up", &self.pull_up)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ChannelConfig {{ mode: {}, callback: {}, autostart: {}, pull_up: {} }}",
            self.mode,
            self.callback.is_some(),
            self.autostart,
            self.pull_up
        )
    }
}

/// Driver configuration: one [`ChannelConfig`] per bound channel
///
/// Referenced, not copied, by the driver while it is active.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration<const N: usize> {
    /// Per-channel settings, indexed by channel
    pub channels: [ChannelConfig; N],
}

impl<const N: usize> Configuration<N> {
    /// Create a configuration
    pub const fn new(channels: [ChannelConfig; N]) -> Self {
        Self { channels }
    }

    /// All channel configs as a slice
    pub fn channels(&self) -> &[ChannelConfig] {
        &self.channels
    }

    /// Config for one channel
    pub fn get(&self, channel: Channel) -> Option<&ChannelConfig> {
        self.channels.get(usize::from(channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &ExtDriver<'_>, _: Channel) {}

    #[test]
    fn test_default_is_inert() {
        let config = ChannelConfig::default();
        assert_eq!(config.mode, TriggerMode::Disabled);
        assert!(!config.has_callback());
        assert!(!config.autostart);
        assert!(!config.pull_up);
    }

    #[test]
    fn test_builder_flags() {
        let config = ChannelConfig::new(TriggerMode::RisingEdge, noop)
            .autostart()
            .with_pull_up();
        assert!(config.has_callback());
        assert!(config.autostart);
        assert!(config.pull_up);
        assert!(config.mode.is_active());
    }

    #[test]
    fn test_configuration_lookup() {
        let config = Configuration::new([
            ChannelConfig::DISABLED,
            ChannelConfig::new(TriggerMode::BothEdges, noop),
        ]);
        assert_eq!(config.channels().len(), 2);
        assert!(config.get(Channel::new(1)).is_some_and(|c| c.has_callback()));
        assert!(config.get(Channel::new(2)).is_none());
    }
}
