//! Channel pin access
//!
//! Whichever mechanism backs a channel, its pin is an ordinary GPIO input.
//! [`ChannelPin`] exposes that input through `embedded-hal` so callbacks can
//! read the level that triggered them.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use extint_hal::RegisterAccess;

use crate::binding::PinLocation;
use crate::channel::Channel;
use crate::driver::ExtDriver;

/// Configure a pin as an input, with or without pull-up
///
/// Callers hold a critical section; DDR and PORT are shared by the whole port.
pub(crate) fn prepare_input(regs: &dyn RegisterAccess, pin: &PinLocation, pull_up: bool) {
    regs.write_bit(pin.direction(), false);
    regs.write_bit(pin.output(), pull_up);
}

/// Input pin of one channel
pub struct ChannelPin<'a> {
    regs: &'a dyn RegisterAccess,
    pin: PinLocation,
}

impl<'a> ChannelPin<'a> {
    /// Create a pin reader
    pub const fn new(regs: &'a dyn RegisterAccess, pin: PinLocation) -> Self {
        Self { regs, pin }
    }

    /// Physical location of the pin
    pub const fn location(&self) -> PinLocation {
        self.pin
    }
}

impl ErrorType for ChannelPin<'_> {
    type Error = Infallible;
}

impl InputPin for ChannelPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.regs.read_bit(self.pin.input()))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.regs.read_bit(self.pin.input()))
    }
}

impl<'a> ExtDriver<'a> {
    /// Input pin wired to a channel
    pub fn pin(&self, channel: Channel) -> Option<ChannelPin<'a>> {
        let location = self.table().pin_for(channel)?;
        Some(ChannelPin::new(self.regs(), location))
    }
}
