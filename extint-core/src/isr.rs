//! Interrupt dispatch
//!
//! Every physical vector gets one short handler that forwards to the driver:
//!
//! ```ignore
//! static EXT: ExtDriver<'static> = ExtDriver::new(&atmega1280::MIXED, &AVR_REGISTERS);
//!
//! #[avr_device::interrupt(atmega1280)]
//! fn INT4() {
//!     EXT.on_interrupt(Vector::Line(4));
//! }
//!
//! #[avr_device::interrupt(atmega1280)]
//! fn PCINT2() {
//!     EXT.on_interrupt(Vector::Group(2));
//! }
//! ```
//!
//! The hardware masks a vector while its own handler runs, which makes the
//! sample-diff-store sequence of a group atomic with respect to itself.
//! Other vectors may preempt; callbacks must be written for that.

use crate::channel::Channel;
use crate::driver::ExtDriver;

/// Physical interrupt vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Vector {
    /// Dedicated-edge line (INTn)
    Line(u8),
    /// Grouped pin-change vector (PCINTn)
    Group(u8),
}

impl<'a> ExtDriver<'a> {
    /// Serve one interrupt
    pub fn on_interrupt(&self, vector: Vector) {
        match vector {
            Vector::Line(line) => self.on_line_interrupt(line),
            Vector::Group(group) => self.on_group_interrupt(group),
        }
    }

    /// Serve a dedicated line: the hardware already matched the edge, so the
    /// bound channel's callback runs directly
    pub fn on_line_interrupt(&self, line: u8) {
        if let Some(channel) = self.table().channel_for_line(line) {
            self.invoke(channel);
        }
    }

    /// Serve a grouped vector
    ///
    /// Samples the group, runs the callback of every enabled channel whose
    /// level changed (lowest bit first), and stores the sample for the next
    /// interrupt whether or not anything was reported.
    pub fn on_group_interrupt(&self, group: u8) {
        let (Some(desc), Some(state)) = (self.table().group(group), self.group_state(group)) else {
            return;
        };
        let table = self.table();
        self.grouped().on_group_interrupt(desc, state, |bit| {
            if let Some(channel) = table.channel_at(group, bit) {
                self.invoke(channel);
            }
        });
    }

    fn invoke(&self, channel: Channel) {
        if let Some(callback) = self.channel_config(channel).and_then(|config| config.callback) {
            callback(self, channel);
        }
    }
}
