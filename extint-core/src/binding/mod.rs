//! Static hardware bindings
//!
//! Describes, per target, which physical mechanism backs each logical channel
//! and which registers and bits it touches. These values are hardware
//! topology, not state: they are built once and never mutated.

pub mod table;

pub use table::BindingTable;

use extint_hal::{BitRef, RegAddr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Input, direction and output registers of one GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortRegisters {
    /// Pin level input register (PINx)
    pub input: RegAddr,
    /// Data direction register (DDRx), 1 = output
    pub direction: RegAddr,
    /// Output / pull-up register (PORTx)
    pub output: RegAddr,
}

impl PortRegisters {
    /// Create a port register set
    pub const fn new(input: RegAddr, direction: RegAddr, output: RegAddr) -> Self {
        Self {
            input,
            direction,
            output,
        }
    }

    /// Location of one pin on this port
    pub const fn pin(self, bit: u8) -> PinLocation {
        PinLocation { port: self, bit }
    }
}

/// Physical location of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinLocation {
    /// Port holding the pin
    pub port: PortRegisters,
    /// Bit position within the port
    pub bit: u8,
}

impl PinLocation {
    /// Input register bit
    pub const fn input(&self) -> BitRef {
        BitRef::new(self.port.input, self.bit)
    }

    /// Data direction register bit
    pub const fn direction(&self) -> BitRef {
        BitRef::new(self.port.direction, self.bit)
    }

    /// Output / pull-up register bit
    pub const fn output(&self) -> BitRef {
        BitRef::new(self.port.output, self.bit)
    }
}

/// A single-pin interrupt line with hardware edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DedicatedLine {
    /// Line (vector) number, e.g. 2 for INT2
    pub line: u8,
    /// Control register holding the 2-bit edge-select field
    pub control: RegAddr,
    /// Position of the field's low bit (even, 0-6)
    pub shift: u8,
    /// Enable bit in the shared line mask register
    pub enable: BitRef,
    /// Pin wired to the line
    pub pin: PinLocation,
}

/// One bit of a grouped pin-change vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupedBit {
    /// Group (vector) index
    pub group: u8,
    /// Bit within the group's sample and mask register
    pub bit: u8,
}

/// Physical resource backing a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhysicalBinding {
    /// Dedicated line with hardware edge selection
    DedicatedEdge(DedicatedLine),
    /// Bit of a level-sampled group
    GroupedSample(GroupedBit),
}

impl PhysicalBinding {
    /// Mechanism kind of this binding
    pub const fn mechanism(&self) -> Mechanism {
        match self {
            PhysicalBinding::DedicatedEdge(_) => Mechanism::DedicatedEdge,
            PhysicalBinding::GroupedSample(_) => Mechanism::GroupedSample,
        }
    }
}

/// Interrupt mechanism kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mechanism {
    /// Per-pin line, hardware edge detection
    DedicatedEdge,
    /// Shared pin-change vector, software edge detection
    GroupedSample,
}

/// Where a group's 8-bit sample comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupSample {
    /// Bit `b` of the sample is pin `b` of one port
    Port(PortRegisters),
    /// Bit `b` of the sample is the `b`-th listed pin; pins may live on
    /// different ports
    Pins(&'static [PinLocation]),
}

impl GroupSample {
    /// Number of sample bits backed by a pin
    pub const fn width(&self) -> usize {
        match self {
            GroupSample::Port(_) => 8,
            GroupSample::Pins(pins) => pins.len(),
        }
    }

    /// Pin behind one sample bit
    pub const fn pin(&self, bit: u8) -> Option<PinLocation> {
        match self {
            GroupSample::Port(port) => {
                if bit < 8 {
                    Some(port.pin(bit))
                } else {
                    None
                }
            }
            GroupSample::Pins(pins) => {
                if (bit as usize) < pins.len() {
                    Some(pins[bit as usize])
                } else {
                    None
                }
            }
        }
    }
}

/// Registers of one grouped pin-change vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupDescriptor {
    /// Per-pin enable mask register (PCMSKn)
    pub mask: RegAddr,
    /// Group enable bit in the top-level control register (PCIEn in PCICR)
    pub gate: BitRef,
    /// Sample source
    pub sample: GroupSample,
}

/// Gate applied when enabling a grouped channel
///
/// Grouped channels have no edge-select bits, so whether `mode` matters for
/// them is a per-target choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupEnablePolicy {
    /// Enable whenever a callback is installed
    CallbackOnly,
    /// Enable only with a callback and a mode other than `Disabled`
    #[default]
    CallbackAndMode,
}
