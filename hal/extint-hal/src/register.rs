//! Register access abstractions
//!
//! The interrupt hardware this crate family targets is controlled through
//! 8-bit registers in a flat data address space. Several logical channels
//! usually share one register, so most writes are read-modify-write
//! operations that must leave neighbouring bits alone.

/// Address of an 8-bit register in the target's data space
pub type RegAddr = u16;

/// A single bit inside an 8-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitRef {
    /// Register holding the bit
    pub register: RegAddr,
    /// Bit position (0-7)
    pub bit: u8,
}

impl BitRef {
    /// Create a new bit reference
    pub const fn new(register: RegAddr, bit: u8) -> Self {
        Self { register, bit }
    }

    /// Single-bit mask for this bit within its register
    pub const fn mask(&self) -> u8 {
        1 << (self.bit & 0x07)
    }
}

/// Access to 8-bit hardware registers
///
/// Implementations perform the actual bus access. None of the provided
/// methods are atomic: callers that share a register with an interrupt
/// handler must wrap read-modify-write sequences in a critical section.
pub trait RegisterAccess: Sync {
    /// Read the current value of a register
    fn read(&self, addr: RegAddr) -> u8;

    /// Write a value to a register
    fn write(&self, addr: RegAddr, value: u8);

    /// Clear the `clear` bits, then set the `set` bits, in one write
    fn modify(&self, addr: RegAddr, clear: u8, set: u8) {
        let value = self.read(addr);
        self.write(addr, (value & !clear) | set);
    }

    /// Set the bits in `mask`
    fn set_bits(&self, addr: RegAddr, mask: u8) {
        self.modify(addr, 0, mask);
    }

    /// Clear the bits in `mask`
    fn clear_bits(&self, addr: RegAddr, mask: u8) {
        self.modify(addr, mask, 0);
    }

    /// Set or clear a single bit
    fn write_bit(&self, bit: BitRef, high: bool) {
        if high {
            self.set_bits(bit.register, bit.mask());
        } else {
            self.clear_bits(bit.register, bit.mask());
        }
    }

    /// Check whether a single bit is set
    fn read_bit(&self, bit: BitRef) -> bool {
        self.read(bit.register) & bit.mask() != 0
    }
}
