//! In-memory register file
//!
//! Stands in for the memory-mapped I/O space when the driver runs on a host.
//! Pin levels are injected with [`SimRegisters::poke`], which does not count
//! as a driver write.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use crate::register::{RegAddr, RegisterAccess};

/// Size of the simulated data space (covers the extended I/O area of the
/// larger AVR parts)
pub const SIM_SPACE: usize = 0x200;

/// Simulated 8-bit register file
pub struct SimRegisters {
    cells: Mutex<RefCell<[u8; SIM_SPACE]>>,
    writes: Mutex<Cell<u32>>,
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRegisters {
    /// Create a register file with every register reading zero
    pub const fn new() -> Self {
        Self {
            cells: Mutex::new(RefCell::new([0; SIM_SPACE])),
            writes: Mutex::new(Cell::new(0)),
        }
    }

    /// Read a register without going through the driver
    pub fn peek(&self, addr: RegAddr) -> u8 {
        critical_section::with(|cs| {
            self.cells
                .borrow_ref(cs)
                .get(addr as usize)
                .copied()
                .unwrap_or(0)
        })
    }

    /// Set a register (e.g. a pin input register) from the outside world
    pub fn poke(&self, addr: RegAddr, value: u8) {
        critical_section::with(|cs| {
            if let Some(cell) = self.cells.borrow_ref_mut(cs).get_mut(addr as usize) {
                *cell = value;
            }
        });
    }

    /// Copy of the whole register file
    pub fn snapshot(&self) -> [u8; SIM_SPACE] {
        critical_section::with(|cs| *self.cells.borrow_ref(cs))
    }

    /// Number of writes performed through [`RegisterAccess`]
    pub fn write_count(&self) -> u32 {
        critical_section::with(|cs| self.writes.borrow(cs).get())
    }
}

impl RegisterAccess for SimRegisters {
    fn read(&self, addr: RegAddr) -> u8 {
        self.peek(addr)
    }

    fn write(&self, addr: RegAddr, value: u8) {
        critical_section::with(|cs| {
            let writes = self.writes.borrow(cs);
            writes.set(writes.get().wrapping_add(1));
        });
        self.poke(addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let regs = SimRegisters::new();
        assert_eq!(regs.read(0x3D), 0);
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn test_poke_is_not_a_write() {
        let regs = SimRegisters::new();
        regs.poke(0x23, 0xA5);
        assert_eq!(regs.read(0x23), 0xA5);
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn test_writes_are_counted() {
        let regs = SimRegisters::new();
        regs.set_bits(0x6B, 0x01);
        regs.clear_bits(0x6B, 0x01);
        assert_eq!(regs.write_count(), 2);
        assert_eq!(regs.peek(0x6B), 0);
    }

    #[test]
    fn test_out_of_space_is_ignored() {
        let regs = SimRegisters::new();
        regs.write(0xFFFF, 0xFF);
        assert_eq!(regs.read(0xFFFF), 0);
    }
}
