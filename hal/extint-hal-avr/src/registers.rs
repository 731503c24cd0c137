//! Memory-mapped register access
//!
//! On AVR every I/O register is also visible in the data address space, so
//! the addresses used by the binding tables are plain data-space pointers.

use extint_hal::{RegAddr, RegisterAccess};

/// Volatile access to the AVR data space
pub struct AvrRegisters {
    _private: (),
}

impl AvrRegisters {
    /// Create the register accessor
    ///
    /// # Safety
    ///
    /// Only valid when running on an AVR part whose I/O registers live at the
    /// addresses used by the binding table handed to the driver. On any other
    /// machine reads and writes go to arbitrary memory.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterAccess for AvrRegisters {
    fn read(&self, addr: RegAddr) -> u8 {
        // SAFETY: `new` requires the address space to be the part's I/O map
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    fn write(&self, addr: RegAddr, value: u8) {
        // SAFETY: as above
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }
}
