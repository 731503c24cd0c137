//! Shared test fixtures
//!
//! Register addresses follow the ATmega1280 data space so the simulated
//! register file can be read like the real part.

use extint_hal::BitRef;

use crate::binding::{
    BindingTable, DedicatedLine, GroupDescriptor, GroupEnablePolicy, GroupSample, GroupedBit,
    PhysicalBinding, PinLocation, PortRegisters,
};

pub const PORT_B: PortRegisters = PortRegisters::new(0x23, 0x24, 0x25);
pub const PORT_D: PortRegisters = PortRegisters::new(0x29, 0x2A, 0x2B);
pub const PORT_E: PortRegisters = PortRegisters::new(0x2C, 0x2D, 0x2E);
pub const PORT_J: PortRegisters = PortRegisters::new(0x103, 0x104, 0x105);

pub const EIMSK: u16 = 0x3D;
pub const PCICR: u16 = 0x68;
pub const EICRA: u16 = 0x69;
pub const PCMSK0: u16 = 0x6B;
pub const PCMSK1: u16 = 0x6C;

static GROUP1_PINS: [PinLocation; 8] = [
    PORT_E.pin(0),
    PORT_J.pin(0),
    PORT_J.pin(1),
    PORT_J.pin(2),
    PORT_J.pin(3),
    PORT_J.pin(4),
    PORT_J.pin(5),
    PORT_J.pin(6),
];

pub static GROUPS: [GroupDescriptor; 2] = [
    GroupDescriptor {
        mask: PCMSK0,
        gate: BitRef::new(PCICR, 0),
        sample: GroupSample::Port(PORT_B),
    },
    GroupDescriptor {
        mask: PCMSK1,
        gate: BitRef::new(PCICR, 1),
        sample: GroupSample::Pins(&GROUP1_PINS),
    },
];

const fn grouped(group: u8, bit: u8) -> PhysicalBinding {
    PhysicalBinding::GroupedSample(GroupedBit { group, bit })
}

const fn int(line: u8) -> PhysicalBinding {
    PhysicalBinding::DedicatedEdge(DedicatedLine {
        line,
        control: EICRA,
        shift: line * 2,
        enable: BitRef::new(EIMSK, line),
        pin: PORT_D.pin(line),
    })
}

static GROUPED_BINDINGS: [PhysicalBinding; 16] = [
    grouped(0, 0),
    grouped(0, 1),
    grouped(0, 2),
    grouped(0, 3),
    grouped(0, 4),
    grouped(0, 5),
    grouped(0, 6),
    grouped(0, 7),
    grouped(1, 0),
    grouped(1, 1),
    grouped(1, 2),
    grouped(1, 3),
    grouped(1, 4),
    grouped(1, 5),
    grouped(1, 6),
    grouped(1, 7),
];

static MIXED_BINDINGS: [PhysicalBinding; 18] = [
    int(0),
    int(1),
    grouped(0, 0),
    grouped(0, 1),
    grouped(0, 2),
    grouped(0, 3),
    grouped(0, 4),
    grouped(0, 5),
    grouped(0, 6),
    grouped(0, 7),
    grouped(1, 0),
    grouped(1, 1),
    grouped(1, 2),
    grouped(1, 3),
    grouped(1, 4),
    grouped(1, 5),
    grouped(1, 6),
    grouped(1, 7),
];

static DEDICATED_BINDINGS: [PhysicalBinding; 4] = [int(0), int(1), int(2), int(3)];

const fn build(
    bindings: &'static [PhysicalBinding],
    groups: &'static [GroupDescriptor],
    policy: GroupEnablePolicy,
) -> BindingTable {
    match BindingTable::new(bindings, groups, policy) {
        Ok(table) => table,
        Err(_) => panic!("invalid test binding table"),
    }
}

/// Channel `g * 8 + b` is bit `b` of group `g`; mode gates enabling
pub static GROUPED: BindingTable =
    build(&GROUPED_BINDINGS, &GROUPS, GroupEnablePolicy::CallbackAndMode);

/// Same layout as [`GROUPED`], enabling gated on the callback only
pub static GROUPED_CALLBACK_ONLY: BindingTable =
    build(&GROUPED_BINDINGS, &GROUPS, GroupEnablePolicy::CallbackOnly);

/// INT0 and INT1 on channels 0-1, then both groups on channels 2-17
pub static MIXED: BindingTable = build(&MIXED_BINDINGS, &GROUPS, GroupEnablePolicy::CallbackAndMode);

/// INT0..INT3 sharing EICRA and EIMSK
pub static DEDICATED: BindingTable = build(&DEDICATED_BINDINGS, &[], GroupEnablePolicy::CallbackAndMode);
