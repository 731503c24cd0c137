//! ATmega1280 / ATmega2560 bindings
//!
//! - INT0..INT3 on PD0..PD3, edge select in EICRA
//! - INT4..INT7 on PE4..PE7, edge select in EICRB
//! - PCINT0..7 on PB0..PB7 (group 0)
//! - PCINT8 on PE0, PCINT9..15 on PJ0..PJ6 (group 1, two ports)
//! - PCINT16..23 on PK0..PK7 (group 2)

use extint_core::{
    BindingTable, DedicatedLine, GroupDescriptor, GroupEnablePolicy, GroupSample, GroupedBit,
    PhysicalBinding, PinLocation, PortRegisters,
};
use extint_hal::{BitRef, RegAddr};

pub const PORT_B: PortRegisters = PortRegisters::new(0x23, 0x24, 0x25);
pub const PORT_D: PortRegisters = PortRegisters::new(0x29, 0x2A, 0x2B);
pub const PORT_E: PortRegisters = PortRegisters::new(0x2C, 0x2D, 0x2E);
pub const PORT_J: PortRegisters = PortRegisters::new(0x103, 0x104, 0x105);
pub const PORT_K: PortRegisters = PortRegisters::new(0x106, 0x107, 0x108);

pub const EIMSK: RegAddr = 0x3D;
pub const PCICR: RegAddr = 0x68;
pub const EICRA: RegAddr = 0x69;
pub const EICRB: RegAddr = 0x6A;
pub const PCMSK0: RegAddr = 0x6B;
pub const PCMSK1: RegAddr = 0x6C;
pub const PCMSK2: RegAddr = 0x6D;

/// Number of dedicated lines
pub const INT_LINES: usize = 8;

/// Number of pin-change channels
pub const PCINT_CHANNELS: usize = 24;

static PCINT1_PINS: [PinLocation; 8] = [
    PORT_E.pin(0),
    PORT_J.pin(0),
    PORT_J.pin(1),
    PORT_J.pin(2),
    PORT_J.pin(3),
    PORT_J.pin(4),
    PORT_J.pin(5),
    PORT_J.pin(6),
];

static GROUPS: [GroupDescriptor; 3] = [
    GroupDescriptor {
        mask: PCMSK0,
        gate: BitRef::new(PCICR, 0),
        sample: GroupSample::Port(PORT_B),
    },
    GroupDescriptor {
        mask: PCMSK1,
        gate: BitRef::new(PCICR, 1),
        sample: GroupSample::Pins(&PCINT1_PINS),
    },
    GroupDescriptor {
        mask: PCMSK2,
        gate: BitRef::new(PCICR, 2),
        sample: GroupSample::Port(PORT_K),
    },
];

const fn int(line: u8) -> PhysicalBinding {
    let (control, pin) = if line < 4 {
        (EICRA, PORT_D.pin(line))
    } else {
        (EICRB, PORT_E.pin(line))
    };
    PhysicalBinding::DedicatedEdge(DedicatedLine {
        line,
        control,
        shift: (line % 4) * 2,
        enable: BitRef::new(EIMSK, line),
        pin,
    })
}

const fn pcint(number: usize) -> PhysicalBinding {
    PhysicalBinding::GroupedSample(GroupedBit {
        group: (number / 8) as u8,
        bit: (number % 8) as u8,
    })
}

/// INT lines first (if any), then every PCINT
const fn bindings<const N: usize>(int_lines: usize) -> [PhysicalBinding; N] {
    let mut out = [pcint(0); N];
    let mut i = 0;
    while i < N {
        out[i] = if i < int_lines {
            int(i as u8)
        } else {
            pcint(i - int_lines)
        };
        i += 1;
    }
    out
}

static PCINT_BINDINGS: [PhysicalBinding; PCINT_CHANNELS] = bindings(0);
static INT_BINDINGS: [PhysicalBinding; INT_LINES] = bindings(INT_LINES);
static MIXED_BINDINGS: [PhysicalBinding; INT_LINES + PCINT_CHANNELS] = bindings(INT_LINES);

const fn build(
    bindings: &'static [PhysicalBinding],
    groups: &'static [GroupDescriptor],
) -> BindingTable {
    match BindingTable::new(bindings, groups, GroupEnablePolicy::CallbackAndMode) {
        Ok(table) => table,
        Err(_) => panic!("invalid ATmega1280 binding table"),
    }
}

/// Channel `n` is PCINTn
pub static PCINT: BindingTable = build(&PCINT_BINDINGS, &GROUPS);

/// Channel `n` is INTn
pub static INT: BindingTable = build(&INT_BINDINGS, &[]);

/// Channels 0-7 are INT0..INT7, channel `8 + n` is PCINTn
pub static MIXED: BindingTable = build(&MIXED_BINDINGS, &GROUPS);
