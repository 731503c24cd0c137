//! ATmega328P bindings
//!
//! - INT0 on PD2, INT1 on PD3, edge select in EICRA
//! - PCINT0..7 on PB0..PB7 (group 0)
//! - PCINT8..14 on PC0..PC6 (group 1, seven pins; PCINT15 does not exist)
//! - PCINT16..23 on PD0..PD7 (group 2)
//!
//! Channels are numbered densely, so PCINT16..23 are channels 15..22 of
//! [`PCINT`].

use extint_core::{
    BindingTable, DedicatedLine, GroupDescriptor, GroupEnablePolicy, GroupSample, GroupedBit,
    PhysicalBinding, PinLocation, PortRegisters,
};
use extint_hal::{BitRef, RegAddr};

pub const PORT_B: PortRegisters = PortRegisters::new(0x23, 0x24, 0x25);
pub const PORT_C: PortRegisters = PortRegisters::new(0x26, 0x27, 0x28);
pub const PORT_D: PortRegisters = PortRegisters::new(0x29, 0x2A, 0x2B);

pub const EIMSK: RegAddr = 0x3D;
pub const PCICR: RegAddr = 0x68;
pub const EICRA: RegAddr = 0x69;
pub const PCMSK0: RegAddr = 0x6B;
pub const PCMSK1: RegAddr = 0x6C;
pub const PCMSK2: RegAddr = 0x6D;

/// Number of dedicated lines
pub const INT_LINES: usize = 2;

/// Number of pin-change channels
pub const PCINT_CHANNELS: usize = 23;

static PCINT1_PINS: [PinLocation; 7] = [
    PORT_C.pin(0),
    PORT_C.pin(1),
    PORT_C.pin(2),
    PORT_C.pin(3),
    PORT_C.pin(4),
    PORT_C.pin(5),
    PORT_C.pin(6),
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
        sample: GroupSample::Port(PORT_D),
    },
];

const fn int(line: u8) -> PhysicalBinding {
    PhysicalBinding::DedicatedEdge(DedicatedLine {
        line,
        control: EICRA,
        shift: line * 2,
        enable: BitRef::new(EIMSK, line),
        pin: PORT_D.pin(line + 2),
    })
}

/// Dense PCINT index (0..23, skipping PCINT15) to group bit
const fn pcint(index: usize) -> PhysicalBinding {
    let (group, bit) = if index < 8 {
        (0, index)
    } else if index < 15 {
        (1, index - 8)
    } else {
        (2, index - 15)
    };
    PhysicalBinding::GroupedSample(GroupedBit {
        group,
        bit: bit as u8,
    })
}

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
    match BindingTable::new(bindings, groups, GroupEnablePolicy::CallbackOnly) {
        Ok(table) => table,
        Err(_) => panic!("invalid ATmega328P binding table"),
    }
}

/// Every existing PCINT, densely numbered
pub static PCINT: BindingTable = build(&PCINT_BINDINGS, &GROUPS);

/// Channel `n` is INTn
pub static INT: BindingTable = build(&INT_BINDINGS, &[]);

/// Channels 0-1 are INT0 and INT1, then [`PCINT`] from channel 2
pub static MIXED: BindingTable = build(&MIXED_BINDINGS, &GROUPS);
