// Frame decoder: raw 8-byte frame -> Measurement
//
// Every check below is an ordered first-match rule. Several flags overlap
// (the diode mode also sets the volt flag, a frame may carry more than one
// divisor bit), so the order of each table is part of the format.

use super::bcd::packed_magnitude;
use super::frame::Frame;
use crate::core::measurement::Measurement;
use crate::core::units::{unit_label, BaseUnit, Coupling};
use tracing::debug;

/// A test against one byte of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitTest {
    /// At least one bit of `mask` is set
    Any { byte: usize, mask: u8 },
    /// Every bit of `mask` is set
    All { byte: usize, mask: u8 },
}

impl BitTest {
    pub fn matches(self, frame: &Frame) -> bool {
        match self {
            BitTest::Any { byte, mask } => frame.has(byte, mask),
            BitTest::All { byte, mask } => frame.has_all(byte, mask),
        }
    }
}

const fn any(byte: usize, mask: u8) -> BitTest {
    BitTest::Any { byte, mask }
}

/// Display bytes spelling "LO" mean overload / open circuit
const OVERLOAD_MARKER: [u8; 2] = [0x4C, 0x4F];

/// Decimal point position
pub const DIVISOR_RULES: [(BitTest, f64); 3] = [
    (any(0, 0x01), 1000.0),
    (any(0, 0x02), 100.0),
    (any(0, 0x04), 10.0),
];

pub const NEGATIVE: BitTest = any(0, 0x40);

/// Metric prefix: nano, mega, kilo, milli, micro
pub const PREFIX_RULES: [(BitTest, f64); 5] = [
    (any(4, 0x02), 1e-9),
    (any(5, 0x10), 1e6),
    (any(5, 0x20), 1e3),
    (any(5, 0x40), 1e-3),
    (any(5, 0x80), 1e-6),
];

// Diode must stay first, the meter sets the volt flag in diode mode too.
pub const BASE_UNIT_RULES: [(BitTest, BaseUnit); 9] = [
    (any(5, 0x04), BaseUnit::DiodeVoltage),
    (any(6, 0x80), BaseUnit::Volt),
    (any(6, 0x40), BaseUnit::Ampere),
    (BitTest::All { byte: 7, mask: 0x3D }, BaseUnit::Ohm),
    (any(6, 0x01), BaseUnit::Fahrenheit),
    (any(6, 0x02), BaseUnit::Celsius),
    (any(6, 0x04), BaseUnit::Farad),
    (any(6, 0x08), BaseUnit::Hertz),
    (any(6, 0x10), BaseUnit::Hfe),
];

pub const COUPLING_RULES: [(BitTest, Coupling); 2] = [
    (any(3, 0x08), Coupling::Ac),
    (any(3, 0x10), Coupling::Dc),
];

/// Evaluate `rules` in order and return the result of the first match
pub fn first_match<T: Copy>(rules: &[(BitTest, T)], frame: &Frame) -> Option<T> {
    rules
        .iter()
        .find(|(test, _)| test.matches(frame))
        .map(|&(_, result)| result)
}

/// Whether the display shows the overload / open-circuit marker
pub fn is_overload(frame: &Frame) -> bool {
    [frame.byte(1), frame.byte(2)] == OVERLOAD_MARKER
}

/// Decode the numeric reading of a frame.
///
/// Returns `f64::INFINITY` for the overload marker; otherwise the four BCD
/// display digits, divided for the decimal point, negated if the sign flag is
/// set, then scaled by the metric prefix.
pub fn decode_value(frame: &Frame) -> f64 {
    if is_overload(frame) {
        return f64::INFINITY;
    }

    let mut value = f64::from(packed_magnitude(frame.byte(1), frame.byte(2)));

    if let Some(divisor) = first_match(&DIVISOR_RULES, frame) {
        value /= divisor;
    }

    if NEGATIVE.matches(frame) {
        value = -value;
    }

    if let Some(multiplier) = first_match(&PREFIX_RULES, frame) {
        value *= multiplier;
    }

    value
}

/// Decode the quantity selected on the dial
pub fn decode_base_unit(frame: &Frame) -> BaseUnit {
    first_match(&BASE_UNIT_RULES, frame).unwrap_or(BaseUnit::Unknown)
}

/// Decode the AC/DC indicator, if any
pub fn decode_coupling(frame: &Frame) -> Option<Coupling> {
    first_match(&COUPLING_RULES, frame)
}

/// Decode the display unit of a frame, e.g. "VDC", "Ω", "unknownAC"
pub fn decode_unit(frame: &Frame) -> String {
    unit_label(decode_base_unit(frame), decode_coupling(frame))
}

/// Decode a frame into a measurement. Never fails: every bit pattern maps
/// to some value and unit.
pub fn decode(frame: &Frame) -> Measurement {
    let measurement = Measurement::new(decode_value(frame), decode_unit(frame));
    debug!(frame = %frame, %measurement, "decoded frame");
    measurement
}
