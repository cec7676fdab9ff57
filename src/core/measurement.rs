// Decoded multimeter reading

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reading: a scaled numeric value and its display unit.
///
/// `value` is `f64::INFINITY` when the meter reports an overload or open
/// circuit. `unit` is a base tag ("V", "A", "Ω", ...) optionally followed by
/// "AC" or "DC". Infinite values serialise to JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

impl Measurement {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Whether the meter showed its overload / open-circuit indication
    pub fn is_overload(&self) -> bool {
        self.value == f64::INFINITY
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Measurement::new(1234.0, "VDC").to_string(), "1234 VDC");
        assert_eq!(Measurement::new(0.05, "AAC").to_string(), "0.05 AAC");
        assert_eq!(Measurement::new(-1.5, "°C").to_string(), "-1.5 °C");
        assert_eq!(Measurement::new(f64::INFINITY, "Ω").to_string(), "inf Ω");
    }

    #[test]
    fn test_overload() {
        assert!(Measurement::new(f64::INFINITY, "Hz").is_overload());
        assert!(!Measurement::new(f64::NEG_INFINITY, "V").is_overload());
        assert!(!Measurement::new(9999.0, "V").is_overload());
    }

    #[test]
    fn test_json() {
        let m = Measurement::new(12.5, "VDC");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"value":12.5,"unit":"VDC"}"#);

        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let overload = serde_json::to_string(&Measurement::new(f64::INFINITY, "Ω")).unwrap();
        assert_eq!(overload, r#"{"value":null,"unit":"Ω"}"#);
    }
}
