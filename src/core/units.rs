// Physical quantities reported by the meter's mode flags

use std::fmt;

/// The quantity selected on the meter's dial, before AC/DC suffixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUnit {
    /// Diode test (forward voltage)
    DiodeVoltage,
    Volt,
    Ampere,
    Ohm,
    Fahrenheit,
    Celsius,
    Farad,
    Hertz,
    /// Transistor current gain
    Hfe,
    /// No recognised mode flag was set
    Unknown,
}

impl BaseUnit {
    /// Display tag used in measurement units
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUnit::DiodeVoltage => "Vdiode",
            BaseUnit::Volt => "V",
            BaseUnit::Ampere => "A",
            BaseUnit::Ohm => "Ω",
            BaseUnit::Fahrenheit => "°F",
            BaseUnit::Celsius => "°C",
            BaseUnit::Farad => "F",
            BaseUnit::Hertz => "Hz",
            BaseUnit::Hfe => "hFE",
            BaseUnit::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AC/DC coupling indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coupling {
    Ac,
    Dc,
}

impl Coupling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coupling::Ac => "AC",
            Coupling::Dc => "DC",
        }
    }
}

impl fmt::Display for Coupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose the unit string shown for a measurement, e.g. "VDC" or "Hz"
pub fn unit_label(base: BaseUnit, coupling: Option<Coupling>) -> String {
    match coupling {
        Some(coupling) => format!("{}{}", base.as_str(), coupling.as_str()),
        None => base.as_str().to_string(),
    }
}
