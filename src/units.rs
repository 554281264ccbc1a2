//! Energy-unit conversion over a fixed table.
//!
//! Advisory helper for the reporting side of the toolchain: unknown unit
//! names yield `None` rather than an error.

/// Energy units the conversion table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnergyUnit {
    Btu,
    KBtu,
    MMBtu,
    Wh,
    KWh,
    MWh,
    MJ,
    GJ,
    Therm,
}

impl EnergyUnit {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "Btu" => Some(Self::Btu),
            "kBtu" => Some(Self::KBtu),
            "MMBtu" => Some(Self::MMBtu),
            "Wh" => Some(Self::Wh),
            "kWh" => Some(Self::KWh),
            "MWh" => Some(Self::MWh),
            "MJ" => Some(Self::MJ),
            "GJ" => Some(Self::GJ),
            "therm" => Some(Self::Therm),
            _ => None,
        }
    }

    /// Factor to kBtu, the table's base unit.
    fn to_kbtu(self) -> f64 {
        match self {
            Self::Btu => 0.001,
            Self::KBtu => 1.0,
            Self::MMBtu => 1000.0,
            Self::Wh => 0.003_412_142,
            Self::KWh => 3.412_142,
            Self::MWh => 3412.142,
            Self::MJ => 0.947_817,
            Self::GJ => 947.817,
            Self::Therm => 100.0,
        }
    }
}

/// Converts an energy value between two named units.
///
/// Returns `None` when either unit name is not in the table.
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    let from = EnergyUnit::parse(from)?;
    let to = EnergyUnit::parse(to)?;
    Some(value * from.to_kbtu() / to.to_kbtu())
}
