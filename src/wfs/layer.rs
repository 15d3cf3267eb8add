use std::fmt::{self, Display};

use clap::ValueEnum;
use url::Url;

/// Municipal vector layers the locator knows how to query.
///
/// Each maps to one Geodienste deployment; the deployments disagree on
/// protocol version and axis order, which is what [`super::Strategy`] papers
/// over.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum)]
pub enum Layer {
    /// ALKIS parcel boundaries.
    Cadastre,

    /// Day-time street traffic noise bands.
    Noise,

    /// Flood risk areas.
    FloodRisk,

    /// Rooftop solar potential.
    SolarPotential,

    /// School sites as maintained by the school authority.
    Schools,
}

impl Layer {
    pub fn endpoint(self) -> Url {
        let endpoint = match self {
            Self::Cadastre => "https://geodienste.hamburg.de/HH_WFS_ALKIS_Basis",
            Self::Noise => "https://geodienste.hamburg.de/HH_WFS_Strassenverkehrslaerm",
            Self::FloodRisk => "https://geodienste.hamburg.de/HH_WFS_Ueberschwemmungsgebiete",
            Self::SolarPotential => "https://geodienste.hamburg.de/HH_WFS_Solaratlas",
            Self::Schools => "https://geodienste.hamburg.de/HH_WFS_Schulen",
        };
        Url::parse(endpoint).expect("the endpoint constants must parse")
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Cadastre => "de.hh.up:flurstuecke",
            Self::Noise => "de.hh.up:strassenlaerm_tag",
            Self::FloodRisk => "de.hh.up:ueberschwemmungsgebiete",
            Self::SolarPotential => "de.hh.up:solarpotenzial_dachflaechen",
            Self::Schools => "de.hh.up:schulen",
        }
    }
}

impl Display for Layer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cadastre => "cadastre",
            Self::Noise => "noise",
            Self::FloodRisk => "flood-risk",
            Self::SolarPotential => "solar-potential",
            Self::Schools => "schools",
        };
        formatter.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_parse_ok() {
        for layer in [
            Layer::Cadastre,
            Layer::Noise,
            Layer::FloodRisk,
            Layer::SolarPotential,
            Layer::Schools,
        ] {
            assert_eq!(layer.endpoint().scheme(), "https");
            assert!(layer.type_name().starts_with("de.hh.up:"));
        }
    }
}
