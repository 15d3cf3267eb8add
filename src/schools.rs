//! Static registry of the monitored schools.
//!
//! Structure: Bezirk → Stadtteil → school, with the Schulkennziffer as the
//! stable identifier. A real deployment would load this from the school
//! authority's CSV export; the monitor ships a curated sample.

use std::fmt::{self, Display};

/// Registry entry.
#[derive(Copy, Clone, Debug)]
pub struct School {
    pub name: &'static str,

    /// Schulkennziffer, the school authority's object number. Construction
    /// records in the Transparenzportal reference it more reliably than the
    /// school name.
    pub id: &'static str,

    pub district: &'static str,
    pub quarter: &'static str,
    pub address: &'static str,
    pub n_students: u32,
}

pub const REGISTRY: &[School] = &[
    School {
        name: "Gymnasium Hochrad",
        id: "5887",
        district: "Altona",
        quarter: "Othmarschen",
        address: "Hochrad 2, 22605 Hamburg",
        n_students: 950,
    },
    School {
        name: "Schule Zollenspieker",
        id: "5648",
        district: "Bergedorf",
        quarter: "Kirchwerder",
        address: "Kirchenheerweg 223, 21037 Hamburg",
        n_students: 230,
    },
    School {
        name: "Grundschule Mümmelmannsberg",
        id: "5058",
        district: "Mitte",
        quarter: "Billstedt",
        address: "Mümmelmannsberg 75, 22115 Hamburg",
        n_students: 340,
    },
];

pub fn find_by_id(id: &str) -> Option<&'static School> {
    REGISTRY.iter().find(|school| school.id == id)
}

impl School {
    /// Query matching either the school's name or its Kennziffer.
    #[must_use]
    pub fn object_query(&self) -> String {
        format!(r#""{}" OR "{}""#, self.name, self.id)
    }

    /// The themed Transparenzportal searches run for a dossier.
    #[must_use]
    pub fn scenarios(&self) -> [SearchScenario; 3] {
        [
            SearchScenario {
                topic: "Entwicklungsplanung (SEPL)",
                query: format!(r#"Schulentwicklungsplan "{}""#, self.district),
                help: "general development planning for the district",
            },
            SearchScenario {
                topic: "Objektbezogene Drucksachen & Bau",
                query: format!("{} Neubau OR Sanierung OR Drucksache", self.object_query()),
                help: "resolutions specific to this school",
            },
            SearchScenario {
                topic: "Lage & Bebauungspläne",
                query: format!(r#"Bebauungsplan "{}""#, self.quarter),
                help: "zoning law in the quarter",
            },
        ]
    }
}

impl Display for School {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ({})", self.name, self.id)
    }
}

/// Themed document search derived from a school's master data.
#[derive(Clone, Debug)]
pub struct SearchScenario {
    pub topic: &'static str,
    pub query: String,
    pub help: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_id_ok() {
        let school = find_by_id("5648").expect("registry entry");
        assert_eq!(school.name, "Schule Zollenspieker");
        assert_eq!(school.district, "Bergedorf");
        assert!(find_by_id("0000").is_none());
    }

    #[test]
    fn object_query_ok() {
        let school = find_by_id("5887").unwrap();
        assert_eq!(school.object_query(), r#""Gymnasium Hochrad" OR "5887""#);
    }

    #[test]
    fn scenarios_ok() {
        let scenarios = find_by_id("5058").unwrap().scenarios();
        assert_eq!(scenarios[0].query, r#"Schulentwicklungsplan "Mitte""#);
        assert_eq!(
            scenarios[1].query,
            r#""Grundschule Mümmelmannsberg" OR "5058" Neubau OR Sanierung OR Drucksache"#,
        );
        assert_eq!(scenarios[2].query, r#"Bebauungsplan "Billstedt""#);
    }
}
