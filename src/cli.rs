use clap::{Parser, Subcommand};

use crate::wfs::Layer;

#[derive(Parser)]
#[command(author, version, about, long_about, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the monitored schools.
    Schools,

    /// Resolve a free-text address to a coordinate.
    Geocode {
        /// Address, e.g. `Hochrad 2, 22605 Hamburg`.
        address: String,
    },

    /// Find vector features of a municipal layer around a coordinate.
    Features {
        #[clap(long, allow_hyphen_values = true)]
        latitude: f64,

        #[clap(long, allow_hyphen_values = true)]
        longitude: f64,

        #[clap(long, value_enum)]
        layer: Layer,

        /// Initial search radius in meters; widened automatically when
        /// nothing is found.
        #[clap(long, default_value = "100")]
        radius: f64,
    },

    /// Print an aerial imagery (orthophoto) URL for a coordinate.
    Imagery {
        #[clap(long, allow_hyphen_values = true)]
        latitude: f64,

        #[clap(long, allow_hyphen_values = true)]
        longitude: f64,

        #[clap(long, default_value = "200")]
        radius: f64,

        /// Tile edge length in pixels.
        #[clap(long, default_value = "512")]
        size: u32,
    },

    /// Manually search the Transparenzportal.
    #[clap(alias = "search")]
    QuickSearch {
        /// Search query; `OR` and quoted phrases pass through verbatim.
        query: String,

        /// Maximum number of results.
        #[clap(long, default_value = "5")]
        limit: u32,
    },

    /// Run the full research pipeline for one school.
    Dossier {
        /// Schulkennziffer, e.g. `5887`.
        school_id: String,

        /// Layers to query; defaults to all of them.
        #[clap(long, value_enum, value_delimiter = ',', num_args = 1..)]
        layers: Option<Vec<Layer>>,

        /// Maximum number of documents per search scenario.
        #[clap(long, default_value = "5")]
        limit: u32,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed_ok() {
        Cli::command().debug_assert();
    }
}
