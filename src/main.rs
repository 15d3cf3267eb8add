use clap::Parser;
use itertools::Itertools;

mod cache;
mod cli;
mod client;
mod dossier;
mod fetch;
mod geo;
mod logging;
mod nominatim;
mod prelude;
mod schools;
mod transparenz;
mod wfs;
mod wms;

use self::{
    cache::Cache,
    cli::{Cli, Command},
    dossier::Dossier,
    geo::GeoLocation,
    nominatim::Geocoder,
    transparenz::{SearchClient, SearchRequest},
    wfs::{FeatureLocator, Layer},
};
use crate::prelude::*;

#[tokio::main]
async fn main() -> Result {
    let cli = Cli::parse();
    let _logging_guard = logging::init()?;
    let client = client::build_client()?;
    let geocoder = Geocoder::new(client.clone(), Cache::new());
    let locator = FeatureLocator::new(client.clone(), Cache::new());
    let search_client = SearchClient::new(client);

    match cli.command {
        Command::Schools => {
            for school in schools::REGISTRY {
                println!("{}  {} / {}  {}", school.id, school.district, school.quarter, school.name);
            }
        }

        Command::Geocode { address } => match geocoder.resolve(&address).await {
            Some(location) => println!("{:.5}, {:.5}", location.latitude, location.longitude),
            None => println!("Address could not be resolved."),
        },

        Command::Features { latitude, longitude, layer, radius } => {
            let center = GeoLocation::builder().latitude(latitude).longitude(longitude).build();
            if !center.is_valid() {
                bail!("the coordinate is out of range");
            }
            match locator.find_features(center, radius, layer).await {
                Ok(features) if features.is_empty() => println!("Nothing mapped here."),
                Ok(features) => {
                    for feature in features {
                        let properties = feature.properties.unwrap_or_default();
                        println!("{}", serde_json::Value::Object(properties));
                    }
                }
                Err(error) => bail!("the {layer} service is unreachable: {error:#}"),
            }
        }

        Command::Imagery { latitude, longitude, radius, size } => {
            let center = GeoLocation::builder().latitude(latitude).longitude(longitude).build();
            if !center.is_valid() {
                bail!("the coordinate is out of range");
            }
            println!("{}", wms::map_url(center, radius, size));
        }

        Command::QuickSearch { query, limit } => {
            let request = SearchRequest::builder().q(&query).rows(limit).build();
            let records = search_client.search(&request).await.collect_vec();
            if records.is_empty() {
                println!("No documents found.");
            }
            for record in records {
                let date = record.modified.map(|date| date.to_string()).unwrap_or_default();
                println!("{date}  {}  {}", record.title, record.link.unwrap_or_default());
            }
        }

        Command::Dossier { school_id, layers, limit } => {
            let school = schools::find_by_id(&school_id)
                .with_context(|| format!("unknown Schulkennziffer `{school_id}`"))?;
            let layers = layers.unwrap_or_else(|| {
                vec![
                    Layer::Cadastre,
                    Layer::Noise,
                    Layer::FloodRisk,
                    Layer::SolarPotential,
                    Layer::Schools,
                ]
            });
            Dossier::builder()
                .geocoder(&geocoder)
                .locator(&locator)
                .search_client(&search_client)
                .school(school)
                .layers(&layers)
                .search_limit(limit)
                .build()
                .run()
                .await;
        }
    }
    Ok(())
}
