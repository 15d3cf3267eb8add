//! Per-school research dossier: master data, coordinate, map layers and
//! themed document searches, composed from the service clients.

use bon::Builder;
use itertools::Itertools;

use crate::{
    fetch::Fetch,
    nominatim::Geocoder,
    prelude::*,
    schools::School,
    transparenz::{SearchClient, SearchRequest},
    wfs::{DEFAULT_RADIUS_METERS, FeatureLocator, Geometry, Layer},
    wms,
};

#[must_use]
#[derive(Builder)]
pub struct Dossier<'a, F> {
    geocoder: &'a Geocoder<F>,
    locator: &'a FeatureLocator<F>,
    search_client: &'a SearchClient<F>,
    school: &'a School,
    layers: &'a [Layer],

    #[builder(default = 5)]
    search_limit: u32,
}

impl<F: Fetch> Dossier<'_, F> {
    /// Run the full pipeline for the school and print the dossier.
    ///
    /// Every external dependency is treated as unreliable and optional: a
    /// dead service degrades to a notice in the respective section, never to
    /// an aborted dossier.
    #[instrument(skip_all, fields(school = %self.school))]
    pub async fn run(&self) {
        println!("# Dossier: {}", self.school);
        println!(
            "Bezirk: {} · Stadtteil: {} · Kennziffer: {} · ca. {} Schüler",
            self.school.district, self.school.quarter, self.school.id, self.school.n_students,
        );

        let resolution = self.geocoder.resolve_or_fallback(self.school.address).await;
        let location = resolution.location();
        if resolution.is_fallback() {
            println!(
                "⚠️ `{}` could not be resolved; using the city-hall fallback coordinate.",
                self.school.address,
            );
        }
        println!("📍 {} → {:.5}, {:.5}", self.school.address, location.latitude, location.longitude);
        println!("🛰️ Aerial imagery: {}", wms::map_url(location, 200.0, 512));

        for layer in self.layers {
            println!("\n## Layer: {layer}");
            match self.locator.find_features(location, DEFAULT_RADIUS_METERS, *layer).await {
                Ok(features) if features.is_empty() => {
                    println!("Nothing mapped here.");
                }
                Ok(features) => {
                    println!("{} feature(s) nearby:", features.len());
                    for feature in features.iter().take(3) {
                        let properties = feature
                            .properties
                            .as_ref()
                            .map_or_else(|| "{}".to_string(), |properties| {
                                serde_json::Value::Object(properties.clone()).to_string()
                            });
                        let distance = feature
                            .geometry
                            .as_ref()
                            .and_then(Geometry::representative_point)
                            .map_or_else(String::new, |point| {
                                format!("{:.0} m ", location.distance_to(point))
                            });
                        println!("- {distance}{properties}");
                    }
                }
                Err(error) => {
                    warn!("‼️ The {layer} service is unreachable: {error:#}");
                    println!("Service unreachable, try again later.");
                }
            }
        }

        for scenario in self.school.scenarios() {
            println!("\n## {} — {}", scenario.topic, scenario.help);
            println!("Query: `{}`", scenario.query);
            let request =
                SearchRequest::builder().q(&scenario.query).rows(self.search_limit).build();
            let records = self.search_client.search(&request).await.collect_vec();
            if records.is_empty() {
                println!("No documents found in the Transparenzportal.");
                continue;
            }
            for record in records {
                let date = record
                    .modified
                    .map_or_else(|| "          ".to_string(), |date| date.to_string());
                println!("- {date}  {}  {}", record.title, record.link.unwrap_or_default());
            }
        }
    }
}
