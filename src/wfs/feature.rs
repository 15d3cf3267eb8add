use serde::Deserialize;
use serde_json::{Map, Value};

use crate::geo::GeoLocation;

/// GeoJSON feature collection, the shape every strategy must parse into.
///
/// The `type` tag is matched strictly: a JSON-shaped error document from a
/// confused deployment must fail to parse instead of passing as an empty
/// collection.
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    #[expect(dead_code)]
    kind: CollectionKind,

    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Copy, Clone, Debug, Deserialize)]
enum CollectionKind {
    FeatureCollection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,

    /// Flat property mapping; the layers disagree wildly on the keys.
    pub properties: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

impl Geometry {
    /// Single coordinate standing in for the whole geometry: the point
    /// itself, or the first vertex of the outer ring. Coordinates are in
    /// GeoJSON order, longitude first.
    pub fn representative_point(&self) -> Option<GeoLocation> {
        let [longitude, latitude] = match self {
            Self::Point { coordinates } => *coordinates,
            Self::Polygon { coordinates } => *coordinates.first()?.first()?,
            Self::MultiPolygon { coordinates } => *coordinates.first()?.first()?.first()?,
        };
        Some(GeoLocation::builder().latitude(latitude).longitude(longitude).build())
    }
}
