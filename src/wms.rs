//! Aerial imagery (digital orthophoto) via WMS `GetMap`.

use url::Url;

use crate::geo::{BoundingBox, GeoLocation};

pub const ENDPOINT: &str = "https://geodienste.hamburg.de/HH_WMS_DOP";

/// Build a `GetMap` URL for a square orthophoto around the center.
///
/// WMS 1.3.0 with `EPSG:4326` is latitude-first, unlike GeoJSON; getting this
/// wrong yields a blank tile from somewhere in the Indian Ocean rather than
/// an error.
pub fn map_url(center: GeoLocation, radius_meters: f64, size_pixels: u32) -> Url {
    let bbox = BoundingBox::around(center, radius_meters);
    let size = size_pixels.to_string();
    let mut url = Url::parse(ENDPOINT).expect("the endpoint constant must parse");
    url.query_pairs_mut()
        .append_pair("SERVICE", "WMS")
        .append_pair("REQUEST", "GetMap")
        .append_pair("VERSION", "1.3.0")
        .append_pair("LAYERS", "DOP")
        .append_pair("STYLES", "")
        .append_pair("CRS", "EPSG:4326")
        .append_pair(
            "BBOX",
            &format!("{},{},{},{}", bbox.south, bbox.west, bbox.north, bbox.east),
        )
        .append_pair("WIDTH", &size)
        .append_pair("HEIGHT", &size)
        .append_pair("FORMAT", "image/png");
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_url_is_latitude_first_ok() {
        let center = GeoLocation::builder().latitude(53.5530).longitude(9.8662).build();
        let url = map_url(center, 200.0, 512);
        let bbox = url
            .query_pairs()
            .find(|(key, _)| key == "BBOX")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        let components: Vec<f64> =
            bbox.split(',').map(|component| component.parse().unwrap()).collect();
        assert_eq!(components.len(), 4);
        // South/north around the latitude, not the longitude.
        assert!(components[0] < 53.5530 && 53.5530 < components[2]);
        assert!(components[1] < 9.8662 && 9.8662 < components[3]);
    }

    #[test]
    fn map_url_is_square_ok() {
        let center = GeoLocation::builder().latitude(53.55).longitude(9.99).build();
        let url = map_url(center, 100.0, 256);
        let query = url.query().unwrap();
        assert!(query.contains("WIDTH=256"));
        assert!(query.contains("HEIGHT=256"));
        assert!(query.contains("VERSION=1.3.0"));
    }
}
