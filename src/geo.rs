use bon::Builder;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const METERS_PER_DEGREE: f64 = 111_320.0;

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Haversine distance in meters.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let delta_latitude = (other.latitude - self.latitude).to_radians();
        let delta_longitude = (other.longitude - self.longitude).to_radians();
        let half_chord = (delta_latitude / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (delta_longitude / 2.0).sin().powi(2);
        2.0 * half_chord.sqrt().asin() * EARTH_RADIUS_METERS
    }
}

/// Degree-bounds rectangle for spatial queries.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Square box of `radius_meters` half-width around the center.
    ///
    /// The longitude span is stretched by the latitude cosine, otherwise the
    /// box narrows towards the poles and Hamburg queries come up short.
    pub fn around(center: GeoLocation, radius_meters: f64) -> Self {
        let delta_latitude = radius_meters / METERS_PER_DEGREE;
        let delta_longitude =
            radius_meters / (METERS_PER_DEGREE * center.latitude.to_radians().cos());
        Self {
            south: center.latitude - delta_latitude,
            west: center.longitude - delta_longitude,
            north: center.latitude + delta_latitude,
            east: center.longitude + delta_longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rathausmarkt.
    const CITY_HALL: GeoLocation = GeoLocation { latitude: 53.5503, longitude: 9.9920 };

    #[test]
    fn distance_to_ok() {
        // City hall to Landungsbrücken, roughly 2 km.
        let landungsbruecken = GeoLocation::builder().latitude(53.5459).longitude(9.9695).build();
        let distance = CITY_HALL.distance_to(landungsbruecken);
        assert!((1400.0..1700.0).contains(&distance), "distance was {distance}");
    }

    #[test]
    fn distance_to_self_is_zero_ok() {
        assert!(CITY_HALL.distance_to(CITY_HALL) < f64::EPSILON);
    }

    #[test]
    fn bounding_box_around_ok() {
        let bbox = BoundingBox::around(CITY_HALL, 100.0);
        assert!(bbox.south < CITY_HALL.latitude && CITY_HALL.latitude < bbox.north);
        assert!(bbox.west < CITY_HALL.longitude && CITY_HALL.longitude < bbox.east);
        // At 53.55° north a degree of longitude is shorter than one of latitude.
        assert!((bbox.east - bbox.west) > (bbox.north - bbox.south));
    }

    #[test]
    fn is_valid_ok() {
        assert!(CITY_HALL.is_valid());
        assert!(!GeoLocation::builder().latitude(91.0).longitude(9.99).build().is_valid());
        assert!(!GeoLocation::builder().latitude(53.55).longitude(-181.0).build().is_valid());
    }
}
