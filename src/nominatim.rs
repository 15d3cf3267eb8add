//! Nominatim-style address geocoder.

use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::{cache::Cache, fetch::Fetch, geo::GeoLocation, prelude::*};

pub const ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Substitute coordinate for unresolvable addresses: Rathausmarkt.
pub const FALLBACK: GeoLocation = GeoLocation { latitude: 53.5503, longitude: 9.9920 };

/// Outcome of [`Geocoder::resolve_or_fallback`].
///
/// Either way there is a usable coordinate, but a caller must never mistake
/// the city-hall fallback for the actual school site.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved(GeoLocation),
    Fallback(GeoLocation),
}

impl Resolution {
    pub fn location(self) -> GeoLocation {
        match self {
            Self::Resolved(location) | Self::Fallback(location) => location,
        }
    }

    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

#[must_use]
pub struct Geocoder<F> {
    fetch: F,
    endpoint: Url,
    cache: Cache<Option<GeoLocation>>,
}

impl<F: Fetch> Geocoder<F> {
    pub fn new(fetch: F, cache: Cache<Option<GeoLocation>>) -> Self {
        Self {
            fetch,
            endpoint: Url::parse(ENDPOINT).expect("the endpoint constant must parse"),
            cache,
        }
    }

    /// Resolve a free-text address to a coordinate.
    ///
    /// Every failure cause (transport, parse, empty result list, nonsense
    /// coordinates) collapses to `None`; the causes only show up in the log.
    /// Outcomes are memoized per trimmed address, failures included, since the
    /// upstream answer is time-invariant for practical purposes.
    #[instrument(skip_all, fields(address = address))]
    pub async fn resolve(&self, address: &str) -> Option<GeoLocation> {
        let address = address.trim();
        if address.is_empty() {
            debug!("⏭️ Skipping an empty address");
            return None;
        }
        if let Some(cached) = self.cache.get(address).await {
            debug!("📦 Cache hit");
            return cached;
        }
        let resolved = match self.lookup(address).await {
            Ok(Some(location)) if location.is_valid() => Some(location),
            Ok(Some(location)) => {
                warn!(?location, "⚠️ Discarding an out-of-range coordinate");
                None
            }
            Ok(None) => {
                info!("🤷 No match for `{address}`");
                None
            }
            Err(error) => {
                warn!("⚠️ Failed to geocode `{address}`: {error:#}");
                None
            }
        };
        self.cache.insert(address, resolved).await;
        resolved
    }

    /// Resolve, substituting [`FALLBACK`] when resolution fails.
    pub async fn resolve_or_fallback(&self, address: &str) -> Resolution {
        match self.resolve(address).await {
            Some(location) => Resolution::Resolved(location),
            None => {
                warn!("📍 Falling back to the city-hall coordinate for `{address}`");
                Resolution::Fallback(FALLBACK)
            }
        }
    }

    async fn lookup(&self, address: &str) -> Result<Option<GeoLocation>> {
        info!("🌍 Geocoding…");
        let request = LookupRequest::builder().q(address).build();
        let url = {
            let query =
                serde_qs::to_string(&request).context("failed to serialize the lookup request")?;
            let mut url = self.endpoint.clone();
            url.set_query(Some(&query));
            url
        };
        let body = self.fetch.fetch_text(&url).await?;
        let places: Vec<Place> =
            serde_json::from_str(&body).context("failed to deserialize the lookup response")?;
        Ok(places
            .first()
            .map(|place| GeoLocation::builder().latitude(place.lat).longitude(place.lon).build()))
    }
}

#[must_use]
#[derive(Builder, Serialize)]
struct LookupRequest<'a> {
    pub q: &'a str,

    #[builder(default = "json")]
    pub format: &'a str,

    #[builder(default = 1)]
    pub limit: u32,
}

/// Single entry of the lookup response. The service serves degrees as JSON
/// strings, not numbers.
#[derive(Debug, Deserialize)]
struct Place {
    #[serde(deserialize_with = "deserialize_degrees")]
    pub lat: f64,

    #[serde(deserialize_with = "deserialize_degrees")]
    pub lon: f64,
}

fn deserialize_degrees<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let text = String::deserialize(deserializer)?;
    text.parse().map_err(|error| {
        serde::de::Error::custom(format!("failed to deserialize degrees: {error:#}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::FakeFetch;

    // language=json
    const HOCHRAD: &str = r#"[{"place_id": 1, "lat": "53.5530", "lon": "9.8662", "display_name": "Hochrad, Othmarschen, Hamburg"}]"#;

    #[test]
    fn lookup_request_ok() -> Result {
        let request = LookupRequest::builder().q("Hochrad").build();
        assert_eq!(serde_qs::to_string(&request)?, "q=Hochrad&format=json&limit=1");
        Ok(())
    }

    #[tokio::test]
    async fn resolve_ok() {
        let geocoder = Geocoder::new(FakeFetch::new([Ok(HOCHRAD.to_string())]), Cache::new());
        let location = geocoder.resolve("Hochrad 2, 22605 Hamburg").await.expect("a coordinate");
        assert!(location.is_valid());
        assert!((location.latitude - 53.5530).abs() < f64::EPSILON);
        assert!((location.longitude - 9.8662).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn empty_address_issues_no_call_ok() {
        let fetch = FakeFetch::new([Ok(HOCHRAD.to_string())]);
        let geocoder = Geocoder::new(fetch, Cache::new());
        assert_eq!(geocoder.resolve("").await, None);
        assert_eq!(geocoder.resolve("   \t").await, None);
        assert_eq!(geocoder.fetch.calls(), 0);
    }

    #[tokio::test]
    async fn repeated_resolve_issues_single_call_ok() {
        let geocoder = Geocoder::new(FakeFetch::new([Ok(HOCHRAD.to_string())]), Cache::new());
        let first = geocoder.resolve("Hochrad 2").await;
        let second = geocoder.resolve("Hochrad 2").await;
        assert_eq!(first, second);
        assert_eq!(geocoder.fetch.calls(), 1);
    }

    #[tokio::test]
    async fn out_of_range_coordinate_fails_ok() {
        // language=json
        let body = r#"[{"lat": "153.0", "lon": "9.9"}]"#;
        let geocoder = Geocoder::new(FakeFetch::new([Ok(body.to_string())]), Cache::new());
        assert_eq!(geocoder.resolve("somewhere impossible").await, None);
    }

    #[tokio::test]
    async fn unreachable_service_falls_back_ok() {
        let geocoder = Geocoder::new(FakeFetch::unreachable_service(), Cache::new());
        let resolution = geocoder.resolve_or_fallback("Kirchenheerweg 223").await;
        assert!(resolution.is_fallback());
        assert_eq!(resolution.location(), FALLBACK);
    }

    #[tokio::test]
    async fn resolved_is_not_fallback_ok() {
        let geocoder = Geocoder::new(FakeFetch::new([Ok(HOCHRAD.to_string())]), Cache::new());
        let resolution = geocoder.resolve_or_fallback("Hochrad 2").await;
        assert!(!resolution.is_fallback());
    }
}
