use crate::{
    cache::Cache,
    fetch::{Fetch, TransportError},
    geo::{BoundingBox, GeoLocation},
    prelude::*,
    wfs::{Feature, FeatureCollection, Layer, Strategy},
};

pub const DEFAULT_RADIUS_METERS: f64 = 100.0;
pub const MAX_RADIUS_METERS: f64 = 400.0;

/// Doubling the half-width per round reaches the cap from the default radius
/// in two widenings, matching the box sizes the services respond well to.
const WIDENING_FACTOR: f64 = 2.0;

#[must_use]
pub struct FeatureLocator<F> {
    fetch: F,
    cache: Cache<Vec<Feature>>,
}

impl<F: Fetch> FeatureLocator<F> {
    pub fn new(fetch: F, cache: Cache<Vec<Feature>>) -> Self {
        Self { fetch, cache }
    }

    /// Find features of the layer around the center.
    ///
    /// Walks [`Strategy::PRIORITY`] per radius round; the first strategy whose
    /// response parses as GeoJSON and carries at least one feature wins
    /// outright, so results from different strategies are never merged. When a
    /// round comes up empty the box is widened and the walk repeats, up to
    /// [`MAX_RADIUS_METERS`].
    ///
    /// `Ok(empty)` is a true negative. `Err` is reserved for the case where
    /// not a single attempt got a response out of the service.
    #[instrument(skip_all, fields(layer = %layer, radius_meters = radius_meters))]
    pub async fn find_features(
        &self,
        center: GeoLocation,
        radius_meters: f64,
        layer: Layer,
    ) -> Result<Vec<Feature>, TransportError> {
        let cache_key =
            format!("{layer}:{:.6}:{:.6}:{radius_meters}", center.latitude, center.longitude);
        if let Some(features) = self.cache.get(&cache_key).await {
            debug!("📦 Cache hit");
            return Ok(features);
        }

        info!("🗺️ Locating…");
        let mut radius = radius_meters.min(MAX_RADIUS_METERS);
        let mut any_response = false;
        let mut last_transport_error = None;
        loop {
            let bbox = BoundingBox::around(center, radius);
            for strategy in Strategy::PRIORITY {
                match self.attempt(strategy, layer, bbox).await {
                    Ok(Some(features)) => {
                        info!(n_features = features.len(), ?strategy, radius, "✅ Found");
                        self.cache.insert(cache_key.as_str(), features.clone()).await;
                        return Ok(features);
                    }
                    Ok(None) => {
                        any_response = true;
                    }
                    Err(error) => {
                        debug!(?strategy, "🚧 Transport failure: {error:#}");
                        last_transport_error = Some(error);
                    }
                }
            }
            if radius >= MAX_RADIUS_METERS {
                break;
            }
            radius = (radius * WIDENING_FACTOR).min(MAX_RADIUS_METERS);
            debug!(radius, "🔍 Widening the box…");
        }

        match last_transport_error {
            Some(error) if !any_response => Err(error),
            _ => {
                info!("🤷 Nothing here");
                self.cache.insert(cache_key, Vec::new()).await;
                Ok(Vec::new())
            }
        }
    }

    /// One strategy, one round trip.
    ///
    /// `Ok(None)` covers both a valid empty collection and an unparseable
    /// body: either way this strategy is spent and the next one is up.
    async fn attempt(
        &self,
        strategy: Strategy,
        layer: Layer,
        bbox: BoundingBox,
    ) -> Result<Option<Vec<Feature>>, TransportError> {
        let url = strategy.query_url(layer, bbox);
        let body = self.fetch.fetch_text(&url).await?;
        match serde_json::from_str::<FeatureCollection>(&body) {
            Ok(collection) if collection.features.is_empty() => Ok(None),
            Ok(collection) => Ok(Some(collection.features)),
            Err(error) => {
                debug!(?strategy, "🚧 Not a feature collection: {error:#}");
                Ok(None)
            }
        }
    }
}
