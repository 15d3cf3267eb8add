//! Multi-strategy WFS client for the municipal feature services.

mod feature;
mod layer;
mod locator;
mod strategy;

pub use self::{
    feature::{Feature, FeatureCollection, Geometry},
    layer::Layer,
    locator::{DEFAULT_RADIUS_METERS, FeatureLocator},
    strategy::Strategy,
};
