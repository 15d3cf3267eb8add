use url::Url;

use crate::{geo::BoundingBox, wfs::Layer};

/// One way of phrasing a `GetFeature` request.
///
/// The Geodienste deployments are inconsistent about protocol version and
/// `EPSG:4326` axis order, so the locator walks [`Strategy::PRIORITY`] and
/// takes the first phrasing the deployment actually answers.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Strategy {
    pub version: WfsVersion,
    pub axis_order: AxisOrder,
}

impl Strategy {
    /// Most-likely-correct first, to bound the number of wasted round trips.
    pub const PRIORITY: [Self; 4] = [
        Self { version: WfsVersion::V2_0, axis_order: AxisOrder::LonLat },
        Self { version: WfsVersion::V2_0, axis_order: AxisOrder::LatLon },
        Self { version: WfsVersion::V1_1, axis_order: AxisOrder::LatLon },
        Self { version: WfsVersion::V1_1, axis_order: AxisOrder::LonLat },
    ];

    pub fn query_url(self, layer: Layer, bbox: BoundingBox) -> Url {
        let mut url = layer.endpoint();
        url.query_pairs_mut()
            .append_pair("SERVICE", "WFS")
            .append_pair("REQUEST", "GetFeature")
            .append_pair("VERSION", self.version.number())
            .append_pair(self.version.type_name_parameter(), layer.type_name())
            .append_pair("OUTPUTFORMAT", "application/geo+json")
            .append_pair("SRSNAME", self.axis_order.srs_name())
            .append_pair("BBOX", &self.axis_order.bbox_parameter(bbox));
        url
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WfsVersion {
    V1_1,
    V2_0,
}

impl WfsVersion {
    pub const fn number(self) -> &'static str {
        match self {
            Self::V1_1 => "1.1.0",
            Self::V2_0 => "2.0.0",
        }
    }

    /// WFS 2.0 renamed `TYPENAME` to `TYPENAMES`; some deployments reject the
    /// respective other spelling.
    pub const fn type_name_parameter(self) -> &'static str {
        match self {
            Self::V1_1 => "TYPENAME",
            Self::V2_0 => "TYPENAMES",
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AxisOrder {
    /// Longitude-first, the GeoJSON convention.
    LonLat,

    /// Latitude-first, the official `urn:` interpretation of EPSG:4326.
    LatLon,
}

impl AxisOrder {
    pub const fn srs_name(self) -> &'static str {
        match self {
            Self::LonLat => "EPSG:4326",
            Self::LatLon => "urn:ogc:def:crs:EPSG::4326",
        }
    }

    pub fn bbox_parameter(self, bbox: BoundingBox) -> String {
        match self {
            Self::LonLat => format!(
                "{},{},{},{},{}",
                bbox.west,
                bbox.south,
                bbox.east,
                bbox.north,
                self.srs_name(),
            ),
            Self::LatLon => format!(
                "{},{},{},{},{}",
                bbox.south,
                bbox.west,
                bbox.north,
                bbox.east,
                self.srs_name(),
            ),
        }
    }
}
