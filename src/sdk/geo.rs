use serde::{Deserialize, Serialize};

use super::routing::error::NearbyError;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate from a `[lon, lat]` pair as emitted by GeoJSON.
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin() * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// The visible map viewport around the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewRegion {
    center: Coordinate,
    latitude_span: f64,
    longitude_span: f64,
}

impl ViewRegion {
    /// Rejects spans that are not strictly positive (NaN included) and
    /// centers outside [-90, 90] x [-180, 180].
    pub fn new(
        center: Coordinate,
        latitude_span: f64,
        longitude_span: f64,
    ) -> Result<Self, NearbyError> {
        if !center.is_valid() {
            return Err(NearbyError::InvalidCoordinate {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }
        if !(latitude_span > 0.0 && longitude_span > 0.0) {
            return Err(NearbyError::InvalidRegion {
                latitude_span,
                longitude_span,
            });
        }
        Ok(Self {
            center,
            latitude_span,
            longitude_span,
        })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn latitude_span(&self) -> f64 {
        self.latitude_span
    }

    pub fn longitude_span(&self) -> f64 {
        self.longitude_span
    }
}

/// A lat/lon rectangle used to scope a place search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

impl BoundingBox {
    pub fn around(center: Coordinate, half_span_deg: f64) -> Self {
        Self {
            west: center.longitude - half_span_deg,
            north: center.latitude + half_span_deg,
            east: center.longitude + half_span_deg,
            south: center.latitude - half_span_deg,
        }
    }

    /// `west,north,east,south`, the order Nominatim expects for `viewbox`.
    pub fn to_viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}
