use serde::{Deserialize, Serialize};

use crate::sdk::geo::{haversine_km, BoundingBox, Coordinate};

/// What is sent to a place-search service.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub bbox: BoundingBox,
    pub limit: usize,
}

/// One raw result as the search service reports it. Coordinates stay
/// textual until they are filtered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceHit {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

impl PlaceHit {
    pub fn coordinate(&self) -> Option<Coordinate> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        if latitude.is_finite() && longitude.is_finite() {
            Some(Coordinate::new(latitude, longitude))
        } else {
            None
        }
    }
}

/// A nearby place shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCandidate {
    pub coordinate: Coordinate,
    pub display_name: String,
    pub distance_km: f64,
}

/// Keeps hits no further than `radius_km` from `center`, in service order.
pub fn filter_within_radius(
    center: Coordinate,
    hits: Vec<PlaceHit>,
    radius_km: f64,
) -> Vec<PlaceCandidate> {
    hits.into_iter()
        .filter_map(|hit| {
            let Some(coordinate) = hit.coordinate() else {
                log::warn!(
                    "Dropping \"{}\": unparsable coordinates ({}, {})",
                    hit.display_name,
                    hit.lat,
                    hit.lon
                );
                return None;
            };
            let distance_km = haversine_km(center, coordinate);
            if distance_km <= radius_km {
                Some(PlaceCandidate {
                    coordinate,
                    display_name: hit.display_name,
                    distance_km,
                })
            } else {
                log::debug!(
                    "[OUT OF RANGE] {} ({:.2} km)",
                    hit.display_name,
                    distance_km
                );
                None
            }
        })
        .collect()
}
