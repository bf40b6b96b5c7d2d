use serde::Serialize;

use crate::sdk::geo::Coordinate;

/// Routing service answer before it is mapped into the internal model.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// `[lon, lat]` pairs, GeoJSON order.
    pub geometry: Vec<[f64; 2]>,
    pub duration_seconds: f64,
    pub distance_meters: f64,
}

/// A drivable path from the user's position to a chosen place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub path: Vec<Coordinate>,
    pub duration_seconds: f64,
    pub distance_km: f64,
}

impl RouteResult {
    /// Swaps every `[lon, lat]` pair into a latitude-first coordinate.
    pub fn from_response(response: RouteResponse) -> Self {
        Self {
            path: response
                .geometry
                .into_iter()
                .map(Coordinate::from_lon_lat)
                .collect(),
            duration_seconds: response.duration_seconds,
            distance_km: response.distance_meters / 1000.0,
        }
    }

    /// Travel time rounded to whole minutes, halves rounding up.
    pub fn eta_minutes(&self) -> u64 {
        eta_minutes(self.duration_seconds)
    }
}

pub fn eta_minutes(duration_seconds: f64) -> u64 {
    // f64::round goes away from zero, which is half-up for durations
    (duration_seconds.max(0.0) / 60.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_round_half_up() {
        assert_eq!(eta_minutes(900.0), 15);
        assert_eq!(eta_minutes(930.0), 16);
        assert_eq!(eta_minutes(929.0), 15);
        assert_eq!(eta_minutes(0.0), 0);
        assert_eq!(eta_minutes(29.0), 0);
        assert_eq!(eta_minutes(30.0), 1);
    }

    #[test]
    fn geometry_is_swapped_to_lat_lon() {
        let route = RouteResult::from_response(RouteResponse {
            geometry: vec![[106.7, 10.8], [106.71, 10.81]],
            duration_seconds: 930.0,
            distance_meters: 2500.0,
        });
        assert_eq!(
            route.path,
            vec![Coordinate::new(10.8, 106.7), Coordinate::new(10.81, 106.71)]
        );
        assert_eq!(route.eta_minutes(), 16);
        assert_eq!(route.distance_km, 2.5);
    }
}
