use thiserror::Error;

use crate::sdk::location::LocationError;

/// Failures talking to one of the remote services.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("HTTP {status} from {service}")]
    HttpStatus { service: &'static str, status: u16 },

    // OSRM reports failures as a non-"Ok" code plus a message
    #[error("API Error ({code}): {message}")]
    ApiError { code: String, message: String },

    #[error("No route found in success response")]
    NoRoute,
}

/// What the coordinator reports back to the presentation layer.
#[derive(Error, Debug)]
pub enum NearbyError {
    #[error("Location permission was denied")]
    PermissionDenied,

    #[error("Current position unavailable: {0}")]
    LocationUnavailable(#[source] LocationError),

    /// Informational: the search worked but nothing lies within the radius.
    #[error("No places within {radius_km} km for \"{query}\"")]
    NoResults { query: String, radius_km: f64 },

    #[error("Place search unavailable: {0}")]
    SearchUnavailable(#[source] ServiceError),

    #[error("Route unavailable: {0}")]
    RouteUnavailable(#[source] ServiceError),

    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid view region spans ({latitude_span}, {longitude_span})")]
    InvalidRegion {
        latitude_span: f64,
        longitude_span: f64,
    },
}

impl NearbyError {
    /// Whether this should block further searching until the user acts.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            NearbyError::PermissionDenied | NearbyError::LocationUnavailable(_)
        )
    }

    /// `NoResults` is a notice rather than a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, NearbyError::NoResults { .. })
    }
}
