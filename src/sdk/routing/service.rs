use std::future::Future;
use std::pin::Pin;

use super::error::ServiceError;
use super::place::{PlaceHit, SearchRequest};
use super::route::RouteResponse;
use crate::sdk::geo::Coordinate;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A free-text place search scoped to a bounding box.
pub trait PlaceSearch: Send + Sync {
    /// Hits come back in the order the service ranked them.
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<Vec<PlaceHit>, ServiceError>>;
}

/// Driving directions between two points.
pub trait Router: Send + Sync {
    /// Gets the full route geometry and travel duration.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> BoxFuture<'_, Result<RouteResponse, ServiceError>>;
}

/// Hands a directions link over to an external maps application.
pub trait MapLauncher: Send + Sync {
    fn open(&self, url: &str);
}
