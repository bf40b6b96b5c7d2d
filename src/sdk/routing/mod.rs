pub mod error;
pub mod link;
pub mod place;
pub mod provider;
pub mod route;
pub mod service;

pub use error::{NearbyError, ServiceError};
pub use link::{directions_link, open_directions, StdoutLauncher};
pub use place::{filter_within_radius, PlaceCandidate, PlaceHit, SearchRequest};
pub use provider::{NominatimSearch, OsrmRouter};
pub use route::{eta_minutes, RouteResponse, RouteResult};
pub use service::{BoxFuture, MapLauncher, PlaceSearch, Router};
