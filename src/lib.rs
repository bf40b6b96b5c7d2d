pub mod sdk;

pub use sdk::config::ServiceConfig;
pub use sdk::coordinator::{
    Phase, ProximitySearchCoordinator, RouteOutcome, SearchOutcome, SearchSettings, Snapshot,
};
pub use sdk::geo::{haversine_km, BoundingBox, Coordinate, ViewRegion};
pub use sdk::location::{LocationProvider, StaticLocation};
pub use sdk::routing::{
    directions_link, NearbyError, NominatimSearch, OsrmRouter, PlaceCandidate, RouteResult,
};
