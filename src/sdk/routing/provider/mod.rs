pub mod nominatim;
pub mod osrm;
pub mod types;

pub use nominatim::NominatimSearch;
pub use osrm::OsrmRouter;
