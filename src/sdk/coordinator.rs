//! Nearby place search and routing around the user's position.
//!
//! The coordinator owns the map state (region, results, route) and only
//! mutates it through [`ProximitySearchCoordinator::acquire_location`],
//! [`ProximitySearchCoordinator::search`] and
//! [`ProximitySearchCoordinator::route`]. Callers read it via
//! [`ProximitySearchCoordinator::snapshot`].
//!
//! Every search and route request is numbered when issued. A completion is
//! applied only if no newer request of the same kind (or, for routes, no newer
//! search) was issued meanwhile; stale completions are dropped.

use parking_lot::Mutex;
use serde::Serialize;

use super::config::DEFAULT_QUERY_SUFFIX;
use super::geo::{BoundingBox, Coordinate, ViewRegion};
use super::location::{LocationError, LocationProvider, Permission};
use super::routing::error::NearbyError;
use super::routing::place::{filter_within_radius, PlaceCandidate, SearchRequest};
use super::routing::route::RouteResult;
use super::routing::service::{PlaceSearch, Router};

pub const VIEW_SPAN_DEG: f64 = 0.05;
pub const SEARCH_HALF_SPAN_DEG: f64 = 0.1;
pub const SEARCH_RADIUS_KM: f64 = 10.0;
pub const SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Span of the view region created around the device position.
    pub view_span_deg: f64,
    /// Half-width of the box the search is scoped to.
    pub search_half_span_deg: f64,
    pub radius_km: f64,
    pub result_limit: usize,
    /// Appended to every query; empty disables it.
    pub query_suffix: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            view_span_deg: VIEW_SPAN_DEG,
            search_half_span_deg: SEARCH_HALF_SPAN_DEG,
            radius_km: SEARCH_RADIUS_KM,
            result_limit: SEARCH_LIMIT,
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
        }
    }
}

impl SearchSettings {
    fn service_query(&self, query: &str) -> String {
        if self.query_suffix.is_empty() {
            query.to_string()
        } else {
            format!("{} {}", query, self.query_suffix)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    LocationAcquired,
    Searching,
    ResultsReady,
    NoResults,
    SearchFailed,
    Routing,
    RouteReady,
    RouteFailed,
}

/// Read-only copy of the coordinator state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub region: Option<ViewRegion>,
    pub places: Vec<PlaceCandidate>,
    pub route: Option<RouteResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No location yet or blank query; nothing was sent.
    Skipped,
    /// Results stored; holds how many were kept.
    Ready(usize),
    /// A newer search was issued before this one finished.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Skipped,
    Ready { eta_minutes: u64 },
    Superseded,
}

struct State {
    phase: Phase,
    region: Option<ViewRegion>,
    places: Vec<PlaceCandidate>,
    route: Option<RouteResult>,
    search_seq: u64,
    route_seq: u64,
}

pub struct ProximitySearchCoordinator<L, S, R> {
    location: L,
    search: S,
    router: R,
    settings: SearchSettings,
    state: Mutex<State>,
}

impl<L, S, R> ProximitySearchCoordinator<L, S, R>
where
    L: LocationProvider,
    S: PlaceSearch,
    R: Router,
{
    pub fn new(location: L, search: S, router: R) -> Self {
        Self::with_settings(location, search, router, SearchSettings::default())
    }

    pub fn with_settings(location: L, search: S, router: R, settings: SearchSettings) -> Self {
        Self {
            location,
            search,
            router,
            settings,
            state: Mutex::new(State {
                phase: Phase::Idle,
                region: None,
                places: Vec::new(),
                route: None,
                search_seq: 0,
                route_seq: 0,
            }),
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock();
        Snapshot {
            phase: state.phase,
            region: state.region,
            places: state.places.clone(),
            route: state.route.clone(),
        }
    }

    pub fn region(&self) -> Option<ViewRegion> {
        self.state.lock().region
    }

    /// Asks for location access and centers the view region on the device.
    pub async fn acquire_location(&self) -> Result<ViewRegion, NearbyError> {
        if self.location.request_permission().await == Permission::Denied {
            log::warn!("Location permission denied; nearby search is disabled");
            return Err(NearbyError::PermissionDenied);
        }

        let center = self
            .location
            .current_position()
            .await
            .map_err(|e| match e {
                LocationError::PermissionDenied => NearbyError::PermissionDenied,
                other => NearbyError::LocationUnavailable(other),
            })?;

        let region = ViewRegion::new(
            center,
            self.settings.view_span_deg,
            self.settings.view_span_deg,
        )?;

        let mut state = self.state.lock();
        state.region = Some(region);
        if state.phase == Phase::Idle {
            state.phase = Phase::LocationAcquired;
        }
        log::info!(
            "View region centered on ({}, {})",
            center.latitude,
            center.longitude
        );
        Ok(region)
    }

    /// Searches for `query` around the region center and keeps in-radius hits.
    ///
    /// Clears the previous results and route as soon as the request is issued.
    /// Returns [`NearbyError::NoResults`] when nothing lies within the radius
    /// and [`NearbyError::SearchUnavailable`] when the service call fails.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, NearbyError> {
        let query = query.trim();
        if query.is_empty() {
            log::debug!("Ignoring blank search query");
            return Ok(SearchOutcome::Skipped);
        }

        let (seq, center) = {
            let mut state = self.state.lock();
            let Some(region) = state.region else {
                log::debug!("No view region yet; search skipped");
                return Ok(SearchOutcome::Skipped);
            };
            state.search_seq += 1;
            state.places.clear();
            state.route = None;
            state.phase = Phase::Searching;
            (state.search_seq, region.center())
        };

        let request = SearchRequest {
            query: self.settings.service_query(query),
            bbox: BoundingBox::around(center, self.settings.search_half_span_deg),
            limit: self.settings.result_limit,
        };
        log::info!(
            "Searching \"{}\" near ({}, {})",
            request.query,
            center.latitude,
            center.longitude
        );

        let result = self.search.search(&request).await;

        let mut state = self.state.lock();
        if state.search_seq != seq {
            log::debug!("Dropping stale search #{} (latest #{})", seq, state.search_seq);
            return Ok(SearchOutcome::Superseded);
        }

        let hits = match result {
            Ok(hits) => hits,
            Err(e) => {
                log::error!("Place search failed for \"{}\": {}", query, e);
                state.phase = Phase::SearchFailed;
                return Err(NearbyError::SearchUnavailable(e));
            }
        };

        let total = hits.len();
        let nearby = filter_within_radius(center, hits, self.settings.radius_km);
        log::info!(
            "{} of {} places within {} km",
            nearby.len(),
            total,
            self.settings.radius_km
        );

        if nearby.is_empty() {
            state.phase = Phase::NoResults;
            return Err(NearbyError::NoResults {
                query: query.to_string(),
                radius_km: self.settings.radius_km,
            });
        }

        let count = nearby.len();
        state.places = nearby;
        state.phase = Phase::ResultsReady;
        Ok(SearchOutcome::Ready(count))
    }

    /// Fetches a driving route from the region center to `destination`.
    ///
    /// On failure the previously stored route, if any, is kept.
    pub async fn route(&self, destination: Coordinate) -> Result<RouteOutcome, NearbyError> {
        let (seq, search_seq, origin) = {
            let mut state = self.state.lock();
            let Some(region) = state.region else {
                log::debug!("No view region yet; routing skipped");
                return Ok(RouteOutcome::Skipped);
            };
            state.route_seq += 1;
            state.phase = Phase::Routing;
            (state.route_seq, state.search_seq, region.center())
        };

        let result = self.router.route(origin, destination).await;

        let mut state = self.state.lock();
        if state.route_seq != seq || state.search_seq != search_seq {
            log::debug!("Dropping stale route #{}", seq);
            return Ok(RouteOutcome::Superseded);
        }

        match result {
            Ok(response) => {
                let route = RouteResult::from_response(response);
                let eta_minutes = route.eta_minutes();
                log::info!(
                    "Route with {} points, {:.1} km, about {} min",
                    route.path.len(),
                    route.distance_km,
                    eta_minutes
                );
                state.route = Some(route);
                state.phase = Phase::RouteReady;
                Ok(RouteOutcome::Ready { eta_minutes })
            }
            Err(e) => {
                log::error!(
                    "Routing failed for ({}, {}) -> ({}, {}): {}",
                    origin.latitude,
                    origin.longitude,
                    destination.latitude,
                    destination.longitude,
                    e
                );
                state.phase = Phase::RouteFailed;
                Err(NearbyError::RouteUnavailable(e))
            }
        }
    }
}
