use super::types::OsrmResponse;
use crate::sdk::config::ServiceConfig;
use crate::sdk::geo::Coordinate;
use crate::sdk::routing::error::ServiceError;
use crate::sdk::routing::route::RouteResponse;
use crate::sdk::routing::service::{BoxFuture, Router};
use crate::sdk::util::rate_limit::{per_minute_limiter, Limiter};
use reqwest::header::USER_AGENT;
use reqwest::{Client, Request};

/// Driving directions from an OSRM `route` service.
pub struct OsrmRouter {
    client: Client,
    base_url: String,
    user_agent: String,
    limiter: Limiter,
}

impl OsrmRouter {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            base_url: config.osrm_url.clone(),
            user_agent: config.user_agent.clone(),
            limiter: per_minute_limiter(config.osrm_requests_per_minute),
        })
    }

    fn build_request(&self, start: Coordinate, end: Coordinate) -> Result<Request, ServiceError> {
        // OSRM wants lon,lat
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, start.longitude, start.latitude, end.longitude, end.latitude
        );
        Ok(self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .build()?)
    }

    async fn get_directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteResponse, ServiceError> {
        let request = self.build_request(start, end)?;
        let url = request.url().to_string();

        self.limiter.until_ready().await;
        log::debug!(
            "[PROVIDER] Calling osrm get_directions for {:?} -> {:?}",
            start,
            end
        );

        let response = match self.client.execute(request).await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send route request. URL: {}\nError: {}", url, e);
                return Err(ServiceError::RequestError(e));
            }
        };

        let status = response.status();
        let text = response.text().await?;
        parse_route(status.as_u16(), &text).map_err(|e| {
            log::error!("Routing failed. URL: {}\nError: {}. Body: {}", url, e, text);
            e
        })
    }
}

/// Maps an OSRM reply onto a route, whatever the HTTP status was.
pub fn parse_route(status: u16, body: &str) -> Result<RouteResponse, ServiceError> {
    // OSRM answers 400 with a JSON `code`/`message`; prefer that over the bare status
    let parsed = match serde_json::from_str::<OsrmResponse>(body) {
        Ok(parsed) => parsed,
        Err(e) if (200..300).contains(&status) => return Err(ServiceError::ParseError(e)),
        Err(_) => {
            return Err(ServiceError::HttpStatus {
                service: "osrm",
                status,
            })
        }
    };

    if parsed.code != "Ok" {
        return Err(ServiceError::ApiError {
            message: parsed.message.unwrap_or_else(|| parsed.code.clone()),
            code: parsed.code,
        });
    }

    let route = parsed.routes.into_iter().next().ok_or(ServiceError::NoRoute)?;
    Ok(RouteResponse {
        geometry: route.geometry.coordinates,
        duration_seconds: route.duration,
        distance_meters: route.distance,
    })
}

impl Router for OsrmRouter {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> BoxFuture<'_, Result<RouteResponse, ServiceError>> {
        Box::pin(self.get_directions(origin, destination))
    }
}
