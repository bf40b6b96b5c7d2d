use reqwest::header::USER_AGENT;
use reqwest::{Client, Request};

use crate::sdk::config::ServiceConfig;
use crate::sdk::routing::error::ServiceError;
use crate::sdk::routing::place::{PlaceHit, SearchRequest};
use crate::sdk::routing::service::{BoxFuture, PlaceSearch};
use crate::sdk::util::rate_limit::{nominatim_limiter, Limiter};

/// Place search against an OpenStreetMap Nominatim instance.
pub struct NominatimSearch {
    client: Client,
    base_url: String,
    user_agent: String,
    limiter: Limiter,
}

impl NominatimSearch {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            base_url: config.nominatim_url.clone(),
            user_agent: config.user_agent.clone(),
            limiter: nominatim_limiter(),
        })
    }

    fn build_request(&self, request: &SearchRequest) -> Result<Request, ServiceError> {
        let url = format!("{}/search", self.base_url);
        let limit = request.limit.to_string();
        let viewbox = request.bbox.to_viewbox();
        Ok(self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("q", request.query.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
                ("viewbox", viewbox.as_str()),
            ])
            .build()?)
    }

    async fn fetch(&self, request: &SearchRequest) -> Result<Vec<PlaceHit>, ServiceError> {
        let http_request = self.build_request(request)?;
        let url = http_request.url().to_string();

        self.limiter.until_ready().await;
        log::debug!("[PROVIDER] Calling nominatim search for \"{}\"", request.query);

        let response = self.client.execute(http_request).await.map_err(|e| {
            log::error!("Failed to send search request. URL: {}\nError: {}", url, e);
            e
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::error!(
                "Nominatim returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(ServiceError::HttpStatus {
                service: "nominatim",
                status: status.as_u16(),
            });
        }

        let hits: Vec<PlaceHit> = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse search response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        log::debug!("[PROVIDER] nominatim returned {} hits", hits.len());
        Ok(hits)
    }
}

impl PlaceSearch for NominatimSearch {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<Vec<PlaceHit>, ServiceError>> {
        Box::pin(self.fetch(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::geo::{BoundingBox, Coordinate};

    #[tokio::test]
    async fn request_carries_query_and_viewbox() {
        let config = ServiceConfig {
            nominatim_url: "http://nominatim.test".to_string(),
            ..ServiceConfig::default()
        };
        let search = NominatimSearch::new(&config).unwrap();
        let request = search
            .build_request(&SearchRequest {
                query: "phở bò restaurant".to_string(),
                bbox: BoundingBox::around(Coordinate::new(10.5, 106.5), 0.5),
                limit: 20,
            })
            .unwrap();

        let url = request.url();
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("q".into(), "phở bò restaurant".into())));
        assert!(pairs.contains(&("format".into(), "json".into())));
        assert!(pairs.contains(&("limit".into(), "20".into())));
        assert!(pairs.contains(&("viewbox".into(), "106,11,107,10".into())));
        assert_eq!(
            request.headers().get(USER_AGENT).unwrap(),
            config.user_agent.as_str()
        );
    }

    #[test]
    fn hits_parse_from_nominatim_json() {
        let body = r#"[
            {"place_id": 1, "lat": "10.7769", "lon": "106.7009",
             "display_name": "Phở Hòa, Pasteur, Quận 3", "address": {"road": "Pasteur"}},
            {"place_id": 2, "lat": "10.78", "lon": "106.69", "display_name": "Bún chả"}
        ]"#;
        let hits: Vec<PlaceHit> = serde_json::from_str(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].lat, "10.7769");
        assert_eq!(
            hits[0].coordinate(),
            Some(Coordinate::new(10.7769, 106.7009))
        );
    }
}
