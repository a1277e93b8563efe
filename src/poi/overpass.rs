//! Overpass API client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{PoiElement, PoiQuery, PoiSource};
use crate::config::PoiConfig;
use crate::http::check_status;
use crate::{PlannerError, Result};

pub struct OverpassClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Option<Vec<PoiElement>>,
}

impl OverpassClient {
    pub fn new(client: Client, config: &PoiConfig) -> Self {
        Self::with_base_url(client, &config.base_url)
    }

    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PoiSource for OverpassClient {
    #[instrument(name = "poi_search", skip(self, query), fields(radius_m = query.radius_m))]
    async fn search(&self, query: &PoiQuery) -> Result<Vec<PoiElement>> {
        let url = format!("{}/interpreter", self.base_url);
        let body = query.to_overpass_ql();
        debug!("Overpass query:\n{}", body);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let parsed: OverpassResponse = check_status(response, "Points-of-interest")?.json().await?;
        let elements = parsed
            .elements
            .ok_or_else(|| PlannerError::shape("Overpass response has no `elements` array"))?;

        debug!("Overpass returned {} elements", elements.len());
        Ok(elements)
    }
}
