//! Destination geocoding
//!
//! Resolves free-text destination names into coordinates using a
//! Nominatim-compatible search API, restricted to a fixed country filter.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::http::check_status;
use crate::models::GeoPoint;
use crate::{PlannerError, Result};

/// Resolves a destination name to a single point
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the first candidate. Fails with `NotFound` when the lookup
    /// has no matches.
    async fn resolve(&self, query: &str) -> Result<GeoPoint>;
}

/// Geocoder backed by the Nominatim search endpoint
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    country_codes: String,
}

/// One search hit; Nominatim encodes coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn to_geo_point(&self) -> Result<GeoPoint> {
        let latitude = self
            .lat
            .trim()
            .parse::<f64>()
            .map_err(|_| PlannerError::shape(format!("Invalid latitude '{}'", self.lat)))?;
        let longitude = self
            .lon
            .trim()
            .parse::<f64>()
            .map_err(|_| PlannerError::shape(format!("Invalid longitude '{}'", self.lon)))?;
        Ok(GeoPoint::new(latitude, longitude))
    }
}

impl NominatimGeocoder {
    pub fn new(client: Client, config: &GeocodingConfig) -> Self {
        Self::with_base_url(client, &config.base_url, &config.country_codes)
    }

    pub fn with_base_url(client: Client, base_url: &str, country_codes: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country_codes: country_codes.to_string(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(name = "geocode", skip(self))]
    async fn resolve(&self, query: &str) -> Result<GeoPoint> {
        let url = format!("{}/search", self.base_url);
        debug!("Geocoding '{}' via {}", query, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("countrycodes", self.country_codes.as_str()),
            ])
            .header(ACCEPT_LANGUAGE, "en")
            .send()
            .await?;

        let places: Vec<NominatimPlace> = check_status(response, "Geocoding")?.json().await?;

        // first candidate wins; no ranking
        let place = places
            .first()
            .ok_or_else(|| PlannerError::not_found(format!("Location not found: {query}")))?;
        let point = place.to_geo_point()?;

        debug!(
            "Resolved '{}' to {} ({})",
            query,
            point.format_coordinates(),
            place.display_name.as_deref().unwrap_or("unnamed")
        );
        Ok(point)
    }
}
