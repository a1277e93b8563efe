//! Open-Meteo current-conditions client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{CurrentConditions, WeatherSource};
use crate::config::WeatherConfig;
use crate::http::check_status;
use crate::models::GeoPoint;
use crate::{PlannerError, Result};

pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// Subset of the forecast response we request
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    #[serde(rename = "temperature_2m")]
    temperature: Option<f64>,
    weather_code: Option<u16>,
}

impl OpenMeteoClient {
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self::with_base_url(client, &config.base_url)
    }

    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ForecastResponse {
    fn into_conditions(self) -> Result<CurrentConditions> {
        let current = self
            .current
            .ok_or_else(|| PlannerError::shape("Weather response has no `current` block"))?;
        let temperature_celsius = current
            .temperature
            .ok_or_else(|| PlannerError::shape("Weather response has no temperature"))?;
        Ok(CurrentConditions {
            temperature_celsius,
            weather_code: current.weather_code,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(name = "current_weather", skip(self), fields(lat = point.latitude, lon = point.longitude))]
    async fn current_conditions(&self, point: &GeoPoint) -> Result<CurrentConditions> {
        let url = format!("{}/forecast", self.base_url);
        debug!("Requesting current weather from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", point.latitude.to_string()),
                ("longitude", point.longitude.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let forecast: ForecastResponse = check_status(response, "Weather")?.json().await?;
        forecast.into_conditions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_block() {
        let json = r#"{"latitude":26.9,"longitude":75.8,"current":{"time":"2024-05-01T12:00","temperature_2m":38.4,"weather_code":1}}"#;
        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        let conditions = response.into_conditions().unwrap();
        assert_eq!(conditions.temperature_celsius, 38.4);
        assert_eq!(conditions.weather_code, Some(1));
    }

    #[test]
    fn test_missing_current_is_shape_error() {
        let response: ForecastResponse = serde_json::from_str(r#"{"latitude":26.9}"#).unwrap();
        assert!(matches!(
            response.into_conditions(),
            Err(PlannerError::Shape { .. })
        ));
    }

    #[test]
    fn test_missing_temperature_is_shape_error() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"current":{"weather_code":3}}"#).unwrap();
        assert!(response.into_conditions().is_err());
    }
}
