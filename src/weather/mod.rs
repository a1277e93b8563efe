//! Current weather for a destination
//!
//! Resolves the destination, asks the weather source for current conditions
//! and normalizes them. Any failure along the way yields an estimated record
//! instead of an error.

use std::sync::Arc;

use async_trait::async_trait;
use rand::RngExt;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::geocoding::Geocoder;
use crate::models::{GeoPoint, WeatherIcon, WeatherInfo};
use crate::outcome::Outcome;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Raw observation from a weather source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    /// WMO weather code, when the source reported one
    pub weather_code: Option<u16>,
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_conditions(&self, point: &GeoPoint) -> Result<CurrentConditions>;
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

impl From<CurrentConditions> for WeatherInfo {
    fn from(conditions: CurrentConditions) -> Self {
        let (condition, icon) = match conditions.weather_code {
            Some(code) => (weather_code_to_description(code), WeatherIcon::for_code(code)),
            None => ("Unknown", WeatherIcon::default()),
        };
        WeatherInfo {
            temperature_celsius: conditions.temperature_celsius,
            condition: condition.to_string(),
            icon,
            is_estimated: false,
        }
    }
}

/// Synthetic weather typical of the Indian plains: whole degrees in 25..40
pub fn estimated_weather<R: RngExt>(rng: &mut R) -> WeatherInfo {
    let temperature: u8 = rng.random_range(25..40);
    WeatherInfo::estimated(f64::from(temperature))
}

pub struct WeatherProvider {
    geocoder: Arc<dyn Geocoder>,
    source: Arc<dyn WeatherSource>,
}

impl WeatherProvider {
    pub fn new(geocoder: Arc<dyn Geocoder>, source: Arc<dyn WeatherSource>) -> Self {
        Self { geocoder, source }
    }

    /// Current weather at the destination; never fails
    #[instrument(skip(self))]
    pub async fn get_weather(&self, destination: &str) -> Outcome<WeatherInfo> {
        match self.fetch_live(destination).await {
            Ok(weather) => {
                info!(
                    "Weather for {}: {} ({})",
                    destination,
                    weather.format_temperature(),
                    weather.condition
                );
                Outcome::Fetched(weather)
            }
            Err(err) => {
                warn!(
                    recoverable = err.is_recoverable(),
                    "Weather lookup for {} failed, estimating: {}",
                    destination,
                    err
                );
                Outcome::Fallback(self.estimate())
            }
        }
    }

    /// Synthesized record used whenever live weather is unavailable
    pub fn estimate(&self) -> WeatherInfo {
        estimated_weather(&mut rand::rng())
    }

    async fn fetch_live(&self, destination: &str) -> Result<WeatherInfo> {
        let point = self.geocoder.resolve(destination).await?;
        let conditions = self.source.current_conditions(&point).await?;
        Ok(conditions.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlannerError;
    use crate::models::weather::NO_DATA_CONDITION;
    use rstest::rstest;

    struct FixedGeocoder(Option<GeoPoint>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, query: &str) -> Result<GeoPoint> {
            self.0
                .ok_or_else(|| PlannerError::not_found(format!("Location not found: {query}")))
        }
    }

    struct FixedWeather(Option<CurrentConditions>);

    #[async_trait]
    impl WeatherSource for FixedWeather {
        async fn current_conditions(&self, _point: &GeoPoint) -> Result<CurrentConditions> {
            self.0
                .ok_or_else(|| PlannerError::transport("Weather request failed with status 503"))
        }
    }

    fn provider(point: Option<GeoPoint>, conditions: Option<CurrentConditions>) -> WeatherProvider {
        WeatherProvider::new(
            Arc::new(FixedGeocoder(point)),
            Arc::new(FixedWeather(conditions)),
        )
    }

    fn jaipur() -> Option<GeoPoint> {
        Some(GeoPoint::new(26.91, 75.79))
    }

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(3, "Overcast")]
    #[case(48, "Depositing rime fog")]
    #[case(82, "Violent rain showers")]
    #[case(99, "Thunderstorm with heavy hail")]
    #[case(42, "Unknown")]
    fn test_weather_code_descriptions(#[case] code: u16, #[case] expected: &str) {
        assert_eq!(weather_code_to_description(code), expected);
    }

    #[test]
    fn test_missing_code_maps_to_unknown_with_default_icon() {
        let info: WeatherInfo = CurrentConditions {
            temperature_celsius: 21.0,
            weather_code: None,
        }
        .into();
        assert_eq!(info.condition, "Unknown");
        assert_eq!(info.icon, WeatherIcon::Sun);
        assert!(!info.is_estimated);
    }

    #[test]
    fn test_estimated_weather_range() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let weather = estimated_weather(&mut rng);
            assert!((25.0..40.0).contains(&weather.temperature_celsius));
            assert_eq!(weather.temperature_celsius.fract(), 0.0);
            assert_eq!(weather.condition, NO_DATA_CONDITION);
        }
    }

    #[tokio::test]
    async fn test_live_weather() {
        let provider = provider(
            jaipur(),
            Some(CurrentConditions {
                temperature_celsius: 34.2,
                weather_code: Some(61),
            }),
        );

        let outcome = provider.get_weather("Jaipur, India").await;
        assert!(!outcome.is_fallback());
        let weather = outcome.into_inner();
        assert_eq!(weather.temperature_celsius, 34.2);
        assert_eq!(weather.condition, "Slight rain");
        assert_eq!(weather.icon, WeatherIcon::CloudRain);
        assert!(!weather.is_estimated);
    }

    #[tokio::test]
    async fn test_geocoder_failure_falls_back() {
        let outcome = provider(None, None).get_weather("Atlantis, India").await;
        assert!(outcome.is_fallback());
        let weather = outcome.into_inner();
        assert!(weather.is_estimated);
        assert!((25.0..40.0).contains(&weather.temperature_celsius));
    }

    #[tokio::test]
    async fn test_weather_endpoint_failure_falls_back() {
        let outcome = provider(jaipur(), None).get_weather("Jaipur, India").await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.value().condition, NO_DATA_CONDITION);
        assert_eq!(outcome.value().icon, WeatherIcon::Cloud);
    }
}
