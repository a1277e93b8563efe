//! Weather model and display methods

use std::fmt;

use serde::{Deserialize, Serialize};

/// Condition label used when no live observation could be obtained
pub const NO_DATA_CONDITION: &str = "No data available";

/// Icon vocabulary understood by the presentation layer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    #[default]
    Sun,
    Cloud,
    CloudFog,
    CloudRain,
    CloudSnow,
    CloudLightning,
}

impl WeatherIcon {
    /// Map a WMO weather code to an icon. Codes outside the known ranges
    /// get the default icon.
    #[must_use]
    pub fn for_code(code: u16) -> Self {
        match code {
            0 => WeatherIcon::Sun,
            1..=3 => WeatherIcon::Cloud,
            45..=48 => WeatherIcon::CloudFog,
            51..=67 | 80..=82 => WeatherIcon::CloudRain,
            71..=77 | 85..=86 => WeatherIcon::CloudSnow,
            95..=u16::MAX => WeatherIcon::CloudLightning,
            _ => WeatherIcon::default(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "sun",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::CloudFog => "cloud-fog",
            WeatherIcon::CloudRain => "cloud-rain",
            WeatherIcon::CloudSnow => "cloud-snow",
            WeatherIcon::CloudLightning => "cloud-lightning",
        }
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions at a destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherInfo {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// Icon key for the condition
    pub icon: WeatherIcon,
    /// Set when the record was synthesized instead of observed
    pub is_estimated: bool,
}

impl WeatherInfo {
    /// Synthetic record used when live weather is unavailable
    #[must_use]
    pub fn estimated(temperature_celsius: f64) -> Self {
        Self {
            temperature_celsius,
            condition: NO_DATA_CONDITION.to_string(),
            icon: WeatherIcon::Cloud,
            is_estimated: true,
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, WeatherIcon::Sun)]
    #[case(2, WeatherIcon::Cloud)]
    #[case(45, WeatherIcon::CloudFog)]
    #[case(55, WeatherIcon::CloudRain)]
    #[case(81, WeatherIcon::CloudRain)]
    #[case(73, WeatherIcon::CloudSnow)]
    #[case(86, WeatherIcon::CloudSnow)]
    #[case(96, WeatherIcon::CloudLightning)]
    #[case(10, WeatherIcon::Sun)]
    fn test_icon_for_code(#[case] code: u16, #[case] expected: WeatherIcon) {
        assert_eq!(WeatherIcon::for_code(code), expected);
    }

    #[test]
    fn test_icon_serializes_as_kebab_case() {
        let json = serde_json::to_string(&WeatherIcon::CloudLightning).unwrap();
        assert_eq!(json, "\"cloud-lightning\"");
        assert_eq!(WeatherIcon::CloudFog.to_string(), "cloud-fog");
    }

    #[test]
    fn test_estimated_record() {
        let weather = WeatherInfo::estimated(31.0);
        assert_eq!(weather.condition, NO_DATA_CONDITION);
        assert_eq!(weather.icon, WeatherIcon::Cloud);
        assert!(weather.is_estimated);
        assert_eq!(weather.format_temperature(), "31.0°C");
    }
}
