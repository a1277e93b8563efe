//! Travel request and the assembled itinerary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Accommodation, Attraction, WeatherInfo};
use crate::destination::format_destination;
use crate::error::PlannerError;

/// Spending tier; governs price bands, search radii and activity picks
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Cheap,
    #[default]
    Moderate,
    Luxury,
}

impl Budget {
    pub const ALL: [Budget; 3] = [Budget::Cheap, Budget::Moderate, Budget::Luxury];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Cheap => "cheap",
            Budget::Moderate => "moderate",
            Budget::Luxury => "luxury",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Budget {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheap" => Ok(Budget::Cheap),
            "moderate" => Ok(Budget::Moderate),
            "luxury" => Ok(Budget::Luxury),
            other => Err(PlannerError::validation(format!(
                "Unknown budget tier '{other}'. Must be one of: cheap, moderate, luxury"
            ))),
        }
    }
}

/// A submitted trip request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TravelRequest {
    /// Free-text destination, country qualified (e.g. "Jaipur, India")
    pub destination: String,
    /// Trip length in days
    pub days: u32,
    pub budget: Budget,
    /// Traveller category (solo, couple, family, ...)
    pub travelers: String,
}

impl TravelRequest {
    #[must_use]
    pub fn new(
        destination: impl Into<String>,
        days: u32,
        budget: Budget,
        travelers: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            days,
            budget,
            travelers: travelers.into(),
        }
    }

    /// Build a request from user input: validated as typed, then the
    /// destination is country qualified. Used by every inbound surface.
    pub fn from_form(destination: &str, days: u32, budget: Budget, travelers: &str) -> crate::Result<Self> {
        Self::new(destination, days, budget, travelers.trim()).validate()?;
        let request = Self::new(format_destination(destination), days, budget, travelers.trim());
        request.validate()?;
        Ok(request)
    }

    /// Reject requests with missing fields before they reach the planner
    pub fn validate(&self) -> crate::Result<()> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::validation("Destination cannot be empty"));
        }
        if self.days == 0 {
            return Err(PlannerError::validation(
                "Trip length must be at least one day",
            ));
        }
        if self.travelers.trim().is_empty() {
            return Err(PlannerError::validation("Travelers cannot be empty"));
        }
        Ok(())
    }
}

/// Composite itinerary handed to the presentation layer.
///
/// Weather, hostels and attractions are all absent in a partial result.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryResult {
    pub destination: String,
    pub days: u32,
    pub budget: Budget,
    pub travelers: String,
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attractions: Option<Vec<Attraction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostels: Option<Vec<Accommodation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherInfo>,
}

impl ItineraryResult {
    /// Request metadata and activities only
    #[must_use]
    pub fn partial(request: &TravelRequest, activities: Vec<String>) -> Self {
        Self {
            destination: request.destination.clone(),
            days: request.days,
            budget: request.budget,
            travelers: request.travelers.clone(),
            activities,
            attractions: None,
            hostels: None,
            weather: None,
        }
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.weather.is_none() && self.hostels.is_none() && self.attractions.is_none()
    }
}

impl fmt::Display for ItineraryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your customized itinerary for {}", self.destination)?;
        writeln!(
            f,
            "   📅 {} days · {} budget · traveling {}",
            self.days,
            self.budget,
            self.travelers.replace('-', " ")
        )?;

        if let Some(weather) = &self.weather {
            writeln!(
                f,
                "   🌤️ {} · {}",
                weather.format_temperature(),
                weather.condition
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Suggested activities:")?;
        for activity in &self.activities {
            writeln!(f, "   - {activity}")?;
        }

        if let Some(hostels) = self.hostels.as_ref().filter(|h| !h.is_empty()) {
            writeln!(f)?;
            writeln!(f, "Recommended accommodations:")?;
            for hostel in hostels {
                writeln!(
                    f,
                    "   🏨 {} ({:.1}) {}",
                    hostel.name,
                    hostel.rating,
                    hostel.format_price()
                )?;
            }
        }

        if let Some(attractions) = self.attractions.as_ref().filter(|a| !a.is_empty()) {
            let place = self
                .destination
                .split(',')
                .next()
                .unwrap_or(&self.destination)
                .trim();
            writeln!(f)?;
            writeln!(f, "Top attractions in {place}:")?;
            for attraction in attractions {
                writeln!(f, "   🗺️ {} ({:.1})", attraction.name, attraction.rating)?;
                writeln!(f, "      {}", attraction.description)?;
            }
        }
        Ok(())
    }
}
