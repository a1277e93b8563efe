//! Data models for the itinerary planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: Resolved geographic coordinates
//! - Weather: Normalized current conditions
//! - Lodging: Accommodation suggestions
//! - Attraction: Points of interest worth visiting
//! - Itinerary: The request and the assembled result

pub mod attraction;
pub mod itinerary;
pub mod location;
pub mod lodging;
pub mod weather;

// Re-export all public types for convenient access
pub use attraction::Attraction;
pub use itinerary::{Budget, ItineraryResult, TravelRequest};
pub use location::GeoPoint;
pub use lodging::Accommodation;
pub use weather::{WeatherIcon, WeatherInfo};
