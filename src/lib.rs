//! Yatra - travel itinerary planning for destinations across India
//!
//! This library combines geocoding, current weather, nearby lodging and
//! attractions into a single itinerary, synthesizing any section whose
//! external source is unavailable.

pub mod accommodation;
pub mod activities;
pub mod api;
pub mod attractions;
pub mod config;
pub mod destination;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod itinerary;
pub mod models;
pub mod notify;
pub mod outcome;
pub mod poi;
pub mod sampling;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::{DataMode, PlannerConfig};
pub use error::PlannerError;
pub use itinerary::ItineraryService;
pub use models::{
    Accommodation, Attraction, Budget, GeoPoint, ItineraryResult, TravelRequest, WeatherIcon,
    WeatherInfo,
};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use outcome::{Outcome, Provenance};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
