//! Itinerary aggregation
//!
//! Fans out to the weather, accommodation and attraction providers, adds the
//! locally synthesized activities and assembles one result. Each provider
//! already absorbs its own failures; a panic that still escapes one of them
//! is caught here and turned into a partial result.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, instrument};

use crate::accommodation::AccommodationProvider;
use crate::activities;
use crate::attractions::AttractionProvider;
use crate::config::{DataMode, PlannerConfig};
use crate::geocoding::{Geocoder, NominatimGeocoder};
use crate::http::build_client;
use crate::models::{Accommodation, Attraction, ItineraryResult, TravelRequest, WeatherInfo};
use crate::notify::{Notifier, TracingNotifier};
use crate::outcome::Outcome;
use crate::poi::{OverpassClient, PoiSource};
use crate::weather::{OpenMeteoClient, WeatherProvider, WeatherSource};

pub const WEATHER_FALLBACK_MESSAGE: &str = "Using estimated weather data";
pub const HOTELS_FALLBACK_MESSAGE: &str = "Using estimated hotel data";
pub const ATTRACTIONS_FALLBACK_MESSAGE: &str = "Using estimated attractions data";
pub const PARTIAL_DATA_MESSAGE: &str = "Error fetching some data. Showing available information.";

/// Provider results for one request
struct Sections {
    weather: Outcome<WeatherInfo>,
    hostels: Outcome<Vec<Accommodation>>,
    attractions: Outcome<Vec<Attraction>>,
}

impl Sections {
    fn any_fallback(&self) -> bool {
        self.weather.is_fallback() || self.hostels.is_fallback() || self.attractions.is_fallback()
    }
}

pub struct ItineraryService {
    weather: WeatherProvider,
    accommodations: AccommodationProvider,
    attractions: AttractionProvider,
    notifier: Arc<dyn Notifier>,
    mode: DataMode,
}

impl ItineraryService {
    pub fn new(
        weather: WeatherProvider,
        accommodations: AccommodationProvider,
        attractions: AttractionProvider,
        mode: DataMode,
    ) -> Self {
        Self {
            weather,
            accommodations,
            attractions,
            notifier: Arc::new(TracingNotifier),
            mode,
        }
    }

    /// Wire the providers to their external sources
    pub fn from_sources(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        poi: Arc<dyn PoiSource>,
        mode: DataMode,
    ) -> Self {
        Self::new(
            WeatherProvider::new(geocoder.clone(), weather),
            AccommodationProvider::new(geocoder.clone(), poi.clone()),
            AttractionProvider::new(geocoder, poi),
            mode,
        )
    }

    /// Build the service against the configured public APIs
    pub fn from_config(config: &PlannerConfig) -> crate::Result<Self> {
        let client = build_client(&config.http)?;
        Ok(Self::from_sources(
            Arc::new(NominatimGeocoder::new(client.clone(), &config.geocoding)),
            Arc::new(OpenMeteoClient::new(client.clone(), &config.weather)),
            Arc::new(OverpassClient::new(client, &config.poi)),
            config.itinerary.mode,
        ))
    }

    /// Replace the default notifier used by `fetch_itinerary_details`
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    /// Plan a trip, reporting progress to the service's notifier
    pub async fn fetch_itinerary_details(&self, request: &TravelRequest) -> ItineraryResult {
        self.plan(request, self.notifier.as_ref()).await
    }

    /// Plan a trip, reporting progress to `notifier`. Never fails: at worst
    /// the result carries only the request metadata and activities.
    #[instrument(skip(self, request, notifier), fields(destination = %request.destination, budget = %request.budget))]
    pub async fn plan(&self, request: &TravelRequest, notifier: &dyn Notifier) -> ItineraryResult {
        notifier.info(&format!(
            "Finding travel details for {}...",
            request.destination
        ));

        let gathered = AssertUnwindSafe(self.gather(request)).catch_unwind().await;
        let activities = activities::for_trip(&request.destination, request.budget, request.days);

        match gathered {
            Ok(sections) => {
                if sections.weather.is_fallback() {
                    notifier.warning(WEATHER_FALLBACK_MESSAGE);
                }
                if sections.hostels.is_fallback() {
                    notifier.warning(HOTELS_FALLBACK_MESSAGE);
                }
                if sections.attractions.is_fallback() {
                    notifier.warning(ATTRACTIONS_FALLBACK_MESSAGE);
                }

                if sections.any_fallback() {
                    notifier.success("Travel itinerary created with estimated data for some sections");
                } else {
                    notifier.success("Travel itinerary created with real data!");
                }

                info!(
                    weather = ?sections.weather.provenance(),
                    hostels = ?sections.hostels.provenance(),
                    attractions = ?sections.attractions.provenance(),
                    "Itinerary assembled for {}",
                    request.destination
                );

                ItineraryResult {
                    weather: Some(sections.weather.into_inner()),
                    hostels: Some(sections.hostels.into_inner()),
                    attractions: Some(sections.attractions.into_inner()),
                    ..ItineraryResult::partial(request, activities)
                }
            }
            Err(panic) => {
                error!(
                    "Itinerary providers aborted for {}: {}",
                    request.destination,
                    panic_message(panic.as_ref())
                );
                notifier.error(PARTIAL_DATA_MESSAGE);
                ItineraryResult::partial(request, activities)
            }
        }
    }

    async fn gather(&self, request: &TravelRequest) -> Sections {
        let destination = request.destination.as_str();
        match self.mode {
            DataMode::Live => {
                // joined in one task: dropping the request drops all three calls
                let (weather, hostels, attractions) = tokio::join!(
                    self.weather.get_weather(destination),
                    self.accommodations
                        .get_accommodations(destination, request.budget),
                    self.attractions.get_attractions(destination),
                );
                Sections {
                    weather,
                    hostels,
                    attractions,
                }
            }
            DataMode::Offline => Sections {
                weather: Outcome::Fallback(self.weather.estimate()),
                hostels: Outcome::Fallback(self.accommodations.estimate(destination, request.budget)),
                attractions: Outcome::Fallback(self.attractions.estimate(destination)),
            },
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
