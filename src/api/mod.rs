use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    ItineraryService,
    PlannerError,
    destination::suggest_destinations,
    models::{Budget, ItineraryResult, TravelRequest},
    notify::{Notification, RecordingNotifier},
};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ItineraryService>,
}

/// Form submission as received from the client. Every field is optional on
/// the wire so that missing values surface as validation errors.
#[derive(Debug, Deserialize)]
pub struct ApiTravelRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub days: ApiDays,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub travelers: String,
}

/// Trip length as sent by HTML forms (`"3"`) or JSON clients (`3`)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiDays {
    Count(u32),
    Text(String),
}

impl Default for ApiDays {
    fn default() -> Self {
        ApiDays::Count(0)
    }
}

impl ApiDays {
    fn count(&self) -> crate::Result<u32> {
        match self {
            ApiDays::Count(days) => Ok(*days),
            ApiDays::Text(text) => text.trim().parse().map_err(|_| {
                PlannerError::validation(format!("Trip length '{text}' is not a whole number of days"))
            }),
        }
    }
}

impl ApiTravelRequest {
    fn into_request(self) -> crate::Result<TravelRequest> {
        let days = self.days.count()?;
        let budget: Budget = self.budget.parse()?;
        TravelRequest::from_form(&self.destination, days, budget, &self.travelers)
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiItinerary {
    pub itinerary: ItineraryResult,
    pub notifications: Vec<Notification>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itinerary", post(create_itinerary))
        .route("/destinations", get(get_destinations))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}

async fn create_itinerary(
    State(state): State<AppState>,
    payload: Result<Json<ApiTravelRequest>, JsonRejection>,
) -> Result<Json<ApiItinerary>, (StatusCode, Json<ApiError>)> {
    let request = payload
        .map_err(|rejection| PlannerError::validation(rejection.body_text()))
        .and_then(|Json(payload)| payload.into_request())
        .map_err(bad_request)?;

    let notifier = RecordingNotifier::new();
    let itinerary = state.service.plan(&request, &notifier).await;

    Ok(Json(ApiItinerary {
        itinerary,
        notifications: notifier.take(),
    }))
}

fn bad_request(err: PlannerError) -> (StatusCode, Json<ApiError>) {
    warn!("Rejected itinerary request: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: err.user_message(),
        }),
    )
}

async fn get_destinations(Query(query): Query<SuggestionQuery>) -> Json<Vec<&'static str>> {
    Json(suggest_destinations(&query.q))
}
