//! Accommodation suggestions
//!
//! Lodging nodes near the destination are priced from the budget tier and
//! their star rating. When the lookup fails or finds nothing named, five
//! plausible hotels are synthesized instead. A single call never mixes the
//! two sources.

use std::sync::Arc;

use rand::RngExt;
use tracing::{info, instrument, warn};

use crate::geocoding::Geocoder;
use crate::models::{Accommodation, Budget};
use crate::outcome::Outcome;
use crate::poi::{PoiElement, PoiQuery, PoiSource, TagFilter, named_only};
use crate::sampling::sample_rating;
use crate::{PlannerError, Result};

pub const MAX_ACCOMMODATIONS: usize = 5;
pub const RUPEE: &str = "₹";

const RAW_CANDIDATE_LIMIT: usize = 10;
const MIN_NIGHTLY_PRICE: f64 = 800.0;
const PRICE_JITTER: f64 = 250.0;

const LODGING_FILTERS: [TagFilter; 3] = [
    TagFilter::Equals("tourism", "hotel"),
    TagFilter::Equals("tourism", "hostel"),
    TagFilter::Equals("tourism", "guest_house"),
];

const FALLBACK_NAME_TEMPLATES: [&str; MAX_ACCOMMODATIONS] = [
    "{d} Heritage Inn",
    "{d} Royal Palace",
    "{d} Comfort Stay",
    "Hotel {d} Grand",
    "{d} Traveller's Paradise",
];

/// Search radius around the destination, in metres
#[must_use]
pub fn search_radius_m(budget: Budget) -> u32 {
    match budget {
        Budget::Cheap => 5_000,
        Budget::Moderate => 10_000,
        Budget::Luxury => 15_000,
    }
}

/// Nightly base price before star scaling and jitter
#[must_use]
pub fn base_price(budget: Budget) -> f64 {
    match budget {
        Budget::Cheap => 1_500.0,
        Budget::Moderate => 3_000.0,
        Budget::Luxury => 6_000.0,
    }
}

/// `[min, max)` nightly price band for synthesized hotels
#[must_use]
pub fn price_band(budget: Budget) -> (u32, u32) {
    match budget {
        Budget::Cheap => (800, 2_000),
        Budget::Moderate => (2_000, 5_000),
        Budget::Luxury => (5_000, 15_000),
    }
}

/// Leading numeric part of a `stars` tag ("4", "3.5", "4S")
fn parse_stars(raw: &str) -> Option<f64> {
    let numeric: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f64>().ok().filter(|stars| stars.is_finite())
}

/// Base price scaled by whole stars / 2, jittered, floored and clamped
pub fn nightly_price<R: RngExt>(budget: Budget, stars: Option<f64>, rng: &mut R) -> u32 {
    let base = match stars {
        Some(stars) => base_price(budget) * (stars.trunc() / 2.0),
        None => base_price(budget),
    };
    let jitter = rng.random_range(-PRICE_JITTER..PRICE_JITTER);
    let price = (base + jitter).floor().max(MIN_NIGHTLY_PRICE);
    // bounded below by the clamp; float-to-int `as` saturates above
    price as u32
}

/// Stars on the 5-point scale when known, otherwise a plausible guess
pub fn lodging_rating<R: RngExt>(stars: Option<f64>, rng: &mut R) -> f64 {
    match stars {
        Some(stars) => (stars / 5.0 * 5.0).clamp(0.0, 5.0),
        None => sample_rating(rng, 3.5, 5.0),
    }
}

/// Price and rate up to five named candidates, in the order given
pub fn price_candidates<R: RngExt>(
    candidates: &[PoiElement],
    destination: &str,
    budget: Budget,
    rng: &mut R,
) -> Vec<Accommodation> {
    candidates
        .iter()
        .take(MAX_ACCOMMODATIONS)
        .enumerate()
        .map(|(index, candidate)| {
            let stars = candidate.tag("stars").and_then(parse_stars);
            let name = candidate
                .name()
                .map_or_else(|| format!("Accommodation in {destination}"), str::to_string);
            let image_url = format!(
                "https://source.unsplash.com/featured/?india,hotel,{}&sig={index}",
                urlencoding::encode(&name)
            );
            Accommodation {
                price_per_night: nightly_price(budget, stars, rng),
                rating: lodging_rating(stars, rng),
                currency: RUPEE.to_string(),
                image_url,
                name,
            }
        })
        .collect()
}

/// Five synthesized hotels priced within the tier's band
pub fn synthesize_accommodations<R: RngExt>(
    destination: &str,
    budget: Budget,
    rng: &mut R,
) -> Vec<Accommodation> {
    let (min, max) = price_band(budget);
    FALLBACK_NAME_TEMPLATES
        .iter()
        .enumerate()
        .map(|(index, template)| Accommodation {
            name: template.replace("{d}", destination),
            rating: sample_rating(rng, 3.5, 5.0),
            price_per_night: rng.random_range(min..max),
            currency: RUPEE.to_string(),
            image_url: format!("https://source.unsplash.com/featured/?india,hotel&sig={index}"),
        })
        .collect()
}

pub struct AccommodationProvider {
    geocoder: Arc<dyn Geocoder>,
    poi: Arc<dyn PoiSource>,
}

impl AccommodationProvider {
    pub fn new(geocoder: Arc<dyn Geocoder>, poi: Arc<dyn PoiSource>) -> Self {
        Self { geocoder, poi }
    }

    /// Lodging suggestions for the destination; never fails and never empty
    #[instrument(skip(self))]
    pub async fn get_accommodations(
        &self,
        destination: &str,
        budget: Budget,
    ) -> Outcome<Vec<Accommodation>> {
        match self.find_candidates(destination, budget).await {
            Ok(candidates) => {
                let hostels = price_candidates(&candidates, destination, budget, &mut rand::rng());
                info!("Found {} accommodations near {}", hostels.len(), destination);
                Outcome::Fetched(hostels)
            }
            Err(err) => {
                warn!(
                    recoverable = err.is_recoverable(),
                    "Accommodation lookup for {} failed, synthesizing: {}",
                    destination, err
                );
                Outcome::Fallback(self.estimate(destination, budget))
            }
        }
    }

    pub fn estimate(&self, destination: &str, budget: Budget) -> Vec<Accommodation> {
        synthesize_accommodations(destination, budget, &mut rand::rng())
    }

    async fn find_candidates(&self, destination: &str, budget: Budget) -> Result<Vec<PoiElement>> {
        let center = self.geocoder.resolve(destination).await?;
        let query = PoiQuery {
            center,
            radius_m: search_radius_m(budget),
            filters: LODGING_FILTERS.to_vec(),
            limit: RAW_CANDIDATE_LIMIT,
        };

        let named = named_only(self.poi.search(&query).await?);
        if named.is_empty() {
            return Err(PlannerError::not_found(format!(
                "No accommodations found near {destination}"
            )));
        }
        Ok(named)
    }
}
