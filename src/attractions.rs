//! Attraction suggestions
//!
//! Sights within 15 km of the destination, described from their tags. When
//! none can be found a themed set of temples, forts, nature spots and
//! cultural venues is synthesized.

use std::sync::Arc;

use rand::RngExt;
use tracing::{info, instrument, warn};

use crate::geocoding::Geocoder;
use crate::models::Attraction;
use crate::outcome::Outcome;
use crate::poi::{PoiElement, PoiQuery, PoiSource, TagFilter, named_only};
use crate::sampling::sample_rating;
use crate::{PlannerError, Result};

pub const MAX_ATTRACTIONS: usize = 5;

const SEARCH_RADIUS_M: u32 = 15_000;
const RAW_CANDIDATE_LIMIT: usize = 10;
const MIN_RATING: f64 = 4.0;
const MAX_RATING: f64 = 5.0;

const ATTRACTION_FILTERS: [TagFilter; 6] = [
    TagFilter::Equals("tourism", "attraction"),
    TagFilter::Exists("historic"),
    TagFilter::Equals("tourism", "museum"),
    TagFilter::Equals("leisure", "park"),
    TagFilter::Equals("tourism", "viewpoint"),
    TagFilter::Equals("amenity", "place_of_worship"),
];

/// Themes used for synthesized attractions, in the order they are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractionTheme {
    Temple,
    Fort,
    Nature,
    Culture,
}

impl AttractionTheme {
    pub const ALL: [AttractionTheme; 4] = [
        AttractionTheme::Temple,
        AttractionTheme::Fort,
        AttractionTheme::Nature,
        AttractionTheme::Culture,
    ];

    fn name_templates(self) -> [&'static str; 3] {
        match self {
            AttractionTheme::Temple => [
                "{d} Ancient Temple",
                "Sri {d} Temple",
                "{d} Sacred Shrine",
            ],
            AttractionTheme::Fort => ["{d} Fort", "{d} Palace", "Historic {d} Fortress"],
            AttractionTheme::Nature => ["{d} Gardens", "{d} Lake", "{d} National Park"],
            AttractionTheme::Culture => [
                "{d} Museum",
                "{d} Heritage Center",
                "{d} Cultural Complex",
            ],
        }
    }

    fn description_template(self) -> &'static str {
        match self {
            AttractionTheme::Temple => {
                "A sacred religious site in {d}, known for its intricate architecture and spiritual significance."
            }
            AttractionTheme::Fort => {
                "A magnificent historical fort in {d}, showcasing ancient military architecture and royal heritage."
            }
            AttractionTheme::Nature => {
                "A beautiful natural area in {d}, perfect for experiencing the local biodiversity and landscapes."
            }
            AttractionTheme::Culture => {
                "An important cultural landmark in {d}, offering insights into the rich heritage of the region."
            }
        }
    }

    /// Attraction names for this theme at `destination`
    #[must_use]
    pub fn names(self, destination: &str) -> Vec<String> {
        self.name_templates()
            .iter()
            .map(|template| template.replace("{d}", destination))
            .collect()
    }

    #[must_use]
    pub fn description(self, destination: &str) -> String {
        self.description_template().replace("{d}", destination)
    }
}

/// Describe a node from its tags, most specific first
#[must_use]
pub fn describe(element: &PoiElement, destination: &str) -> String {
    if let Some(description) = element.tag("description").filter(|d| !d.trim().is_empty()) {
        return description.to_string();
    }
    if let Some(kind) = element.tag("historic") {
        return format!("Historic {kind} in {destination}, showcasing India's rich heritage.");
    }
    if element.tag("tourism") == Some("museum") {
        return format!(
            "A fascinating museum in {destination} displaying important cultural artifacts."
        );
    }
    if element.tag("leisure") == Some("park") {
        return format!("A beautiful park in {destination}, perfect for experiencing nature.");
    }
    if element.tag("amenity") == Some("place_of_worship") {
        let religion = element.tag("religion").unwrap_or("religious");
        return format!(
            "A sacred {religion} site in {destination}, important to spiritual traditions."
        );
    }
    format!(
        "A popular attraction in {destination}, visited by many tourists exploring India's wonders."
    )
}

/// Up to five attractions from named candidates, in the order given
pub fn rate_candidates<R: RngExt>(
    candidates: &[PoiElement],
    destination: &str,
    rng: &mut R,
) -> Vec<Attraction> {
    candidates
        .iter()
        .take(MAX_ATTRACTIONS)
        .map(|candidate| Attraction {
            name: candidate
                .name()
                .map_or_else(|| format!("{destination} Attraction"), str::to_string),
            description: describe(candidate, destination),
            rating: sample_rating(rng, MIN_RATING, MAX_RATING),
        })
        .collect()
}

/// Five themed attractions: all temples, then forts until the set is full
pub fn synthesize_attractions<R: RngExt>(destination: &str, rng: &mut R) -> Vec<Attraction> {
    AttractionTheme::ALL
        .iter()
        .flat_map(|theme| {
            let description = theme.description(destination);
            theme
                .names(destination)
                .into_iter()
                .map(move |name| (name, description.clone()))
        })
        .take(MAX_ATTRACTIONS)
        .map(|(name, description)| Attraction {
            name,
            description,
            rating: sample_rating(rng, MIN_RATING, MAX_RATING),
        })
        .collect()
}

pub struct AttractionProvider {
    geocoder: Arc<dyn Geocoder>,
    poi: Arc<dyn PoiSource>,
}

impl AttractionProvider {
    pub fn new(geocoder: Arc<dyn Geocoder>, poi: Arc<dyn PoiSource>) -> Self {
        Self { geocoder, poi }
    }

    /// Attractions near the destination; never fails
    #[instrument(skip(self))]
    pub async fn get_attractions(&self, destination: &str) -> Outcome<Vec<Attraction>> {
        match self.find_candidates(destination).await {
            Ok(candidates) => {
                let attractions = rate_candidates(&candidates, destination, &mut rand::rng());
                info!("Found {} attractions near {}", attractions.len(), destination);
                Outcome::Fetched(attractions)
            }
            Err(err) => {
                warn!(
                    recoverable = err.is_recoverable(),
                    "Attraction lookup for {} failed, synthesizing: {}",
                    destination, err
                );
                Outcome::Fallback(self.estimate(destination))
            }
        }
    }

    pub fn estimate(&self, destination: &str) -> Vec<Attraction> {
        synthesize_attractions(destination, &mut rand::rng())
    }

    async fn find_candidates(&self, destination: &str) -> Result<Vec<PoiElement>> {
        let center = self.geocoder.resolve(destination).await?;
        let query = PoiQuery {
            center,
            radius_m: SEARCH_RADIUS_M,
            filters: ATTRACTION_FILTERS.to_vec(),
            limit: RAW_CANDIDATE_LIMIT,
        };

        let named = named_only(self.poi.search(&query).await?);
        if named.is_empty() {
            return Err(PlannerError::not_found(format!(
                "No attractions found near {destination}"
            )));
        }
        Ok(named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixedGeocoder(bool);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, query: &str) -> Result<GeoPoint> {
            if self.0 {
                Ok(GeoPoint::new(25.32, 82.97))
            } else {
                Err(PlannerError::not_found(format!("Location not found: {query}")))
            }
        }
    }

    struct CannedPoi(Vec<PoiElement>);

    #[async_trait]
    impl PoiSource for CannedPoi {
        async fn search(&self, query: &PoiQuery) -> Result<Vec<PoiElement>> {
            assert_eq!(query.radius_m, 15_000);
            assert_eq!(query.filters.len(), 6);
            Ok(self.0.clone())
        }
    }

    fn node(tags: &[(&str, &str)]) -> PoiElement {
        PoiElement {
            id: None,
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_description_priority() {
        let d = "Varanasi, India";

        let explicit = node(&[("description", "Riverside steps"), ("historic", "monument")]);
        assert_eq!(describe(&explicit, d), "Riverside steps");

        let historic = node(&[("historic", "ruins"), ("tourism", "museum")]);
        assert_eq!(
            describe(&historic, d),
            "Historic ruins in Varanasi, India, showcasing India's rich heritage."
        );

        let museum = node(&[("tourism", "museum"), ("leisure", "park")]);
        assert!(describe(&museum, d).starts_with("A fascinating museum in Varanasi, India"));

        let park = node(&[("leisure", "park")]);
        assert!(describe(&park, d).starts_with("A beautiful park"));

        let temple = node(&[("amenity", "place_of_worship"), ("religion", "hindu")]);
        assert_eq!(
            describe(&temple, d),
            "A sacred hindu site in Varanasi, India, important to spiritual traditions."
        );

        let shrine = node(&[("amenity", "place_of_worship")]);
        assert!(describe(&shrine, d).starts_with("A sacred religious site"));

        let viewpoint = node(&[("tourism", "viewpoint")]);
        assert!(describe(&viewpoint, d).starts_with("A popular attraction in Varanasi, India"));
    }

    #[test]
    fn test_synthesized_set_walks_themes_in_order() {
        let attractions = synthesize_attractions("Hampi, India", &mut rand::rng());
        let names: Vec<_> = attractions.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Hampi, India Ancient Temple",
                "Sri Hampi, India Temple",
                "Hampi, India Sacred Shrine",
                "Hampi, India Fort",
                "Hampi, India Palace",
            ]
        );
        assert_eq!(
            attractions[0].description,
            AttractionTheme::Temple.description("Hampi, India")
        );
        assert_eq!(
            attractions[4].description,
            AttractionTheme::Fort.description("Hampi, India")
        );
        assert!(attractions.iter().all(|a| (4.0..=5.0).contains(&a.rating)));
    }

    #[tokio::test]
    async fn test_live_attractions() {
        let provider = AttractionProvider::new(
            Arc::new(FixedGeocoder(true)),
            Arc::new(CannedPoi(vec![
                node(&[("name", "Kashi Vishwanath Temple"), ("amenity", "place_of_worship"), ("religion", "hindu")]),
                node(&[("historic", "memorial")]),
                node(&[("name", "Sarnath Museum"), ("tourism", "museum")]),
            ])),
        );

        let outcome = provider.get_attractions("Varanasi, India").await;
        assert!(!outcome.is_fallback());
        let attractions = outcome.into_inner();
        assert_eq!(attractions.len(), 2);
        assert_eq!(attractions[0].name, "Kashi Vishwanath Temple");
        assert!(attractions[0].description.contains("sacred hindu site"));
        assert_eq!(attractions[1].name, "Sarnath Museum");
        assert!(attractions.iter().all(|a| (4.0..=5.0).contains(&a.rating)));
    }

    #[tokio::test]
    async fn test_live_attractions_capped_at_five() {
        let nodes = (0..8)
            .map(|i| node(&[("name", format!("Ghat {i}").as_str()), ("tourism", "attraction")]))
            .collect();
        let provider =
            AttractionProvider::new(Arc::new(FixedGeocoder(true)), Arc::new(CannedPoi(nodes)));

        let attractions = provider.get_attractions("Varanasi, India").await.into_inner();
        assert_eq!(attractions.len(), 5);
        assert_eq!(attractions[4].name, "Ghat 4");
    }

    #[tokio::test]
    async fn test_empty_search_falls_back() {
        let provider =
            AttractionProvider::new(Arc::new(FixedGeocoder(true)), Arc::new(CannedPoi(Vec::new())));

        let outcome = provider.get_attractions("Leh, India").await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.value().len(), 5);
    }

    #[tokio::test]
    async fn test_geocoder_failure_falls_back() {
        let provider = AttractionProvider::new(
            Arc::new(FixedGeocoder(false)),
            Arc::new(CannedPoi(Vec::new())),
        );

        let attractions = provider.get_attractions("Nowhere, India").await.into_inner();
        assert_eq!(attractions.len(), 5);
        assert!(attractions.iter().any(|a| a.name.contains("Temple")));
        assert!(attractions.iter().any(|a| a.name.contains("Fort")));
    }
}
