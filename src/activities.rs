//! Budget-tiered activity suggestions
//!
//! Pure and deterministic: the same destination and tier always produce the
//! same ordered list.

use crate::models::Budget;

const CHEAP: [&str; 8] = [
    "Free walking tour of {d}",
    "Visit public parks and gardens in {d}",
    "Explore local markets in {d}",
    "Temple visits around {d}",
    "Street food tasting in {d}",
    "Visit free museums and galleries in {d}",
    "Attend local cultural events in {d}",
    "Picnic in scenic spots around {d}",
];

const MODERATE: [&str; 8] = [
    "Guided tour of {d}'s main attractions",
    "Visit popular museums and historical sites in {d}",
    "Try local cuisine at mid-range restaurants in {d}",
    "Day trip to nearby attractions from {d}",
    "Cultural shows or performances in {d}",
    "Boat ride or local transport experiences in {d}",
    "Shopping at local boutiques in {d}",
    "Cooking class to learn local cuisine in {d}",
];

const LUXURY: [&str; 8] = [
    "Private guided tour of {d}",
    "Fine dining experiences at top-rated restaurants in {d}",
    "Luxury spa treatments in {d}",
    "Private tours of historical sites in {d}",
    "VIP access to exclusive attractions in {d}",
    "Helicopter tour over {d}",
    "Private cultural performances in {d}",
    "Custom shopping experience with personal shopper in {d}",
];

/// All eight suggestions for the tier
#[must_use]
pub fn synthesize(destination: &str, budget: Budget) -> Vec<String> {
    let templates = match budget {
        Budget::Cheap => &CHEAP,
        Budget::Moderate => &MODERATE,
        Budget::Luxury => &LUXURY,
    };
    templates
        .iter()
        .map(|template| template.replace("{d}", destination))
        .collect()
}

/// Two suggestions per day, limited by what the tier offers
#[must_use]
pub fn for_trip(destination: &str, budget: Budget, days: u32) -> Vec<String> {
    let mut activities = synthesize(destination, budget);
    let wanted = usize::try_from(days).unwrap_or(usize::MAX).saturating_mul(2);
    activities.truncate(wanted.min(activities.len()));
    activities
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Budget::Cheap, "Free walking tour of Jaipur, India")]
    #[case(Budget::Moderate, "Guided tour of Jaipur, India's main attractions")]
    #[case(Budget::Luxury, "Private guided tour of Jaipur, India")]
    fn test_tier_specific_lists(#[case] budget: Budget, #[case] first: &str) {
        let activities = synthesize("Jaipur, India", budget);
        assert_eq!(activities.len(), 8);
        assert_eq!(activities[0], first);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        for budget in Budget::ALL {
            assert_eq!(synthesize("Goa", budget), synthesize("Goa", budget));
        }
    }

    #[rstest]
    #[case(1, 2)]
    #[case(3, 6)]
    #[case(4, 8)]
    #[case(10, 8)]
    #[case(u32::MAX, 8)]
    fn test_for_trip_truncates(#[case] days: u32, #[case] expected: usize) {
        assert_eq!(for_trip("Goa", Budget::Cheap, days).len(), expected);
    }
}
