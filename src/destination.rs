//! Destination intake helpers

/// Well-known destinations offered as suggestions
pub const POPULAR_INDIAN_DESTINATIONS: &[&str] = &[
    "Agra, Uttar Pradesh",
    "Amritsar, Punjab",
    "Andaman and Nicobar Islands",
    "Bengaluru, Karnataka",
    "Darjeeling, West Bengal",
    "Delhi",
    "Goa",
    "Gangtok, Sikkim",
    "Hampi, Karnataka",
    "Hyderabad, Telangana",
    "Jaipur, Rajasthan",
    "Jaisalmer, Rajasthan",
    "Kochi, Kerala",
    "Kolkata, West Bengal",
    "Leh, Ladakh",
    "Manali, Himachal Pradesh",
    "Mumbai, Maharashtra",
    "Munnar, Kerala",
    "Mysuru, Karnataka",
    "Ooty, Tamil Nadu",
    "Pondicherry",
    "Rishikesh, Uttarakhand",
    "Shimla, Himachal Pradesh",
    "Udaipur, Rajasthan",
    "Varanasi, Uttar Pradesh",
];

/// Country-qualify a free-text destination.
///
/// The check is a plain substring match on "India", so "Indiana" is left
/// untouched as well.
#[must_use]
pub fn format_destination(raw: &str) -> String {
    let destination = raw.trim();
    if destination.contains("India") {
        destination.to_string()
    } else {
        format!("{destination}, India")
    }
}

/// Popular destinations containing `query`, ignoring case
#[must_use]
pub fn suggest_destinations(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    POPULAR_INDIAN_DESTINATIONS
        .iter()
        .copied()
        .filter(|destination| destination.to_lowercase().contains(&needle))
        .collect()
}
