//! Accommodation suggestion model

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Accommodation {
    pub name: String,
    /// Rating on a 0-5 scale
    pub rating: f64,
    /// Price per night in whole currency units
    pub price_per_night: u32,
    pub currency: String,
    /// Illustrative photo; not guaranteed to resolve
    pub image_url: String,
}

impl Accommodation {
    #[must_use]
    pub fn format_price(&self) -> String {
        format!("{} {} / night", self.price_per_night, self.currency)
    }
}
