//! Attraction model

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Attraction {
    pub name: String,
    pub description: String,
    /// Rating on a 4-5 scale
    pub rating: f64,
}
