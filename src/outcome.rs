//! Provenance-tagged provider results
//!
//! Every provider either returns data it fetched from its external source or
//! a synthesized substitute of the same shape. The variant records which.

use serde::{Deserialize, Serialize};

/// Where a value came from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Estimated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Sourced from the external service
    Fetched(T),
    /// Synthesized locally after the external path failed or was skipped
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Fetched(value) | Outcome::Fallback(value) => value,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Fetched(value) | Outcome::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            Outcome::Fetched(_) => Provenance::Live,
            Outcome::Fallback(_) => Provenance::Estimated,
        }
    }
}
