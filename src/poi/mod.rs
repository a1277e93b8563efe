//! Points-of-interest search
//!
//! Proximity queries over OpenStreetMap nodes, filtered by tag. Used for
//! both lodging and attraction lookups.

use std::collections::HashMap;
use std::fmt::Write as _;

use async_trait::async_trait;
use serde::Deserialize;

use crate::Result;
use crate::models::GeoPoint;

pub mod overpass;

pub use overpass::OverpassClient;

/// A single tag constraint on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    /// `key=value`
    Equals(&'static str, &'static str),
    /// Any value for `key`
    Exists(&'static str),
}

impl TagFilter {
    fn to_overpass(self) -> String {
        match self {
            TagFilter::Equals(key, value) => format!("[\"{key}\"=\"{value}\"]"),
            TagFilter::Exists(key) => format!("[\"{key}\"]"),
        }
    }
}

/// Nodes matching any filter within `radius_m` of `center`
#[derive(Debug, Clone, PartialEq)]
pub struct PoiQuery {
    pub center: GeoPoint,
    pub radius_m: u32,
    pub filters: Vec<TagFilter>,
    /// Maximum number of raw candidates returned
    pub limit: usize,
}

impl PoiQuery {
    /// Render as an Overpass QL union query
    #[must_use]
    pub fn to_overpass_ql(&self) -> String {
        let mut query = String::from("[out:json];\n(\n");
        for filter in &self.filters {
            let _ = writeln!(
                query,
                "  node{}(around:{},{},{});",
                filter.to_overpass(),
                self.radius_m,
                self.center.latitude,
                self.center.longitude
            );
        }
        let _ = write!(query, ");\nout body {};", self.limit);
        query
    }
}

/// A tagged node returned by a search
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PoiElement {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl PoiElement {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Non-blank `name` tag
    pub fn name(&self) -> Option<&str> {
        self.tag("name").filter(|name| !name.trim().is_empty())
    }
}

#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Raw candidates in the order the service returned them
    async fn search(&self, query: &PoiQuery) -> Result<Vec<PoiElement>>;
}

/// Keep only candidates that carry a name, preserving order
pub fn named_only(elements: Vec<PoiElement>) -> Vec<PoiElement> {
    elements.into_iter().filter(|e| e.name().is_some()).collect()
}
