//! Intent Module - Request classification with deterministic fallback

pub mod classifier;

pub use classifier::{fallback_classify, IntentClassifier};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of request categories. A model reply carrying any other
/// label fails the parse, which routes classification onto the keyword
/// fallback path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Exploration,
    WarehouseCreation,
    Querying,
    SchemaChange,
    DataMutation,
    Visualization,
    Reporting,
    Unclassified,
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntentCategory::Exploration => "exploratory analysis",
            IntentCategory::WarehouseCreation => "warehouse creation",
            IntentCategory::Querying => "sql querying",
            IntentCategory::SchemaChange => "schema operations",
            IntentCategory::DataMutation => "data mutation",
            IntentCategory::Visualization => "visualization",
            IntentCategory::Reporting => "reporting",
            IntentCategory::Unclassified => "unclassified",
        };
        write!(f, "{}", label)
    }
}

/// Result of classifying one request. Produced exactly once per request,
/// by the model-backed path or the fallback path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentClassification {
    pub category: IntentCategory,
    pub confidence: f64,
    pub rationale: String,
}
