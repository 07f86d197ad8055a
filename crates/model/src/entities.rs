use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical entities
// ---------------------------------------------------------------------------

/// A floor plan as stored by the system of record. Immutable during a codec
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: u64,
    /// Unique human-readable code; the case-insensitive cross-document join key.
    pub plan_code: String,
    pub name: String,
    /// Conditioned floor area in square feet. Zero means "not set".
    pub floor_area_sqft: f64,
    pub bedrooms: u32,
    /// Half baths count as 0.5.
    pub bathrooms: f64,
}

/// A cost line item as stored by the system of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    /// Unique code; the case-insensitive cross-document join key.
    pub item_code: String,
    pub name: String,
    /// Free-form lowercase category. Bucketed into the fixed display order
    /// by [`bucket`]; anything unrecognized lands in "other".
    pub category: String,
}

// ---------------------------------------------------------------------------
// Category display order
// ---------------------------------------------------------------------------

/// Fixed display order for cost categories on the exported matrix.
pub const CATEGORY_ORDER: [&str; 9] = [
    "sitework",
    "foundation",
    "framing",
    "exterior",
    "mechanical",
    "interior",
    "finishes",
    "sitecosts",
    "softcosts",
];

/// Catch-all bucket. Always displays last.
pub const OTHER_CATEGORY: &str = "other";

/// Bucket a free-form category string into the fixed display set.
pub fn bucket(category: &str) -> &'static str {
    let c = category.trim().to_ascii_lowercase();
    CATEGORY_ORDER
        .iter()
        .find(|&&known| known == c)
        .copied()
        .unwrap_or(OTHER_CATEGORY)
}

/// Rank of a category in display order. "other" sorts after every known bucket.
pub fn category_rank(category: &str) -> usize {
    let b = bucket(category);
    CATEGORY_ORDER
        .iter()
        .position(|&known| known == b)
        .unwrap_or(CATEGORY_ORDER.len())
}

// ---------------------------------------------------------------------------
// Sparse pricing
// ---------------------------------------------------------------------------

/// Sparse plan → (line item → cost) map. Absence means "no price set",
/// never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingMap {
    entries: HashMap<u64, HashMap<u64, f64>>,
}

impl PricingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, plan_id: u64, item_id: u64, cost: f64) {
        self.entries.entry(plan_id).or_default().insert(item_id, cost);
    }

    pub fn price_of(&self, plan_id: u64, item_id: u64) -> Option<f64> {
        self.entries.get(&plan_id).and_then(|m| m.get(&item_id)).copied()
    }

    /// Total number of priced (plan, item) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
