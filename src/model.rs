//! Data models for the package placement planner.
//!
//! This module defines the structures exchanged between the input form, the
//! placement planner and the HTTP API:
//! - `PackageDescriptor`: a package as entered by the user
//! - `PackageDraft`: raw form input with free-text numeric fields
//! - `PlacementEntry`: a package with its computed scene placement
//! - `PlacementSummary` / `PlacementResult`: aggregate planner output

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::types::{Dimensional, Dimensions, Fragility, Weighted};

/// A package to be placed, as captured by the product-input screen.
///
/// Immutable once added; the planner never mutates descriptors, it only
/// reorders them and derives placements.
///
/// # Fields
/// * `id` - Identifier assigned when the package was added
/// * `dimensions` - Outer dimensions in cm
/// * `weight` - Weight in kg
/// * `handling_instructions` - Free text, scanned for the "upright" hint
/// * `contents` - Free-text description of what is inside
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PackageDescriptor {
    pub id: String,
    pub name: String,
    pub fragility: Fragility,
    pub dimensions: Dimensions,
    pub weight: f64,
    #[serde(default)]
    pub handling_instructions: String,
    #[serde(default)]
    pub contents: String,
}

impl Dimensional for PackageDescriptor {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl Weighted for PackageDescriptor {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Raw form input for a new package.
///
/// Numeric fields arrive as free text straight from the form. Coercion is
/// deliberately permissive: empty or unparsable numbers become 0.0 instead
/// of being rejected, matching the observed form behavior.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PackageDraft {
    pub name: String,
    #[serde(default)]
    pub contents: String,
    pub fragility: Fragility,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub depth: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub handling_instructions: String,
}

impl PackageDraft {
    /// Parses a free-text numeric field, coercing anything invalid to 0.0.
    fn coerce_number(raw: &str) -> f64 {
        raw.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// Whether the draft carries the required text fields.
    ///
    /// Name and contents are the only mandatory inputs; everything numeric
    /// is coerced instead of validated.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.contents.trim().is_empty()
    }

    /// Converts the draft into a descriptor with the given id.
    pub fn into_descriptor(self, id: String) -> PackageDescriptor {
        let dimensions = Dimensions::new(
            Self::coerce_number(&self.width),
            Self::coerce_number(&self.height),
            Self::coerce_number(&self.depth),
        );
        PackageDescriptor {
            id,
            name: self.name,
            fragility: self.fragility,
            dimensions,
            weight: Self::coerce_number(&self.weight),
            handling_instructions: self.handling_instructions,
            contents: self.contents,
        }
    }
}

/// A package with its computed scene placement.
///
/// # Fields
/// * `package` - The original descriptor
/// * `position` - (x, y, z) in scene units
/// * `scale` - (sx, sy, sz) in scene units
/// * `recommendation` - Human-readable placement notes, possibly empty
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PlacementEntry {
    pub package: PackageDescriptor,
    #[schema(value_type = [f64; 3], example = json!([-1.5, -2.5, -1.0]))]
    pub position: (f64, f64, f64),
    #[schema(value_type = [f64; 3], example = json!([0.6, 0.4, 0.5]))]
    pub scale: (f64, f64, f64),
    pub recommendation: String,
}

/// Aggregate totals over one placement run.
///
/// Weight and volume are pre-rendered strings (one and two decimal places)
/// because the UI displays them verbatim. The efficiency score is synthetic:
/// it grows with item count and caps at 95.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PlacementSummary {
    pub total_weight: String,
    pub fragile_items: usize,
    pub total_volume: String,
    pub efficiency: u32,
    pub recommendations: Vec<String>,
}

/// Complete planner output: entries in stacking order plus the summary.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PlacementResult {
    pub entries: Vec<PlacementEntry>,
    pub summary: PlacementSummary,
}

impl PlacementResult {
    /// Number of placed entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Ids of the placed packages in stacking order.
    pub fn placed_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.package.id.as_str()).collect()
    }
}
