//! Shared value types for package geometry and handling priority.
//!
//! These types are used by the placement planner, the session state and the
//! HTTP API alike, so they live in one place instead of being redefined per
//! module.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cubic centimeters per cubic meter, used when reporting volumes.
pub const CM3_PER_M3: f64 = 1_000_000.0;

/// Handling priority of a package.
///
/// Governs stacking order: `High` fragility goes on top, `Low` goes to the
/// base. The ordinal rank is what the planner sorts by.
///
/// # Examples
/// ```
/// use packplan::types::Fragility;
///
/// assert!(Fragility::High.rank() > Fragility::Low.rank());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Fragility {
    Low,
    Medium,
    High,
}

impl Fragility {
    /// Ordinal stacking rank: Low=1, Medium=2, High=3.
    #[inline]
    pub const fn rank(&self) -> u8 {
        match self {
            Fragility::Low => 1,
            Fragility::Medium => 2,
            Fragility::High => 3,
        }
    }
}

/// The input form pre-selects Medium.
impl Default for Fragility {
    fn default() -> Self {
        Fragility::Medium
    }
}

impl std::fmt::Display for Fragility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fragility::Low => write!(f, "Low"),
            Fragility::Medium => write!(f, "Medium"),
            Fragility::High => write!(f, "High"),
        }
    }
}

/// Outer dimensions of a package in centimeters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    /// Creates a new dimension triple (width, height, depth in cm).
    #[inline]
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Volume in cubic centimeters.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

/// Trait for objects with 3D dimensions.
pub trait Dimensional {
    /// Returns the dimensions of the object.
    fn dimensions(&self) -> Dimensions;

    /// Calculates the volume in cubic centimeters.
    fn volume(&self) -> f64 {
        self.dimensions().volume()
    }
}

/// Trait for objects with weight.
pub trait Weighted {
    /// Returns the weight in kg.
    fn weight(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragility_ranks_are_ordered() {
        assert_eq!(Fragility::Low.rank(), 1);
        assert_eq!(Fragility::Medium.rank(), 2);
        assert_eq!(Fragility::High.rank(), 3);
        assert!(Fragility::High > Fragility::Medium);
        assert!(Fragility::Medium > Fragility::Low);
    }

    #[test]
    fn fragility_serializes_as_plain_label() {
        let json = serde_json::to_string(&Fragility::High).unwrap();
        assert_eq!(json, "\"High\"");
        let parsed: Fragility = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Fragility::Medium);
    }

    #[test]
    fn dimensions_volume() {
        let dims = Dimensions::new(10.0, 20.0, 30.0);
        assert_eq!(dims.volume(), 6000.0);
    }
}
