//! Placement planning for the packaging visualizer.
//!
//! Implements the stacking heuristic behind the "optimize placement" button:
//! - fragile items go on top, heavy items go to the base
//! - positions follow a fixed zig-zag grid in scene units
//! - each entry gets a human-readable recommendation string
//!
//! This is a presentation heuristic, not a physically validated packing
//! algorithm: footprints are never checked for overlap or support.

use std::cmp::Ordering;

use crate::model::{PackageDescriptor, PlacementEntry, PlacementResult, PlacementSummary};
use crate::types::{CM3_PER_M3, Dimensional, Fragility};

/// Vertical scene position of the first (base) entry.
pub const BASE_LEVEL: f64 = -2.5;
/// Gap added above each placed entry before the next one.
pub const STACK_GAP: f64 = 0.5;
/// Divisor converting cm heights to scene units for stacking offsets.
pub const STACK_DIVISOR: f64 = 100.0;
/// Divisor converting cm dimensions to scene-unit scales.
///
/// Intentionally differs from `STACK_DIVISOR`: scales are tuned for visual
/// proportion, stacking offsets for spacing. Observed behavior, kept as is.
pub const SCALE_DIVISOR: f64 = 50.0;
/// Horizontal distance between the two stacking lanes.
pub const LANE_SPACING: f64 = 3.0;
/// Horizontal offset of lane 0.
pub const LANE_OFFSET: f64 = -1.5;
/// Depth distance between the two stacking rows.
pub const ROW_SPACING: f64 = 2.0;
/// Depth offset of row 0.
pub const ROW_OFFSET: f64 = -1.0;

/// Weight above which an entry is called out as heavy (kg).
pub const HEAVY_WEIGHT_THRESHOLD: f64 = 5.0;
/// Handling-instruction substring that triggers the upright note.
pub const UPRIGHT_HINT: &str = "upright";

/// Efficiency score baseline, per-item increment and cap.
pub const EFFICIENCY_BASE: u32 = 70;
pub const EFFICIENCY_PER_ITEM: u32 = 5;
pub const EFFICIENCY_CAP: u32 = 95;

/// Summary recommendations; fixed and independent of the input.
const SUMMARY_RECOMMENDATIONS: [&str; 4] = [
    "Fragile items placed on top layer",
    "Weight distribution optimized",
    "Handling instructions considered",
    "Space utilization maximized",
];

/// Events emitted while a placement is computed, for live visualization
/// over SSE.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type")]
pub enum PlacementEvent {
    /// Planning started for the given number of packages.
    Started { count: usize },
    /// One package received its placement.
    PackagePlaced {
        index: usize,
        id: String,
        position: (f64, f64, f64),
        scale: (f64, f64, f64),
        recommendation: String,
    },
    /// Planning finished; carries the aggregate summary.
    Finished { summary: PlacementSummary },
}

/// Computes placements for a list of packages.
///
/// Pure function of its input: no side effects, never fails. An empty input
/// yields an empty result; callers that want a user-facing notice for the
/// empty case guard before calling.
///
/// # Parameters
/// * `packages` - Packages in insertion order
///
/// # Returns
/// Entries in stacking order (base first) plus the aggregate summary.
pub fn plan_placement(packages: Vec<PackageDescriptor>) -> PlacementResult {
    plan_placement_with_progress(packages, |_| {})
}

/// Like `plan_placement`, but reports each step through a callback
/// (suitable for SSE streaming).
pub fn plan_placement_with_progress(
    packages: Vec<PackageDescriptor>,
    mut on_event: impl FnMut(&PlacementEvent),
) -> PlacementResult {
    on_event(&PlacementEvent::Started {
        count: packages.len(),
    });

    let mut sorted = packages;
    // Stable sort: exact ties on both keys keep insertion order.
    sorted.sort_by(|a, b| {
        b.fragility
            .rank()
            .cmp(&a.fragility.rank())
            .then_with(|| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal))
    });

    let mut level = BASE_LEVEL;
    let mut entries = Vec::with_capacity(sorted.len());
    for (index, package) in sorted.into_iter().enumerate() {
        let lane = (index % 2) as f64;
        let row = ((index / 2) % 2) as f64;
        let position = (
            lane * LANE_SPACING + LANE_OFFSET,
            level,
            row * ROW_SPACING + ROW_OFFSET,
        );
        level += package.dimensions.height / STACK_DIVISOR + STACK_GAP;

        let scale = (
            package.dimensions.width / SCALE_DIVISOR,
            package.dimensions.height / SCALE_DIVISOR,
            package.dimensions.depth / SCALE_DIVISOR,
        );
        let recommendation = recommendation_for(&package, index);

        on_event(&PlacementEvent::PackagePlaced {
            index,
            id: package.id.clone(),
            position,
            scale,
            recommendation: recommendation.clone(),
        });

        entries.push(PlacementEntry {
            package,
            position,
            scale,
            recommendation,
        });
    }

    let summary = summarize(&entries);
    on_event(&PlacementEvent::Finished {
        summary: summary.clone(),
    });

    PlacementResult { entries, summary }
}

/// Builds the per-entry recommendation string.
///
/// Notes are tested in a fixed order and joined with ". "; an entry that
/// matches nothing gets the empty string.
fn recommendation_for(package: &PackageDescriptor, index: usize) -> String {
    let mut notes: Vec<&str> = Vec::new();
    if package.fragility == Fragility::High {
        notes.push("Placed on top due to high fragility");
    }
    if package.weight > HEAVY_WEIGHT_THRESHOLD {
        notes.push("Heavy item - positioned for stability");
    }
    if package.handling_instructions.contains(UPRIGHT_HINT) {
        notes.push("Oriented upright as specified");
    }
    if index == 0 {
        notes.push("Base layer for optimal weight distribution");
    }
    notes.join(". ")
}

/// Aggregates totals over the placed entries.
fn summarize(entries: &[PlacementEntry]) -> PlacementSummary {
    let total_weight: f64 = entries.iter().map(|e| e.package.weight).sum();
    let fragile_items = entries
        .iter()
        .filter(|e| e.package.fragility == Fragility::High)
        .count();
    let total_volume: f64 = entries.iter().map(|e| e.package.volume()).sum();

    PlacementSummary {
        total_weight: format_rounded(total_weight, 1),
        fragile_items,
        total_volume: format_rounded(total_volume / CM3_PER_M3, 2),
        efficiency: EFFICIENCY_CAP.min(EFFICIENCY_BASE + EFFICIENCY_PER_ITEM * entries.len() as u32),
        recommendations: SUMMARY_RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Formats a value with the given number of decimals, rounding ties away
/// from zero (the UI expects 5.25 to render as "5.3").
fn format_rounded(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * factor).round() / factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    fn package(
        id: &str,
        fragility: Fragility,
        weight: f64,
        dims: (f64, f64, f64),
        instructions: &str,
    ) -> PackageDescriptor {
        PackageDescriptor {
            id: id.to_string(),
            name: format!("Package {id}"),
            fragility,
            dimensions: Dimensions::new(dims.0, dims.1, dims.2),
            weight,
            handling_instructions: instructions.to_string(),
            contents: "Test contents".to_string(),
        }
    }

    fn simple(id: &str, fragility: Fragility, weight: f64) -> PackageDescriptor {
        package(id, fragility, weight, (30.0, 20.0, 25.0), "")
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = plan_placement(Vec::new());
        assert!(result.entries.is_empty());
        assert_eq!(result.summary.total_weight, "0.0");
        assert_eq!(result.summary.fragile_items, 0);
        assert_eq!(result.summary.efficiency, EFFICIENCY_BASE);
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let packages = vec![
            simple("a", Fragility::Low, 3.0),
            simple("b", Fragility::High, 1.0),
            simple("c", Fragility::Medium, 9.0),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.entry_count(), 3);
        let mut ids = result.placed_ids();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn sorts_by_fragility_then_weight_descending() {
        let packages = vec![
            simple("1", Fragility::High, 2.0),
            simple("2", Fragility::Low, 9.0),
            simple("3", Fragility::High, 5.0),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.placed_ids(), vec!["3", "1", "2"]);
    }

    #[test]
    fn exact_ties_keep_insertion_order() {
        let packages = vec![
            simple("first", Fragility::Medium, 4.0),
            simple("second", Fragility::Medium, 4.0),
            simple("third", Fragility::Medium, 4.0),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.placed_ids(), vec!["first", "second", "third"]);
    }

    #[test]
    fn base_entry_sits_at_base_level_and_stack_rises() {
        let packages = vec![
            simple("1", Fragility::Low, 1.0),
            simple("2", Fragility::Low, 1.0),
            simple("3", Fragility::Low, 1.0),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.entries[0].position.1, BASE_LEVEL);
        for pair in result.entries.windows(2) {
            assert!(pair[1].position.1 > pair[0].position.1);
        }
    }

    #[test]
    fn stacking_offset_for_height_100_is_1_5() {
        let packages = vec![
            package("1", Fragility::Low, 1.0, (30.0, 100.0, 25.0), ""),
            package("2", Fragility::Low, 1.0, (30.0, 20.0, 25.0), ""),
        ];
        let result = plan_placement(packages);
        let step = result.entries[1].position.1 - result.entries[0].position.1;
        assert_eq!(step, 1.5);
    }

    #[test]
    fn zig_zag_grid_alternates_lanes_and_rows() {
        let packages = (0..4)
            .map(|i| simple(&i.to_string(), Fragility::Low, 1.0))
            .collect();
        let result = plan_placement(packages);
        let xs: Vec<f64> = result.entries.iter().map(|e| e.position.0).collect();
        let zs: Vec<f64> = result.entries.iter().map(|e| e.position.2).collect();
        assert_eq!(xs, vec![-1.5, 1.5, -1.5, 1.5]);
        assert_eq!(zs, vec![-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn fifty_cm_cube_scales_to_unit() {
        let packages = vec![package("1", Fragility::Low, 1.0, (50.0, 50.0, 50.0), "")];
        let result = plan_placement(packages);
        assert_eq!(result.entries[0].scale, (1.0, 1.0, 1.0));
    }

    #[test]
    fn recommendation_combines_all_matching_notes() {
        let packages = vec![package(
            "1",
            Fragility::High,
            6.0,
            (30.0, 20.0, 25.0),
            "keep upright",
        )];
        let result = plan_placement(packages);
        assert_eq!(
            result.entries[0].recommendation,
            "Placed on top due to high fragility. Heavy item - positioned for stability. \
             Oriented upright as specified. Base layer for optimal weight distribution"
        );
    }

    #[test]
    fn recommendation_is_empty_when_nothing_matches() {
        let packages = vec![
            simple("base", Fragility::Medium, 9.0),
            simple("plain", Fragility::Medium, 2.0),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.entries[1].recommendation, "");
    }

    #[test]
    fn upright_hint_is_case_sensitive() {
        let packages = vec![
            package("1", Fragility::Low, 9.0, (30.0, 20.0, 25.0), "Keep Upright"),
            package("2", Fragility::Low, 1.0, (30.0, 20.0, 25.0), "keep upright"),
        ];
        let result = plan_placement(packages);
        assert!(!result.entries[0].recommendation.contains("Oriented upright"));
        assert!(result.entries[1].recommendation.contains("Oriented upright"));
    }

    #[test]
    fn summary_weight_rounds_half_up() {
        let packages = vec![
            simple("1", Fragility::Low, 2.0),
            simple("2", Fragility::Low, 3.25),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.summary.total_weight, "5.3");
    }

    #[test]
    fn summary_volume_is_reported_in_cubic_meters() {
        // 100x100x100 cm = 1 m³ per package.
        let packages = vec![
            package("1", Fragility::Low, 1.0, (100.0, 100.0, 100.0), ""),
            package("2", Fragility::Low, 1.0, (100.0, 100.0, 50.0), ""),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.summary.total_volume, "1.50");
    }

    #[test]
    fn efficiency_grows_with_item_count_and_caps_at_95() {
        assert_eq!(plan_placement(Vec::new()).summary.efficiency, 70);

        let four: Vec<_> = (0..4)
            .map(|i| simple(&i.to_string(), Fragility::Low, 1.0))
            .collect();
        assert_eq!(plan_placement(four).summary.efficiency, 90);

        let six: Vec<_> = (0..6)
            .map(|i| simple(&i.to_string(), Fragility::Low, 1.0))
            .collect();
        assert_eq!(plan_placement(six).summary.efficiency, 95);
    }

    #[test]
    fn summary_counts_only_high_fragility() {
        let packages = vec![
            simple("1", Fragility::High, 1.0),
            simple("2", Fragility::Medium, 1.0),
            simple("3", Fragility::High, 1.0),
        ];
        let result = plan_placement(packages);
        assert_eq!(result.summary.fragile_items, 2);
        assert_eq!(result.summary.recommendations.len(), 4);
    }

    #[test]
    fn progress_events_cover_every_package() {
        let packages = vec![
            simple("1", Fragility::High, 2.0),
            simple("2", Fragility::Low, 9.0),
        ];
        let mut events = Vec::new();
        let result = plan_placement_with_progress(packages, |evt| events.push(evt.clone()));

        assert!(matches!(events.first(), Some(PlacementEvent::Started { count: 2 })));
        let placed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                PlacementEvent::PackagePlaced { id, position, .. } => {
                    Some((id.clone(), *position))
                }
                _ => None,
            })
            .collect();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].0, "1");
        assert_eq!(placed[0].1, result.entries[0].position);
        assert!(matches!(events.last(), Some(PlacementEvent::Finished { .. })));
    }
}
