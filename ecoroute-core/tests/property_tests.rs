//! Property-based tests for result validation and render planning.
//!
//! # Invariants tested
//!
//! - **Marker pairing:** a validated result yields one marker per location,
//!   paired by index with its coordinate.
//! - **Permutations only:** route indices that are not a permutation of the
//!   location indices are always rejected.
//! - **Flight paths:** Air routes draw the coordinates verbatim.
//! - **Visiting order:** the summary sequence follows the route indices.

use ecoroute_core::{
    Modality, OptimizationResult, PathStyle, Position, RouteSummary, build_render_plan, validate,
};
use proptest::prelude::*;

fn position_strategy() -> impl Strategy<Value = Position> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(lat, lon)| Position::new(lat, lon))
}

/// Locations with coordinates and a shuffled visiting order.
fn result_strategy() -> impl Strategy<Value = OptimizationResult> {
    prop::collection::vec(position_strategy(), 1..12).prop_flat_map(|coordinates| {
        let len = coordinates.len();
        let order: Vec<i64> = (0..len)
            .map(|index| i64::try_from(index).expect("small index"))
            .collect();
        Just(order).prop_shuffle().prop_map(move |indices| {
            let labels = (0..len).map(|index| format!("Stop {index}")).collect();
            OptimizationResult::success(labels, coordinates.clone(), indices)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: markers, locations and coordinates always have equal length.
    #[test]
    fn markers_pair_with_locations(result in result_strategy()) {
        let locations = result.valid_locations.clone();
        let coordinates = result.coordinates.clone();
        let validated = validate(result).expect("permutations validate");
        let plan = build_render_plan(&validated, Modality::Road, None);

        prop_assert_eq!(plan.markers.len(), locations.len());
        prop_assert_eq!(plan.markers.len(), coordinates.len());
        for ((marker, label), position) in plan.markers.iter().zip(&locations).zip(&coordinates) {
            prop_assert_eq!(&marker.label, label);
            prop_assert_eq!(marker.position, *position);
        }
        prop_assert_eq!(Some(plan.focus), coordinates.first().copied());
    }

    /// Property: a repeated index is rejected wherever it occurs.
    #[test]
    fn duplicated_index_is_rejected(
        mut result in result_strategy().prop_filter("needs two stops", |r| r.valid_locations.len() > 1),
        slot in any::<prop::sample::Index>(),
    ) {
        let len = result.optimized_route_indices.len();
        let target = slot.index(len);
        let source = (target + 1) % len;
        result.optimized_route_indices[target] = result.optimized_route_indices[source];

        prop_assert!(validate(result).is_err());
    }

    /// Property: an index at or beyond the location count is rejected.
    #[test]
    fn out_of_range_index_is_rejected(
        mut result in result_strategy(),
        slot in any::<prop::sample::Index>(),
        overshoot in 0_i64..100,
    ) {
        let len = result.optimized_route_indices.len();
        let bound = i64::try_from(len).expect("small length");
        result.optimized_route_indices[slot.index(len)] = bound + overshoot;

        prop_assert!(validate(result).is_err());
    }

    /// Property: Air routes draw the coordinates verbatim with a dashed line.
    #[test]
    fn flights_draw_coordinates(result in result_strategy()) {
        let coordinates = result.coordinates.clone();
        let validated = validate(result.with_vehicle("Air Freight")).expect("valid result");
        let plan = build_render_plan(&validated, Modality::Air, None);

        prop_assert_eq!(plan.path, coordinates);
        prop_assert_eq!(plan.path_style, PathStyle::DashedFlight);
    }

    /// Property: the summary lists labels in route-index order.
    #[test]
    fn summary_follows_route_indices(result in result_strategy()) {
        let expected: Vec<String> = result
            .optimized_route_indices
            .iter()
            .map(|&index| format!("Stop {index}"))
            .collect();
        let validated = validate(result).expect("valid result");

        prop_assert_eq!(RouteSummary::from_result(&validated).sequence, expected);
    }
}
