//! Structural validation of optimization results.
//!
//! Validation fails closed: a single violated invariant rejects the whole
//! result. A coordinate list that is one entry short would otherwise pin a
//! label on the wrong marker.

use thiserror::Error;

use crate::{OptimizationResult, Position};

/// Reasons an [`OptimizationResult`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The result does not report success.
    #[error("result does not report success")]
    NotSuccessful,
    /// No locations were resolved.
    #[error("result contains no valid locations")]
    NoLocations,
    /// `coordinates` and `valid_locations` differ in length.
    #[error("{locations} locations but {coordinates} coordinates")]
    LengthMismatch {
        /// Number of valid locations.
        locations: usize,
        /// Number of coordinates.
        coordinates: usize,
    },
    /// The route index list is not the same length as the location list.
    #[error("expected {expected} route indices, found {actual}")]
    IndexCountMismatch {
        /// Number of valid locations.
        expected: usize,
        /// Number of route indices.
        actual: usize,
    },
    /// A route index lies outside `0..len`.
    #[error("route index {index} is outside 0..{len}")]
    IndexOutOfRange {
        /// Offending index.
        index: i64,
        /// Number of valid locations.
        len: usize,
    },
    /// A route index appears more than once.
    #[error("route index {index} appears more than once")]
    DuplicateIndex {
        /// Repeated index.
        index: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("coordinate {index} is not a finite number")]
    NonFiniteCoordinate {
        /// Position in `coordinates`.
        index: usize,
    },
    /// A coordinate lies outside valid latitude/longitude bounds.
    #[error("coordinate {index} is outside latitude/longitude bounds")]
    CoordinateOutOfRange {
        /// Position in `coordinates`.
        index: usize,
    },
    /// A road geometry point is NaN or infinite.
    #[error("road geometry point {index} is not a finite number")]
    NonFiniteGeometry {
        /// Position in `road_geometry`.
        index: usize,
    },
}

/// An [`OptimizationResult`] whose structural invariants hold.
///
/// The only way to obtain one is [`validate`], so downstream stages can rely
/// on matching lengths, a permutation of route indices and at least one
/// finite coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResult {
    result: OptimizationResult,
    sequence: Vec<usize>,
    focus: Position,
}

impl ValidatedResult {
    /// The underlying result.
    #[must_use]
    pub const fn result(&self) -> &OptimizationResult {
        &self.result
    }

    /// Consume the wrapper and return the underlying result.
    #[must_use]
    pub fn into_inner(self) -> OptimizationResult {
        self.result
    }

    /// Route indices converted to `usize`, in visiting order.
    #[must_use]
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// First coordinate, used as the map focus.
    #[must_use]
    pub const fn focus(&self) -> Position {
        self.focus
    }

    /// Location labels paired with their coordinates, in original order.
    pub fn locations(&self) -> impl Iterator<Item = (&str, Position)> {
        self.result
            .valid_locations
            .iter()
            .map(String::as_str)
            .zip(self.result.coordinates.iter().copied())
    }

    /// Location labels in visiting order.
    pub fn visiting_order(&self) -> impl Iterator<Item = &str> {
        self.sequence
            .iter()
            .filter_map(|&index| self.result.valid_locations.get(index))
            .map(String::as_str)
    }
}

/// Check the structural invariants of `result`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found; checks run in the order
/// status, lengths, coordinates, route indices, road geometry.
///
/// # Examples
/// ```
/// use ecoroute_core::{OptimizationResult, Position, ValidationError, validate};
///
/// let result = OptimizationResult::success(
///     vec!["Agra, India".into(), "Jaipur, India".into()],
///     vec![Position::new(27.1, 78.0), Position::new(26.9, 75.8)],
///     vec![1, 1],
/// );
/// assert_eq!(validate(result), Err(ValidationError::DuplicateIndex { index: 1 }));
/// ```
pub fn validate(result: OptimizationResult) -> Result<ValidatedResult, ValidationError> {
    check(&result)
        .map(|(sequence, focus)| ValidatedResult {
            result,
            sequence,
            focus,
        })
        .inspect_err(|err| log::error!("optimization service contract violated: {err}"))
}

fn check(result: &OptimizationResult) -> Result<(Vec<usize>, Position), ValidationError> {
    if !result.is_success() {
        return Err(ValidationError::NotSuccessful);
    }
    let len = result.valid_locations.len();
    if result.coordinates.len() != len {
        return Err(ValidationError::LengthMismatch {
            locations: len,
            coordinates: result.coordinates.len(),
        });
    }
    let focus = check_coordinates(&result.coordinates)?;
    let sequence = check_permutation(&result.optimized_route_indices, len)?;
    if let Some(geometry) = &result.road_geometry
        && let Some(index) = geometry.iter().position(|point| !point.is_finite())
    {
        return Err(ValidationError::NonFiniteGeometry { index });
    }
    Ok((sequence, focus))
}

fn check_coordinates(coordinates: &[Position]) -> Result<Position, ValidationError> {
    for (index, position) in coordinates.iter().enumerate() {
        if !position.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate { index });
        }
        if !position.is_in_range() {
            return Err(ValidationError::CoordinateOutOfRange { index });
        }
    }
    coordinates
        .first()
        .copied()
        .ok_or(ValidationError::NoLocations)
}

fn check_permutation(indices: &[i64], len: usize) -> Result<Vec<usize>, ValidationError> {
    if indices.len() != len {
        return Err(ValidationError::IndexCountMismatch {
            expected: len,
            actual: indices.len(),
        });
    }
    let mut seen = vec![false; len];
    indices
        .iter()
        .map(|&raw| {
            let index = usize::try_from(raw)
                .ok()
                .filter(|&index| index < len)
                .ok_or(ValidationError::IndexOutOfRange { index: raw, len })?;
            match seen.get_mut(index) {
                Some(slot) if !*slot => {
                    *slot = true;
                    Ok(index)
                }
                _ => Err(ValidationError::DuplicateIndex { index }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn three_cities() -> OptimizationResult {
        OptimizationResult::success(
            vec![
                "New Delhi, India".into(),
                "Agra, India".into(),
                "Jaipur, India".into(),
            ],
            vec![
                Position::new(28.6, 77.2),
                Position::new(27.1, 78.0),
                Position::new(26.9, 75.8),
            ],
            vec![0, 2, 1],
        )
    }

    #[rstest]
    fn accepts_well_formed_result(three_cities: OptimizationResult) {
        let validated = validate(three_cities).expect("valid result");
        assert_eq!(validated.sequence(), [0, 2, 1]);
        assert_eq!(validated.focus(), Position::new(28.6, 77.2));
        let order: Vec<_> = validated.visiting_order().collect();
        assert_eq!(order, ["New Delhi, India", "Jaipur, India", "Agra, India"]);
    }

    #[rstest]
    fn rejects_failure_status() {
        let err = validate(OptimizationResult::failure("nope")).expect_err("failure status");
        assert_eq!(err, ValidationError::NotSuccessful);
    }

    #[rstest]
    fn rejects_empty_result() {
        let result = OptimizationResult::success(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(validate(result), Err(ValidationError::NoLocations));
    }

    #[rstest]
    fn rejects_length_mismatch(mut three_cities: OptimizationResult) {
        three_cities.coordinates.pop();
        assert_eq!(
            validate(three_cities),
            Err(ValidationError::LengthMismatch {
                locations: 3,
                coordinates: 2,
            })
        );
    }

    #[rstest]
    #[case(vec![0, 1], ValidationError::IndexCountMismatch { expected: 3, actual: 2 })]
    #[case(vec![0, 2, 1, 0], ValidationError::IndexCountMismatch { expected: 3, actual: 4 })]
    #[case(vec![0, 3, 1], ValidationError::IndexOutOfRange { index: 3, len: 3 })]
    #[case(vec![0, -1, 1], ValidationError::IndexOutOfRange { index: -1, len: 3 })]
    #[case(vec![2, 0, 2], ValidationError::DuplicateIndex { index: 2 })]
    fn rejects_non_permutations(
        mut three_cities: OptimizationResult,
        #[case] indices: Vec<i64>,
        #[case] expected: ValidationError,
    ) {
        three_cities.optimized_route_indices = indices;
        assert_eq!(validate(three_cities), Err(expected));
    }

    #[rstest]
    fn rejects_non_finite_coordinates(mut three_cities: OptimizationResult) {
        three_cities.coordinates[1] = Position::new(f64::NAN, 78.0);
        assert_eq!(
            validate(three_cities),
            Err(ValidationError::NonFiniteCoordinate { index: 1 })
        );
    }

    #[rstest]
    fn rejects_out_of_range_coordinates(mut three_cities: OptimizationResult) {
        three_cities.coordinates[2] = Position::new(126.9, 75.8);
        assert_eq!(
            validate(three_cities),
            Err(ValidationError::CoordinateOutOfRange { index: 2 })
        );
    }

    #[rstest]
    fn rejects_non_finite_geometry(three_cities: OptimizationResult) {
        let result = three_cities.with_road_geometry(vec![
            Position::new(28.6, 77.2),
            Position::new(f64::INFINITY, 77.0),
        ]);
        assert_eq!(
            validate(result),
            Err(ValidationError::NonFiniteGeometry { index: 1 })
        );
    }

    #[rstest]
    fn locations_keep_original_pairing(three_cities: OptimizationResult) {
        let validated = validate(three_cities).expect("valid result");
        let pairs: Vec<_> = validated.locations().collect();
        assert_eq!(pairs[2], ("Jaipur, India", Position::new(26.9, 75.8)));
    }
}
