use crate::distance::helpers::{sum_axes, validated_pair};
use crate::distance::types::{Distance, Result};

/// Computes the Manhattan (taxicab) distance between two points.
///
/// # Examples
///
/// ```
/// use dendro_core::{DistanceError, manhattan_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = manhattan_distance(&[0.0, 0.0], &[3.0, -4.0])?;
///     assert_eq!(distance.value(), 7.0);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`crate::DistanceError::DimensionMismatch`] when input lengths differ.
/// - [`crate::DistanceError::NonFinite`] when a value is NaN or infinite.
pub fn manhattan_distance(left: &[f64], right: &[f64]) -> Result<Distance> {
    let (left, right) = validated_pair(left, right)?;
    let sum = sum_axes(&left, &right, |l, r| (l - r).abs());
    Ok(Distance::from_raw(sum))
}
