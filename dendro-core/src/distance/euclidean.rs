use crate::distance::helpers::{sum_axes, validated_pair};
use crate::distance::types::{Distance, Result};

/// Computes the Euclidean distance between two points.
///
/// Differences are scaled by the largest per-axis gap before squaring, so
/// finite coordinates near the `f64` limits do not overflow to infinity.
///
/// # Examples
///
/// ```
/// use dendro_core::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance.value() - 50.0_f64.sqrt()).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`crate::DistanceError::DimensionMismatch`] when input lengths differ.
/// - [`crate::DistanceError::NonFinite`] when a value is NaN or infinite.
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<Distance> {
    let (left, right) = validated_pair(left, right)?;
    let scale = left
        .iter()
        .zip(right.iter())
        .map(|(l, r)| (l - r).abs())
        .fold(0.0_f64, f64::max);
    if scale <= 0.0 {
        return Ok(Distance::ZERO);
    }
    // The gap itself exceeds `f64::MAX`.
    if scale.is_infinite() {
        return Ok(Distance::from_raw(f64::INFINITY));
    }
    let sum = sum_axes(&left, &right, |l, r| {
        let ratio = (l - r) / scale;
        ratio * ratio
    });
    Ok(Distance::from_raw(scale * sum.sqrt()))
}
