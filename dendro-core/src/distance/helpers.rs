//! Shared helpers for distance implementations.

use super::types::{Coordinates, DistanceError, Result, VectorKind};

/// Validates both points and ensures they share the same dimensionality.
pub(crate) fn validated_pair<'a>(
    left: &'a [f64],
    right: &'a [f64],
) -> Result<(Coordinates<'a>, Coordinates<'a>)> {
    let left = Coordinates::new(left, VectorKind::Left)?;
    let right = Coordinates::new(right, VectorKind::Right)?;
    if left.dimension() != right.dimension() {
        return Err(DistanceError::DimensionMismatch {
            left: left.dimension(),
            right: right.dimension(),
        });
    }
    Ok((left, right))
}

/// Sums `per_axis` over every coordinate pair.
pub(crate) fn sum_axes(
    left: &Coordinates<'_>,
    right: &Coordinates<'_>,
    per_axis: impl Fn(f64, f64) -> f64,
) -> f64 {
    left.iter()
        .zip(right.iter())
        .map(|(&l, &r)| per_axis(l, r))
        .sum()
}
