//! Distance primitives for built-in numeric metrics.
//!
//! Scalar implementations of the Euclidean and Manhattan distances, plus the
//! [`PointDistance`] seam that lets callers substitute their own metric. The
//! routines validate their inputs and surface detailed errors so a bad point
//! aborts a clustering run at the first comparison that touches it.

mod euclidean;
mod helpers;
mod manhattan;
mod metric;
mod types;

pub use self::euclidean::euclidean_distance;
pub use self::manhattan::manhattan_distance;
pub use self::metric::{Metric, PointDistance};
pub use self::types::{Distance, DistanceError, Result, VectorKind};
