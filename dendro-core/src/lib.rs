//! Dendro core library.
//!
//! Agglomerative (bottom-up) hierarchical clustering over fixed-dimension
//! numeric points. A run starts with every point in its own cluster,
//! repeatedly merges the closest pair of clusters and returns the full
//! [`Dendrogram`] of intermediate partitions so the caller can cut the tree at
//! any level.
//!
//! The point metric ([`PointDistance`]) and the linkage policy ([`Linkage`])
//! are independent strategy values: pick a built-in [`Metric`] and
//! [`LinkageMethod`], or pass closures.
//!
//! ```
//! use dendro_core::{LinkageMethod, Metric, hierarchical_clustering};
//!
//! let points = [[-1.0], [-0.4], [1.0], [2.0], [3.1], [5.2], [8.45], [8.5], [9.9], [10.0], [12.5]];
//! let dendrogram =
//!     hierarchical_clustering(points, &Metric::Euclidean, &LinkageMethod::Complete)?;
//! assert_eq!(dendrogram.len(), 11);
//! # Ok::<(), dendro_core::DendroError>(())
//! ```

mod agglomerative;
mod builder;
mod cluster;
mod dendrogram;
pub mod distance;
mod error;
pub mod linkage;
mod point;

pub use crate::{
    agglomerative::{Agglomerative, hierarchical_clustering},
    builder::{AgglomerativeBuilder, EmptyInputPolicy},
    cluster::Cluster,
    dendrogram::{Dendrogram, Merge, Partition, Step},
    distance::{
        Distance, DistanceError, Metric, PointDistance, VectorKind, euclidean_distance,
        manhattan_distance,
    },
    error::{DendroError, DendroErrorCode, DistanceErrorCode, Result},
    linkage::{Linkage, LinkageMethod, average_linkage, complete_linkage, single_linkage},
    point::Point,
};
