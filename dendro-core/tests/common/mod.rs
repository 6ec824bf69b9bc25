use dendro_core::{Partition, Point};

/// One-dimensional dataset with well separated groups of varying density.
pub fn line_dataset() -> Vec<Point> {
    [
        -1.0, -0.4, 1.0, 2.0, 3.1, 5.2, 8.45, 8.5, 9.9, 10.0, 12.5,
    ]
    .into_iter()
    .map(|value| Point::from([value]))
    .collect()
}

/// Evenly growing gaps that single-link chains together but complete-link
/// splits into pairs.
pub fn chain_dataset() -> Vec<Point> {
    [0.0, 1.0, 2.25, 3.75, 5.5]
        .into_iter()
        .map(|value| Point::from([value]))
        .collect()
}

/// Renders each cluster as the list of its scalar coordinates.
#[must_use]
pub fn scalar_clusters(partition: &Partition) -> Vec<Vec<f64>> {
    partition
        .iter()
        .map(|cluster| cluster.iter().map(|point| point[0]).collect())
        .collect()
}
