//! Tests for the agglomerative clustering API.

mod common;

use common::{chain_dataset, line_dataset, scalar_clusters};
use dendro_core::{
    AgglomerativeBuilder, Cluster, DendroError, Distance, DistanceError, EmptyInputPolicy,
    Linkage, LinkageMethod, Metric, Point, PointDistance, hierarchical_clustering,
};
use dendro_test_support::tracing::record;
use rstest::{fixture, rstest};
use tracing::Level;

#[fixture]
fn line() -> Vec<Point> {
    line_dataset()
}

#[rstest]
fn builder_defaults() {
    let builder = AgglomerativeBuilder::new();
    assert_eq!(*builder.metric(), Metric::Euclidean);
    assert_eq!(*builder.linkage(), LinkageMethod::Complete);
    assert_eq!(builder.empty_input_policy(), EmptyInputPolicy::SinglePartition);

    let engine = builder.clone().build();
    assert_eq!(*engine.metric(), Metric::Euclidean);
    assert_eq!(*engine.linkage(), LinkageMethod::Complete);
}

#[rstest]
fn complete_link_on_line_dataset_matches_reference(line: Vec<Point>) {
    let dendrogram = hierarchical_clustering(line, &Metric::Euclidean, &LinkageMethod::Complete)
        .expect("clustering must succeed");

    assert_eq!(dendrogram.len(), 11);
    let counts: Vec<usize> = dendrogram
        .iter()
        .map(|step| step.partition().cluster_count())
        .collect();
    assert_eq!(counts, (1..=11).rev().collect::<Vec<_>>());

    let initial = dendrogram.initial_partition().expect("initial step exists");
    assert!(initial.iter().all(|cluster| cluster.size() == 1));
    assert!(dendrogram.get(0).and_then(|step| step.merge()).is_none());

    let first = dendrogram.get(1).expect("first merge exists");
    assert_eq!(
        scalar_clusters(first.partition()),
        vec![
            vec![-1.0],
            vec![-0.4],
            vec![1.0],
            vec![2.0],
            vec![3.1],
            vec![5.2],
            vec![9.9],
            vec![10.0],
            vec![12.5],
            vec![8.45, 8.5],
        ]
    );

    let merges: Vec<(usize, usize)> = dendrogram
        .merges()
        .map(|merge| (merge.left(), merge.right()))
        .collect();
    assert_eq!(
        merges,
        vec![
            (6, 7),
            (6, 7),
            (0, 1),
            (0, 1),
            (3, 4),
            (0, 1),
            (1, 2),
            (0, 1),
            (0, 1),
            (0, 1),
        ]
    );

    let heights: Vec<f64> = dendrogram
        .merges()
        .map(|merge| merge.distance().value())
        .collect();
    let expected = [0.05, 0.1, 0.6, 1.0, 1.55, 2.1, 3.0, 4.05, 6.2, 13.5];
    for (height, expected) in heights.iter().zip(expected) {
        assert!((height - expected).abs() < 1e-9, "{height} != {expected}");
    }

    let last = dendrogram.final_partition().expect("final step exists");
    assert_eq!(
        scalar_clusters(last),
        vec![vec![
            12.5, 8.45, 8.5, 9.9, 10.0, 3.1, 5.2, -1.0, -0.4, 1.0, 2.0
        ]]
    );
}

#[rstest]
fn close_pair_merges_before_joining_neighbour(line: Vec<Point>) {
    let dendrogram = hierarchical_clustering(line, &Metric::Euclidean, &LinkageMethod::Complete)
        .expect("clustering must succeed");

    let holds = |partition: &dendro_core::Partition, values: &[f64]| {
        scalar_clusters(partition)
            .iter()
            .any(|cluster| values.iter().all(|value| cluster.contains(value)))
    };
    let pair_step = dendrogram
        .iter()
        .position(|step| holds(step.partition(), &[8.45, 8.5]))
        .expect("8.45 and 8.5 eventually share a cluster");
    let neighbour_step = dendrogram
        .iter()
        .position(|step| holds(step.partition(), &[8.5, 9.9]))
        .expect("8.5 and 9.9 eventually share a cluster");
    assert!(pair_step < neighbour_step);
}

#[rstest]
fn single_link_chains_where_complete_link_splits() {
    let single = hierarchical_clustering(chain_dataset(), &Metric::Euclidean, &LinkageMethod::Single)
        .expect("single-link must succeed");
    let complete =
        hierarchical_clustering(chain_dataset(), &Metric::Euclidean, &LinkageMethod::Complete)
            .expect("complete-link must succeed");

    let single_three = single.partition_with(3).expect("three-cluster cut exists");
    let complete_three = complete.partition_with(3).expect("three-cluster cut exists");

    assert_eq!(
        scalar_clusters(single_three),
        vec![vec![3.75], vec![5.5], vec![2.25, 0.0, 1.0]]
    );
    assert_eq!(
        scalar_clusters(complete_three),
        vec![vec![5.5], vec![0.0, 1.0], vec![2.25, 3.75]]
    );
}

#[rstest]
fn average_link_merge_heights_lie_between_single_and_complete() {
    let run = |linkage: LinkageMethod| {
        hierarchical_clustering(chain_dataset(), &Metric::Euclidean, &linkage)
            .expect("clustering must succeed")
            .merges()
            .map(|merge| merge.distance().value())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(LinkageMethod::Single), vec![1.0, 1.25, 1.5, 1.75]);
    assert_eq!(run(LinkageMethod::Complete), vec![1.0, 1.5, 3.25, 5.5]);
    let average = run(LinkageMethod::Average);
    assert_eq!(&average[..3], &[1.0, 1.5, 2.5]);
    assert!((average[3] - 10.0 / 3.0).abs() < 1e-12);
}

#[rstest]
fn metric_choice_changes_merge_order() {
    let points = || [[0.0, 0.0], [3.0, 0.0], [2.0, 2.0]];
    let first_merge = |metric: Metric| {
        let dendrogram = hierarchical_clustering(points(), &metric, &LinkageMethod::Complete)
            .expect("clustering must succeed");
        let merge = dendrogram.merges().next().copied().expect("one merge at least");
        (merge.left(), merge.right())
    };

    assert_eq!(first_merge(Metric::Euclidean), (1, 2));
    assert_eq!(first_merge(Metric::Manhattan), (0, 1));
}

#[rstest]
#[case::complete(LinkageMethod::Complete)]
#[case::single(LinkageMethod::Single)]
#[case::average(LinkageMethod::Average)]
fn coordinates_near_f64_limits_still_merge(#[case] linkage: LinkageMethod) {
    let dendrogram = hierarchical_clustering(
        [[1e300], [0.0], [-1e300]],
        &Metric::Euclidean,
        &linkage,
    )
    .expect("finite coordinates must cluster");

    assert_eq!(dendrogram.len(), 3);
    let first = dendrogram.merges().next().expect("a merge happened");
    assert_eq!((first.left(), first.right()), (0, 1));
    assert_eq!(first.distance().value(), 1e300);
    assert!(dendrogram.merges().all(|merge| merge.distance().value().is_finite()));
}

#[rstest]
fn ties_resolve_to_first_pair_in_scan_order() {
    let dendrogram = hierarchical_clustering(
        [[0.0], [10.0], [1.0], [11.0]],
        &Metric::Euclidean,
        &LinkageMethod::Single,
    )
    .expect("clustering must succeed");

    let step = dendrogram.get(1).expect("first merge exists");
    assert_eq!(
        scalar_clusters(step.partition()),
        vec![vec![10.0], vec![11.0], vec![0.0, 1.0]]
    );
}

#[rstest]
fn single_point_yields_one_step() {
    let dendrogram = AgglomerativeBuilder::new()
        .build()
        .run([[4.2, 1.0]])
        .expect("clustering must succeed");

    assert_eq!(dendrogram.len(), 1);
    assert_eq!(dendrogram.merges().count(), 0);
    let only = dendrogram.final_partition().expect("one step exists");
    assert_eq!(only.cluster_count(), 1);
    assert_eq!(only.point_count(), 1);
}

#[rstest]
fn empty_input_yields_single_empty_partition_by_default() {
    let dendrogram = hierarchical_clustering(
        Vec::<Point>::new(),
        &Metric::Euclidean,
        &LinkageMethod::Complete,
    )
    .expect("empty input is accepted by default");

    assert_eq!(dendrogram.len(), 1);
    let only = dendrogram.final_partition().expect("one step exists");
    assert_eq!(only.cluster_count(), 0);
    assert_eq!(dendrogram.partition_with(0), Some(only));
}

#[rstest]
fn empty_input_rejected_when_configured() {
    let engine = AgglomerativeBuilder::new()
        .with_empty_input_policy(EmptyInputPolicy::Reject)
        .build();
    let err = engine
        .run(Vec::<Point>::new())
        .expect_err("empty input must be rejected");
    assert_eq!(err, DendroError::EmptyInput);
}

#[rstest]
#[case::euclidean(Metric::Euclidean)]
#[case::manhattan(Metric::Manhattan)]
fn mixed_dimensions_fail_with_invalid_input(#[case] metric: Metric) {
    let points = vec![Point::from([0.0]), Point::from([1.0, 2.0]), Point::from([3.0])];
    let err = hierarchical_clustering(points, &metric, &LinkageMethod::Complete)
        .expect_err("mismatched dimensions must fail");
    assert_eq!(
        err,
        DendroError::InvalidInput {
            error: DistanceError::DimensionMismatch { left: 1, right: 2 },
        }
    );
}

#[rstest]
fn mismatch_is_detected_lazily_on_first_comparison() {
    let calls = std::cell::Cell::new(0_usize);
    let counting = |left: &[f64], right: &[f64]| {
        calls.set(calls.get() + 1);
        Metric::Euclidean.distance(left, right)
    };
    let points = vec![Point::from([0.0]), Point::from([1.0]), Point::from([1.0, 1.0])];

    let err = hierarchical_clustering(points, &counting, &LinkageMethod::Single)
        .expect_err("third point has the wrong dimension");
    assert!(matches!(err, DendroError::InvalidInput { .. }));
    assert_eq!(calls.get(), 2, "the first pair is valid and measured first");
}

#[rstest]
fn non_finite_coordinates_fail_with_invalid_input() {
    let err = hierarchical_clustering(
        [[0.0], [f64::NAN]],
        &Metric::Euclidean,
        &LinkageMethod::Complete,
    )
    .expect_err("NaN coordinates must fail");
    assert!(matches!(
        err,
        DendroError::InvalidInput {
            error: DistanceError::NonFinite { index: 0, .. }
        }
    ));
}

#[rstest]
fn unreachable_clusters_are_reported() {
    let unreachable = |_: &[f64], _: &[f64]| Distance::new(f64::INFINITY);
    let err = hierarchical_clustering([[0.0], [1.0]], &unreachable, &LinkageMethod::Complete)
        .expect_err("no finite pair exists");
    assert_eq!(err, DendroError::NoMergeCandidate { clusters: 2 });
}

#[rstest]
fn custom_strategies_plug_into_builder(line: Vec<Point>) {
    let squared = |left: &[f64], right: &[f64]| -> Result<Distance, DistanceError> {
        let d = Metric::Euclidean.distance(left, right)?;
        Distance::new(d.value() * d.value())
    };
    let centroid_gap = |left: &Cluster, right: &Cluster, _: &dyn PointDistance| {
        let mean = |cluster: &Cluster| {
            cluster.iter().map(|point| point[0]).sum::<f64>() / cluster.size() as f64
        };
        Distance::new((mean(left) - mean(right)).abs())
    };

    let engine = AgglomerativeBuilder::new()
        .with_metric(squared)
        .with_linkage(centroid_gap)
        .build();
    assert_eq!(Linkage::name(engine.linkage()), "custom");

    let dendrogram = engine.run(line).expect("custom strategies must succeed");
    assert_eq!(dendrogram.len(), 11);
    let first = dendrogram.merges().next().expect("a merge happened");
    assert_eq!((first.left(), first.right()), (6, 7));
}

#[rstest]
fn partitions_are_independent_snapshots(line: Vec<Point>) {
    let dendrogram = hierarchical_clustering(line, &Metric::Euclidean, &LinkageMethod::Average)
        .expect("clustering must succeed");
    let partitions = dendrogram.clone().into_partitions();

    assert_eq!(partitions.len(), dendrogram.len());
    for (partition, step) in partitions.iter().zip(&dendrogram) {
        assert_eq!(partition, step.partition());
        assert_eq!(partition.point_count(), 11);
    }
}

#[rstest]
fn run_records_core_tracing(line: Vec<Point>) {
    let engine = AgglomerativeBuilder::new()
        .with_metric(Metric::Manhattan)
        .with_linkage(LinkageMethod::Single)
        .build();

    let (result, layer) = record(|| engine.run(line));
    let dendrogram = result.expect("run must succeed");
    assert_eq!(dendrogram.len(), 11);

    let span = layer.span("core.run").expect("core.run span must exist");
    assert_eq!(span.fields.get("points"), Some("11"));
    assert_eq!(span.fields.get("metric"), Some("manhattan"));
    assert_eq!(span.fields.get("linkage"), Some("single"));
    assert_eq!(span.fields.get("empty_input"), Some("SinglePartition"));

    let merges = layer.events_with_message(Level::DEBUG, "merged closest clusters");
    assert_eq!(merges.len(), 10);
    assert_eq!(merges[0].fields.get("step"), Some("1"));
    assert_eq!(merges[0].fields.get("left"), Some("6"));
    assert_eq!(merges[0].fields.get("right"), Some("7"));
    assert_eq!(merges[9].fields.get("clusters"), Some("1"));

    let done = layer.events_with_message(Level::INFO, "clustering completed");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].fields.get("steps"), Some("11"));
}

#[rstest]
fn empty_input_logs_warning() {
    let engine = AgglomerativeBuilder::new()
        .with_empty_input_policy(EmptyInputPolicy::Reject)
        .build();

    let (result, layer) = record(|| engine.run(Vec::<Point>::new()));
    assert_eq!(result, Err(DendroError::EmptyInput));

    let span = layer.span("core.run").expect("core.run span must exist");
    assert_eq!(span.fields.get("points"), Some("0"));
    assert_eq!(
        layer
            .events_with_message(Level::WARN, "input contains no points, returning error")
            .len(),
        1
    );
}
