//! Concrete scenarios from the search-correctness contract (S1-S8).

use shared::*;

use kopt_tsp::feasibility::is_feasible;
use kopt_tsp::finder::Finder;
use kopt_tsp::geometry::{length, Domain};
use kopt_tsp::morton::interleave_coordinates;
use kopt_tsp::quadtree::PointIndex;
use kopt_tsp::tour::Tour;
use tracing::info;

/// S1: a crossing unit-square tour uncrosses to the perimeter order, length 4.
#[test]
fn test_s1_unit_square_uncrosses() {
    let points = unit_square();
    let tour = Tour::from_order(vec![0, 2, 1, 3]);
    let index = build_index(&points);
    let finder = Finder::new(&tour, &points, &index, 5);

    let kmove = finder.find_best().expect("crossing tour must have an improving move");
    let mut fixed = tour.clone();
    fixed.swap(&kmove).unwrap();
    assert!(fixed.validate().is_ok());
    assert_eq!(total_length(&fixed, &points), 4);
    info!(length = 4, "S1 uncrossed to the optimal perimeter tour");
}

/// S2: a convex pentagon visited in hull order has no improving move.
#[test]
fn test_s2_convex_pentagon_is_already_optimal() {
    let points = convex_pentagon();
    let tour = Tour::from_order((0..points.len()).collect());
    let index = build_index(&points);
    let finder = Finder::new(&tour, &points, &index, 5);
    assert!(finder.find_best().is_none());
}

/// S3: two stacked triangles need a deeper move than plain 2-opt; a
/// restricted kmax=2 search must not find what a kmax=3 search does.
#[test]
fn test_s3_stacked_triangles_need_depth_three() {
    // Two triangles sharing a base, visited in an order that only
    // untangles via a 3-edge exchange: base (0,0)-(6,0), apexes (3,4) and
    // (3,-4), with the cyclic order deliberately threading the apexes out
    // of sequence.
    let points = kopt_tsp::geometry::PointSet::new(
        vec![0.0, 6.0, 3.0, 3.0, 0.0, 6.0],
        vec![0.0, 0.0, 4.0, -4.0, 4.0, -4.0],
    );
    let tour = Tour::from_order(vec![0, 2, 1, 3, 4, 5]);
    let domain = Domain::from_points(&points);
    let index = PointIndex::build(&points, &domain, 16).unwrap();

    let shallow = Finder::new(&tour, &points, &index, 2);
    let deep = Finder::new(&tour, &points, &index, 3);

    assert!(shallow.find_best().is_none(), "kmax=2 must not find the deeper move");

    let deep_move = deep.find_best().expect("kmax=3 must find the 3-opt move kmax=2 cannot reach");
    assert!(is_feasible(&tour, &deep_move));
}

/// S4: Morton key at the origin is 0; at the far corner, all bits set
/// within the configured depth.
#[test]
fn test_s4_morton_key_extremes() {
    let depth = 16;
    assert_eq!(interleave_coordinates(0.0, 0.0, depth), 0);
    let far = interleave_coordinates(1.0 - 1e-9, 1.0 - 1e-9, depth);
    let expected_bits = 2 * (depth - 1);
    assert_eq!(far, (1u64 << expected_bits) - 1);
}

/// S5: exact and rounded TSPLIB EUC_2D lengths.
#[test]
fn test_s5_euc_2d_length_examples() {
    assert_eq!(length(0.0, 0.0, 3.0, 4.0), 5);
    assert_eq!(length(0.0, 0.0, 1.0, 1.0), 1);
}

/// S6: applying a feasible move on a 10-point tour shortens it by exactly
/// the removed-minus-added delta and leaves the invariants intact.
#[test]
fn test_s6_swap_shortens_by_exact_margin() {
    let points = random_points(10, 100.0, 99);
    let tour = Tour::from_order((0..10).collect());
    let index = build_index(&points);
    let finder = Finder::new(&tour, &points, &index, 5);

    let Some(kmove) = finder.find_best() else {
        return;
    };
    let removed: i64 = kmove.removes().iter().map(|&anchor| tour.length(anchor, &points)).sum();
    let added: i64 = kmove
        .starts()
        .iter()
        .zip(kmove.ends())
        .map(|(&s, &e)| points.length(s, e))
        .sum();

    let before = total_length(&tour, &points);
    let mut after_tour = tour.clone();
    after_tour.swap(&kmove).unwrap();
    assert!(after_tour.validate().is_ok());
    let after = total_length(&after_tour, &points);
    assert_eq!(before - after, removed - added);
}

/// S7: a coordinate file with a gap in the id sequence is rejected with a
/// structured error, never a panic.
#[test]
fn test_s7_malformed_coordinate_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gap.tsp");
    std::fs::write(&path, "DIMENSION: 2\nNODE_COORD_SECTION\n1 0.0 0.0\n3 1.0 1.0\n").unwrap();

    let err = kopt_tsp::fileio::read_coordinates(&path).unwrap_err();
    assert!(matches!(
        err,
        kopt_tsp::exceptions::KOptError::MismatchedPointId { found: 3, expected: 2 }
    ));
}

/// S8: a tour file round-tripped through write-then-read reproduces the
/// same cyclic order.
#[test]
fn test_s8_tour_file_round_trip() {
    let order: Vec<usize> = vec![3, 0, 4, 1, 2, 6, 5, 7, 9, 8];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tour.txt");
    kopt_tsp::fileio::write_ordered_points(&order, &path).unwrap();
    let read_back = kopt_tsp::fileio::read_ordered_points(&path).unwrap();
    assert_eq!(read_back, order);
}
