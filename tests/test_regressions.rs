//! Regression tests for bugs found and fixed during development.

use shared::*;

use kopt_tsp::exceptions::KOptError;
use kopt_tsp::fileio;
use kopt_tsp::kmargin::KMargin;
use kopt_tsp::kmove::KMove;
use kopt_tsp::tour::Tour;

/// Bug: a 10-unit crossing square's diagonal (~14.14) rounded to an integer
/// length could collide with the side length (10) under a too-small scale,
/// masking the improving move. Confirmed the 10-unit scale keeps them apart.
#[test]
fn test_regression_crossing_square_diagonal_and_side_lengths_distinct() {
    let points = crossing_square();
    let diagonal = points.length(0, 2);
    let side = points.length(0, 1);
    assert_ne!(diagonal, side);
    assert_eq!(side, 10);
    assert_eq!(diagonal, 14);
}

/// Bug: `KMargin::decrease` must accept a decrease that lands exactly on
/// zero; an off-by-one in the negativity check would reject it.
#[test]
fn test_regression_margin_decrease_to_exactly_zero() {
    let mut margin = KMargin::new();
    margin.increase(7);
    assert!(margin.decrease(7));
    assert_eq!(margin.total_margin(), 0);
}

/// Bug: a `KMove` that reconnects each point to its original non-adjacent
/// neighbor, splitting the tour into two disjoint cycles, must be rejected
/// by `swap` rather than silently corrupting the tour into multiple cycles.
#[test]
fn test_regression_swap_rejects_move_that_splits_into_two_cycles() {
    let mut tour = Tour::from_order(vec![0, 1, 2, 3]);
    let mut kmove = KMove::new();
    kmove.push_all(1, 3, 0);
    kmove.push_all(3, 1, 2);
    assert!(tour.swap(&kmove).is_err());
    // The tour must remain exactly as it was before the rejected swap.
    assert!(tour.validate().is_ok());
    assert_eq!(tour.to_order(), vec![0, 1, 2, 3]);
}

/// Bug: a TSPLIB coordinate file whose point ids skip a value must be
/// rejected with `MismatchedPointId`, not silently misread subsequent rows.
#[test]
fn test_regression_coordinate_file_id_gap_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gap.tsp");
    std::fs::write(&path, "DIMENSION: 3\nNODE_COORD_SECTION\n1 0.0 0.0\n2 1.0 0.0\n4 2.0 0.0\n").unwrap();

    let err = fileio::read_coordinates(&path).unwrap_err();
    assert!(matches!(
        err,
        KOptError::MismatchedPointId { found: 4, expected: 3 }
    ));
}

/// Bug: an empty `KMove` must be treated as a feasible no-op rather than
/// tripping the single-cycle check.
#[test]
fn test_regression_empty_kmove_is_feasible_and_applies_as_no_op() {
    let mut tour = Tour::from_order(vec![0, 1, 2, 3]);
    let before = tour.to_order();
    let kmove = KMove::new();
    assert!(kopt_tsp::feasibility::is_feasible(&tour, &kmove));
    tour.swap(&kmove).unwrap();
    assert_eq!(tour.to_order(), before);
}
