//! Property-based tests for geometry primitives (P9).

use kopt_tsp::geometry::{box_maker, length, Rectangle};
use proptest::prelude::*;

prop_compose! {
    fn arb_coord()(x in -1000.0..1000.0, y in -1000.0..1000.0) -> (f64, f64) {
        (x, y)
    }
}

prop_compose! {
    fn arb_rectangle()(
        x in -500.0..500.0,
        y in -500.0..500.0,
        width in 1.0..500.0,
        height in 1.0..500.0
    ) -> Rectangle {
        Rectangle { x, y, width, height }
    }
}

proptest! {
    #[test]
    fn test_length_is_symmetric((ax, ay) in arb_coord(), (bx, by) in arb_coord()) {
        prop_assert_eq!(length(ax, ay, bx, by), length(bx, by, ax, ay));
    }

    #[test]
    fn test_length_is_non_negative((ax, ay) in arb_coord(), (bx, by) in arb_coord()) {
        prop_assert!(length(ax, ay, bx, by) >= 0);
    }

    #[test]
    fn test_length_to_self_is_zero((ax, ay) in arb_coord()) {
        prop_assert_eq!(length(ax, ay, ax, ay), 0);
    }

    #[test]
    fn test_box_maker_contains_center(x in -500.0..500.0, y in -500.0..500.0, radius in 0.1..200.0) {
        let rect = box_maker(x, y, radius);
        prop_assert!(rect.contains(x, y));
    }

    #[test]
    fn test_rectangle_contains_its_own_center(rect in arb_rectangle()) {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        prop_assert!(rect.contains(cx, cy));
    }

    #[test]
    fn test_rectangle_intersects_self(rect in arb_rectangle()) {
        prop_assert!(rect.intersects(&rect));
    }

    #[test]
    fn test_rectangle_intersects_symmetric(r1 in arb_rectangle(), r2 in arb_rectangle()) {
        prop_assert_eq!(r1.intersects(&r2), r2.intersects(&r1));
    }
}
