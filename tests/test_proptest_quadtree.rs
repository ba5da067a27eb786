//! Property-based tests for the point index (P7).

use kopt_tsp::geometry::{box_maker, Domain, PointSet};
use kopt_tsp::quadtree::PointIndex;
use proptest::prelude::*;

prop_compose! {
    fn arb_point_set()(coords in prop::collection::vec((0.0..500.0, 0.0..500.0), 2..40)) -> PointSet {
        let xs = coords.iter().map(|&(x, _)| x).collect();
        let ys = coords.iter().map(|&(_, y)| y).collect();
        PointSet::new(xs, ys)
    }
}

proptest! {
    #[test]
    fn test_query_never_returns_the_center_point(points in arb_point_set(), radius in 1.0..2000.0) {
        let domain = Domain::from_points(&points);
        let index = PointIndex::build(&points, &domain, 12).unwrap();

        for center in 0..points.len() {
            let (cx, cy) = points.coords(center);
            let found = index.get_points(center, &box_maker(cx, cy, radius), &points);
            prop_assert!(!found.contains(&center));
        }
    }

    #[test]
    fn test_query_agrees_with_brute_force(points in arb_point_set(), radius in 1.0..2000.0) {
        let domain = Domain::from_points(&points);
        let index = PointIndex::build(&points, &domain, 12).unwrap();

        for center in 0..points.len() {
            let (cx, cy) = points.coords(center);
            let query = box_maker(cx, cy, radius);
            let mut expected: Vec<usize> = (0..points.len())
                .filter(|&p| p != center)
                .filter(|&p| {
                    let (x, y) = points.coords(p);
                    query.contains(x, y)
                })
                .collect();
            let mut actual = index.get_points(center, &query, &points);
            expected.sort();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }
    }
}
