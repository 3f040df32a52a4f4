use super::*;
use core::num::NonZeroUsize;
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::{Point, QuadtreeConfig};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn capacity(n: usize) -> QuadtreeConfig {
    QuadtreeConfig::new().with_leaf_capacity(NonZeroUsize::new(n).unwrap())
}

fn brute_force<V, C: crate::Coordinate>(points: &[(Point<C>, V)], query: Point<C>) -> Option<f64> {
    points
        .iter()
        .map(|(p, _)| p.distance_to(query))
        .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |best| best.min(d))))
}

#[test]
fn nearest_prefers_the_closer_point() {
    init_logger();
    let mut tree = Quadtree::new(Point::new(0, 100), Point::new(100, 0));
    tree.insert(Point::new(50, 49), "A").unwrap();
    tree.insert(Point::new(59, 39), "B").unwrap();
    assert_eq!(tree.nearest(Point::new(50, 50)), Some(&"A"));
}

#[test]
fn nearest_among_three() {
    let mut tree = Quadtree::new(Point::new(0, 50), Point::new(50, 0));
    tree.insert(Point::new(30, 8), "bad").unwrap();
    tree.insert(Point::new(25, 9), "bad").unwrap();
    tree.insert(Point::new(26, 9), "good").unwrap();
    assert_eq!(tree.nearest(Point::new(27, 10)), Some(&"good"));
}

#[test]
fn good_point_in_the_corner() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut tree = Quadtree::with_config(Point::new(0, 50), Point::new(50, 0), capacity(4));
    for _ in 0..100 {
        let point = Point::new(rng.gen_range(0..=48), rng.gen_range(0..=48));
        tree.insert(point, "bad").unwrap();
    }
    tree.insert(Point::new(49, 49), "good").unwrap();
    assert!(tree.root().is_branch());
    assert_eq!(tree.len(), 101);
    assert_eq!(tree.nearest(Point::new(50, 50)), Some(&"good"));
}

#[test]
fn empty_tree_finds_nothing() {
    let tree = Quadtree::<u8>::new(Point::new(0, 100), Point::new(100, 0));
    for query in [
        Point::new(0, 0),
        Point::new(50, 50),
        Point::new(100, 100),
        Point::new(-1000, 1000),
    ] {
        assert_eq!(tree.nearest(query), None);
        assert!(tree.root().search(query, None).is_none());
    }
    assert_eq!(tree.leaves().count(), 0);
}

#[test]
fn exact_match_is_its_own_nearest() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut tree = Quadtree::new(Point::new(0, 30), Point::new(30, 0));
    let mut points = Vec::new();
    for i in 0..400_usize {
        // A small region makes duplicates likely.
        let point = Point::new(rng.gen_range(0..=30), rng.gen_range(0..=30));
        tree.insert(point, i).unwrap();
        points.push(point);
        let found = tree.nearest_leaf(point).unwrap();
        assert_eq!(found.point(), point);
        let first = points.iter().position(|&p| p == point).unwrap();
        assert_eq!(*found.value(), first, "first inserted duplicate must win");
    }
}

#[test]
fn duplicates_survive_splits_in_order() {
    init_logger();
    let mut tree = Quadtree::with_config(Point::new(0, 64), Point::new(64, 0), capacity(2));
    tree.insert(Point::new(10, 10), "first").unwrap();
    tree.insert(Point::new(10, 10), "second").unwrap();
    // These force several levels of splitting around the duplicates.
    for (i, &(x, y)) in [(11, 11), (12, 10), (9, 12), (60, 60), (30, 2)].iter().enumerate() {
        tree.insert(Point::new(x, y), if i % 2 == 0 { "even" } else { "odd" }).unwrap();
    }
    assert!(tree.root().is_branch());
    assert_eq!(tree.nearest(Point::new(10, 10)), Some(&"first"));
}

#[test]
fn equidistant_points_resolve_in_quadrant_order() {
    let mut tree = Quadtree::with_config(Point::new(0, 100), Point::new(100, 0), capacity(1));
    // Inserted out of quadrant order, so that insertion order and traversal order disagree.
    tree.insert(Point::new(60, 60), "ne").unwrap();
    tree.insert(Point::new(40, 60), "nw").unwrap();
    assert!(tree.root().is_branch());
    assert_eq!(tree.nearest(Point::new(50, 60)), Some(&"nw"));

    tree.insert(Point::new(40, 40), "sw").unwrap();
    assert_eq!(tree.nearest(Point::new(50, 50)), Some(&"nw"));

    let mut tree = Quadtree::with_config(Point::new(0, 100), Point::new(100, 0), capacity(1));
    tree.insert(Point::new(40, 40), "sw").unwrap();
    tree.insert(Point::new(60, 60), "ne").unwrap();
    assert_eq!(tree.nearest(Point::new(50, 50)), Some(&"ne"));
    tree.insert(Point::new(60, 40), "se").unwrap();
    assert_eq!(tree.nearest(Point::new(50, 50)), Some(&"ne"));
    assert_eq!(tree.nearest(Point::new(50, 40)), Some(&"sw"));
}

#[test]
fn huge_float_bounds_split_and_search() {
    let max = f64::MAX;
    let mut tree = Quadtree::with_config(Point::new(-max, max), Point::new(max, -max), capacity(1));
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1e300, 1e300),
        Point::new(-1e300, -1e300),
        Point::new(1e308, -1e308),
        Point::new(-1.5e308, 1.5e308),
    ];
    for (i, &point) in points.iter().enumerate() {
        tree.insert(point, i).unwrap();
    }
    assert!(tree.root().is_branch());
    for child in tree.root().children().unwrap() {
        let bounds = child.bounds();
        assert!(bounds.west() <= bounds.east() && bounds.south() <= bounds.north());
        assert!(tree.bounds().contains(bounds.northwest()));
        assert!(tree.bounds().contains(bounds.southeast()));
    }
    for (i, &point) in points.iter().enumerate() {
        assert_eq!(tree.nearest(point), Some(&i));
    }
}

#[test]
fn out_of_bounds_is_rejected_without_side_effects() {
    init_logger();
    let mut tree = Quadtree::new(Point::new(0, 10), Point::new(10, 0));
    for (i, &(x, y)) in [(5, 5), (1, 10), (5, 8), (3, 4), (7, 7)].iter().enumerate() {
        tree.insert(Point::new(x, y), i).unwrap();
    }
    let before: Vec<_> = tree.leaves().map(|leaf| (leaf.point(), *leaf.value())).collect();
    let node_count = tree.node_count();

    for &(x, y) in &[(20, 10), (-1, 5), (5, -1), (5, 11), (11, 11), (-1, -1), (11, 5)] {
        let point = Point::new(x, y);
        assert!(tree.route(point).is_none());
        let error = tree.insert(point, 99).unwrap_err();
        assert_eq!(error.point(), point);
        assert_eq!(error.bounds(), tree.bounds());
        assert_eq!(*error.value(), 99);
    }

    let after: Vec<_> = tree.leaves().map(|leaf| (leaf.point(), *leaf.value())).collect();
    assert_eq!(before, after);
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.node_count(), node_count);
}

#[test]
fn out_of_bounds_error_message() {
    let mut tree = Quadtree::new(Point::new(0, 10), Point::new(10, 0));
    let error = tree.insert(Point::new(20, 10), "fail").unwrap_err();
    assert_eq!(
        error.to_string(),
        "point (20, 10) is out of bounds of ((10,0),(0,10))",
    );
    let boxed: Box<dyn std::error::Error> = Box::new(error);
    assert!(boxed.source().is_none());
}

#[test]
fn routing_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut tree = Quadtree::new(Point::new(0, 200), Point::new(200, 0));
    for i in 0..300 {
        tree.insert(Point::new(rng.gen_range(0..=200), rng.gen_range(0..=200)), i).unwrap();
    }
    for _ in 0..100 {
        let query = Point::new(rng.gen_range(0..=200), rng.gen_range(0..=200));
        let first = tree.route(query).unwrap();
        let second = tree.route(query).unwrap();
        assert_eq!(first, second);
        assert!(first.is_leaf());
        assert!(first.bounds().contains(query));
    }
}

#[test]
fn split_routes_to_the_southwest() {
    let mut tree = Quadtree::new(Point::new(0, 10), Point::new(10, 0));
    tree.insert(Point::new(5, 5), "hello").unwrap();
    assert_eq!(tree.route(Point::new(1, 1)), Some(tree.root()));
    assert_eq!(tree.nearest_leaf(Point::new(0, 0)).unwrap().point(), Point::new(5, 5));

    tree.insert(Point::new(1, 10), "let's").unwrap();
    tree.insert(Point::new(5, 8), "cause").unwrap();
    tree.insert(Point::new(3, 4), "a").unwrap();
    tree.insert(Point::new(7, 7), "new level").unwrap();

    let node = tree.route(Point::new(1, 1)).unwrap();
    assert_eq!(node.bounds().to_string(), "((5,0),(0,5))");
    let leaves: Vec<_> = node.leaves().unwrap().iter().map(ToString::to_string).collect();
    assert_eq!(leaves, ["a at (3, 4)"]);
    assert_eq!(tree.nearest(Point::new(8, 6)), Some(&"new level"));
}

#[test]
fn subdivision_moves_every_leaf_to_exactly_one_child() {
    init_logger();
    let mut tree = Quadtree::new(Point::new(0, 10), Point::new(10, 0));
    let points = [
        Point::new(5, 5),
        Point::new(1, 10),
        Point::new(5, 8),
        Point::new(3, 4),
    ];
    for (i, &point) in points.iter().enumerate() {
        tree.insert(point, i).unwrap();
    }
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().leaves().map(<[_]>::len), Some(4));

    let overflow = Point::new(7, 7);
    tree.insert(overflow, 4).unwrap();

    let root = tree.root();
    assert!(root.is_branch());
    assert!(root.leaves().is_none());
    let children = root.children().unwrap();
    assert_eq!(children.iter().count(), 4);
    assert_eq!(tree.node_count(), 5);

    for &point in points.iter().chain(Some(&overflow)) {
        let holders: Vec<_> = children
            .iter()
            .filter(|child| child.leaves().unwrap().iter().any(|leaf| leaf.point() == point))
            .collect();
        assert_eq!(holders.len(), 1, "{} should live in exactly one child", point);
        let found = holders[0].search(point, None).unwrap();
        assert_eq!(found.point(), point);
    }
}

#[test]
fn small_nodes_never_split() {
    init_logger();
    let mut tree = Quadtree::new(Point::new(0, 4), Point::new(4, 0));
    for i in 0..40_i64 {
        tree.insert(Point::new(i % 5, (i / 5) % 5), i).unwrap();
    }
    let root = tree.root();
    assert!(root.is_leaf());
    assert_eq!(root.leaves().unwrap().len(), 40);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.nearest(Point::new(4, 4)), Some(&24));
}

#[test]
fn one_long_side_is_enough_to_split() {
    let mut tree = Quadtree::new(Point::new(0, 2), Point::new(40, 0));
    for x in 0..5 {
        tree.insert(Point::new(x * 10, 1), x).unwrap();
    }
    assert!(tree.root().is_branch());
}

#[test]
fn indivisible_nodes_stop_splitting() {
    init_logger();
    let config = capacity(1).with_min_region_size(0.0);
    // Identical points can never be separated, which must not send the tree into endless splits.
    let mut tree = Quadtree::with_config(Point::new(0, 10), Point::new(10, 0), config);
    for i in 0..10 {
        tree.insert(Point::new(3, 3), i).unwrap();
    }
    let node = tree.route(Point::new(3, 3)).unwrap();
    assert_eq!(node.leaves().unwrap().len(), 10);
    assert!(node.bounds().width() <= 1.0 && node.bounds().height() <= 1.0);
    assert_eq!(tree.nearest(Point::new(3, 3)), Some(&0));

    let mut tree = Quadtree::with_config(Point::new(0.0, 1.0), Point::new(1.0, 0.0), config);
    for i in 0..10 {
        tree.insert(Point::new(0.25, 0.25), i).unwrap();
    }
    assert_eq!(tree.nearest(Point::new(0.0, 0.0)), Some(&0));
}

#[test]
fn border_points_route_to_the_first_quadrant() {
    let mut tree = Quadtree::with_config(Point::new(0, 100), Point::new(100, 0), capacity(1));
    tree.insert(Point::new(50, 50), "centre").unwrap();
    assert_eq!(tree.nearest(Point::new(0, 0)), Some(&"centre"));
    tree.insert(Point::new(90, 10), "corner").unwrap();

    let root = tree.root();
    assert!(root.is_branch());
    let quadrant = |q| root.child(q).unwrap();
    assert_eq!(
        quadrant(Quadrant::NorthWest).bounds().to_string(),
        "((100,0),(50,50))",
    );

    let cases = [
        ((50, 50), Quadrant::NorthWest),
        ((0, 50), Quadrant::NorthWest),
        ((50, 100), Quadrant::NorthWest),
        ((0, 70), Quadrant::NorthWest),
        ((100, 50), Quadrant::NorthEast),
        ((50, 0), Quadrant::SouthWest),
        ((50, 20), Quadrant::SouthWest),
        ((70, 50), Quadrant::NorthEast),
        ((70, 20), Quadrant::SouthEast),
    ];
    for &((x, y), expected) in &cases {
        assert_eq!(
            tree.route(Point::new(x, y)),
            Some(quadrant(expected)),
            "({}, {}) should route to {:?}",
            x,
            y,
            expected,
        );
    }
    let northwest = quadrant(Quadrant::NorthWest).leaves().unwrap();
    assert_eq!(northwest.len(), 1);
    assert_eq!(northwest[0].value(), &"centre");
}

#[test]
fn appending_to_a_branch_is_an_invariant_violation() {
    let mut tree = Quadtree::with_config(Point::new(0, 100), Point::new(100, 0), capacity(1));
    tree.insert(Point::new(10, 10), 0).unwrap();
    tree.insert(Point::new(90, 90), 1).unwrap();
    let root = tree.root;
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        tree.nodes[root].push_leaf(Leaf::new(Point::new(4, 4), 2))
    }));
    assert!(result.is_err());
}

#[test]
fn search_respects_the_incoming_bound() {
    let mut tree = Quadtree::new(Point::new(0, 100), Point::new(100, 0));
    for i in 0..50 {
        tree.insert(Point::new(i * 2, 100 - i * 2), i).unwrap();
    }
    let root = tree.root();
    let query = Point::new(51, 51);
    // Nothing beats a distance of zero.
    assert!(root.search(query, Some(0.0)).is_none());
    let best = root.search(query, None).unwrap();
    let distance = best.point().distance_to(query);
    assert!(root.search(query, Some(distance)).is_none());
    assert_eq!(root.search(query, Some(distance + 1.0)), Some(best));
}

#[test]
fn nearest_matches_brute_force() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut tree = Quadtree::with_config(Point::new(-500, 500), Point::new(500, -500), capacity(6));
    let mut points = Vec::new();
    for i in 0..2000_u32 {
        let point = Point::new(rng.gen_range(-500..=500), rng.gen_range(-500..=500));
        tree.insert(point, i).unwrap();
        points.push((point, i));
    }
    assert_eq!(tree.len(), points.len());
    for _ in 0..500 {
        // Queries deliberately reach outside of the tree's bounds.
        let query = Point::new(rng.gen_range(-700..=700), rng.gen_range(-700..=700));
        let found = tree.nearest_leaf(query).unwrap();
        assert_eq!(Some(found.point().distance_to(query)), brute_force(&points, query));
    }
}

#[test]
fn nearest_matches_brute_force_with_floats() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = QuadtreeConfig::new().with_min_region_size(0.01);
    let mut tree = Quadtree::with_config(Point::new(0.0, 1.0), Point::new(1.0, 0.0), config);
    let mut points = Vec::new();
    for i in 0..1000 {
        let point = Point::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
        tree.insert(point, i).unwrap();
        points.push((point, i));
    }
    for _ in 0..200 {
        let query = Point::new(rng.gen_range(-0.5..1.5), rng.gen_range(-0.5..1.5));
        let found = tree.nearest_leaf(query).unwrap();
        assert_eq!(Some(found.point().distance_to(query)), brute_force(&points, query));
    }
}

#[test]
fn leaves_visits_everything_once() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut tree = Quadtree::new(Point::new(0, 100), Point::new(100, 0));
    for i in 0..250_usize {
        tree.insert(Point::new(rng.gen_range(0..=100), rng.gen_range(0..=100)), i).unwrap();
    }
    let mut seen: Vec<_> = tree.leaves().map(|leaf| *leaf.value()).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..250).collect::<Vec<_>>());
    for leaf in tree.leaves() {
        let node = tree.route(leaf.point()).unwrap();
        assert!(node.leaves().unwrap().contains(leaf));
    }
}

#[test]
fn leaves_keep_insertion_order_within_a_node() {
    let mut tree = Quadtree::new(Point::new(0, 100), Point::new(100, 0));
    for (i, &(x, y)) in [(9, 9), (1, 1), (5, 5)].iter().enumerate() {
        tree.insert(Point::new(x, y), i).unwrap();
    }
    let order: Vec<_> = tree.leaves().map(|leaf| *leaf.value()).collect();
    assert_eq!(order, [0, 1, 2]);
}

#[test]
fn debug_output_shows_the_hierarchy() {
    let mut tree = Quadtree::with_config(Point::new(0, 100), Point::new(100, 0), capacity(1));
    tree.insert(Point::new(10, 10), "sw").unwrap();
    tree.insert(Point::new(90, 90), "ne").unwrap();
    let rendered = format!("{:?}", tree);
    assert!(rendered.starts_with("Quadtree"));
    assert!(rendered.contains("children"));
    assert!(rendered.contains("\"sw\""));
    assert!(rendered.contains("\"ne\""));
}

#[test]
fn quadrants_iterate_in_routing_order() {
    let quadrants = Quadrants::from([1, 2, 3, 4]);
    let order: Vec<_> = quadrants.enumerate().map(|(q, &v)| (q, v)).collect();
    assert_eq!(
        order,
        [
            (Quadrant::NorthWest, 1),
            (Quadrant::NorthEast, 2),
            (Quadrant::SouthWest, 3),
            (Quadrant::SouthEast, 4),
        ],
    );
    assert_eq!(quadrants.into_iter().rev().collect::<Vec<_>>(), [4, 3, 2, 1]);
    assert_eq!(*quadrants.get(Quadrant::SouthWest), 3);
}
