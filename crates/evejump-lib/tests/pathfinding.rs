use std::collections::HashSet;

use evejump_lib::{find_jump_path, SearchConstraints, SearchLimits};

mod common;
use common::starmap;

fn constraints(max_jump_range: f64, origin: i64) -> SearchConstraints {
    SearchConstraints {
        max_jump_range,
        avoided_systems: HashSet::new(),
        origin,
        limits: SearchLimits::default(),
    }
}

#[test]
fn trivial_path_is_a_single_node() {
    let map = starmap(&[(1, 2, 1.0)], &[(1, "Alpha", Some(-0.5))]);

    let result = find_jump_path(&map, 1, 1, &constraints(10.0, 1)).expect("trivial path");
    assert_eq!(result.path, vec![1]);
    assert!(result.segments.is_empty());
    assert_eq!(result.total_distance, 0.0);
}

#[test]
fn unknown_endpoints_yield_no_path() {
    let map = starmap(&[(1, 2, 1.0)], &[(1, "Alpha", Some(-0.5)), (2, "Beta", Some(-0.5))]);

    assert!(find_jump_path(&map, 1, 99, &constraints(10.0, 1)).is_none());
    assert!(find_jump_path(&map, 99, 1, &constraints(10.0, 99)).is_none());
}

#[test]
fn fewer_jumps_beat_shorter_distance() {
    // Two jumps totalling 3.0 ly against three jumps totalling 2.0 ly.
    let map = starmap(
        &[
            (1, 2, 1.5),
            (2, 3, 1.5),
            (1, 4, 0.5),
            (4, 5, 0.5),
            (5, 3, 1.0),
        ],
        &[
            (1, "Alpha", Some(-0.5)),
            (2, "Beta", Some(-0.5)),
            (3, "Gamma", Some(-0.5)),
            (4, "Delta", Some(-0.5)),
            (5, "Epsilon", Some(-0.5)),
        ],
    );

    let result = find_jump_path(&map, 1, 3, &constraints(10.0, 1)).expect("route exists");
    assert_eq!(result.path, vec![1, 2, 3]);
    assert_eq!(result.jump_count(), 2);
    assert!((result.total_distance - 3.0).abs() < 1e-12);
}

#[test]
fn distance_breaks_ties_between_equal_jump_counts() {
    let map = starmap(
        &[(1, 2, 2.0), (2, 4, 2.0), (1, 3, 1.0), (3, 4, 1.5)],
        &[
            (1, "Alpha", Some(-0.5)),
            (2, "Beta", Some(-0.5)),
            (3, "Gamma", Some(-0.5)),
            (4, "Delta", Some(-0.5)),
        ],
    );

    let result = find_jump_path(&map, 1, 4, &constraints(10.0, 1)).expect("route exists");
    assert_eq!(result.path, vec![1, 3, 4]);
    assert!((result.total_distance - 2.5).abs() < 1e-12);
}

#[test]
fn edges_beyond_jump_range_are_never_used() {
    let map = starmap(
        &[(1, 2, 6.0), (1, 3, 2.0), (3, 2, 2.0)],
        &[
            (1, "Alpha", Some(-0.5)),
            (2, "Beta", Some(-0.5)),
            (3, "Gamma", Some(-0.5)),
        ],
    );

    let short_range = find_jump_path(&map, 1, 2, &constraints(5.0, 1)).expect("detour exists");
    assert_eq!(short_range.path, vec![1, 3, 2]);
    assert!(short_range
        .segments
        .iter()
        .all(|segment| segment.light_years <= 5.0));

    let long_range = find_jump_path(&map, 1, 2, &constraints(10.0, 1)).expect("direct jump");
    assert_eq!(long_range.path, vec![1, 2]);
}

#[test]
fn no_path_when_every_edge_exceeds_range() {
    let map = starmap(
        &[(1, 2, 6.0)],
        &[(1, "Alpha", Some(-0.5)), (2, "Beta", Some(-0.5))],
    );

    assert!(find_jump_path(&map, 1, 2, &constraints(5.0, 1)).is_none());
}

#[test]
fn high_security_systems_are_not_traversed() {
    // The only intermediate is high-security, so the route is infeasible.
    let map = starmap(
        &[(1, 2, 1.0), (2, 3, 1.0)],
        &[
            (1, "Alpha", Some(-0.5)),
            (2, "Beta", Some(0.6)),
            (3, "Gamma", Some(-0.5)),
        ],
    );

    assert!(find_jump_path(&map, 1, 3, &constraints(10.0, 1)).is_none());
}

#[test]
fn high_security_goal_is_rejected_before_searching() {
    let map = starmap(
        &[(1, 2, 1.0)],
        &[(1, "Alpha", Some(-0.5)), (2, "Beta", Some(0.9))],
    );

    assert!(find_jump_path(&map, 1, 2, &constraints(10.0, 1)).is_none());
}

#[test]
fn missing_security_data_is_ineligible_not_wildcard() {
    let map = starmap(
        &[(1, 2, 1.0), (2, 3, 1.0)],
        &[(1, "Alpha", Some(-0.5)), (3, "Gamma", Some(-0.5))],
    );

    assert!(
        find_jump_path(&map, 1, 3, &constraints(10.0, 1)).is_none(),
        "system 2 has no security data and must not be routed through"
    );
}

#[test]
fn origin_is_exempt_from_the_security_rule() {
    // Leaving a high-security origin works, and later legs may pass back
    // through it.
    let map = starmap(
        &[(1, 2, 1.0), (1, 3, 1.0)],
        &[
            (1, "Alpha", Some(0.9)),
            (2, "Beta", Some(-0.5)),
            (3, "Gamma", Some(-0.5)),
        ],
    );

    let departure = find_jump_path(&map, 1, 2, &constraints(10.0, 1)).expect("departure leg");
    assert_eq!(departure.path, vec![1, 2]);

    let return_through_origin =
        find_jump_path(&map, 2, 3, &constraints(10.0, 1)).expect("transit through origin");
    assert_eq!(return_through_origin.path, vec![2, 1, 3]);
}

#[test]
fn avoided_systems_force_a_detour() {
    let map = starmap(
        &[(1, 2, 1.0), (2, 4, 1.0), (1, 3, 2.0), (3, 4, 2.0)],
        &[
            (1, "Alpha", Some(-0.5)),
            (2, "Beta", Some(-0.5)),
            (3, "Gamma", Some(-0.5)),
            (4, "Delta", Some(-0.5)),
        ],
    );

    let mut with_avoidance = constraints(10.0, 1);
    with_avoidance.avoided_systems = HashSet::from([2]);

    let result = find_jump_path(&map, 1, 4, &with_avoidance).expect("detour exists");
    assert_eq!(result.path, vec![1, 3, 4]);
    assert!(!result.path.contains(&2));
}

#[test]
fn segments_are_consistent_with_the_path() {
    let map = starmap(
        &[(1, 2, 1.5), (2, 3, 2.5), (3, 4, 0.5)],
        &[
            (1, "Alpha", Some(-0.5)),
            (2, "Beta", Some(-0.5)),
            (3, "Gamma", Some(-0.5)),
            (4, "Delta", Some(-0.5)),
        ],
    );

    let result = find_jump_path(&map, 1, 4, &constraints(10.0, 1)).expect("route exists");
    assert_eq!(result.segments.len(), result.path.len() - 1);
    for (segment, pair) in result.segments.iter().zip(result.path.windows(2)) {
        assert_eq!(segment.from, pair[0]);
        assert_eq!(segment.to, pair[1]);
    }

    let summed: f64 = result.segments.iter().map(|s| s.light_years).sum();
    assert!((result.total_distance - summed).abs() < 1e-12);
    assert!((result.total_distance - 4.5).abs() < 1e-12);
}

#[test]
fn iteration_cap_bounds_the_search() {
    let map = common::chain_starmap(12);

    let mut capped = constraints(10.0, 1);
    capped.limits = SearchLimits {
        max_iterations: Some(3),
    };
    assert!(find_jump_path(&map, 1, 12, &capped).is_none());

    let unbounded = constraints(10.0, 1);
    let result = find_jump_path(&map, 1, 12, &unbounded).expect("route exists");
    assert_eq!(result.jump_count(), 11);
}
