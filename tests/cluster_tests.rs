mod common;

use common::{chain_records, ids, load_fixture};
use mirus::{ClusterDirection, MirusError, Release};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case::own_window_only("MI0000060", 1000, ClusterDirection::Both, &["MI0000060"])]
#[case::reaches_next_on_strand("MI0000060", 1500, ClusterDirection::Both, &["MI0000060", "MI0000062"])]
#[case::downstream_touches_start("MI0000060", 1421, ClusterDirection::Downstream, &["MI0000060", "MI0000062"])]
#[case::downstream_one_short("MI0000060", 1420, ClusterDirection::Downstream, &["MI0000060"])]
#[case::upstream_stops_short("MI0000062", 1000, ClusterDirection::Upstream, &["MI0000062"])]
#[case::upstream_reaches_back("MI0000062", 1421, ClusterDirection::Upstream, &["MI0000060", "MI0000062"])]
#[case::other_genome("MI0000550", 5000, ClusterDirection::Both, &["MI0000550", "MI0007316"])]
fn test_cluster_windows(
    #[case] seed: &str,
    #[case] window: i64,
    #[case] direction: ClusterDirection,
    #[case] expected: &[&str],
) {
    let release = load_fixture();
    let members = release.cluster(seed, window, direction).unwrap();
    assert_eq!(ids(&members), expected.to_vec());
}

#[test]
fn test_cluster_ignores_opposite_strand() {
    let release = load_fixture();
    // MI0000063 sits between the two on chr9 but on the reverse strand
    let members = release
        .cluster("MI0000060", 2000, ClusterDirection::Both)
        .unwrap();
    assert!(!ids(&members).contains(&"MI0000063".to_string()));
}

#[test]
fn test_mature_seed_uses_every_origin_locus() {
    let release = load_fixture();
    let members = release
        .cluster("MIMAT0000062", 0, ClusterDirection::Both)
        .unwrap();
    assert_eq!(ids(&members), vec!["MI0000060", "MI0000061"]);
}

#[test]
fn test_seed_without_locus_is_not_found() {
    let release = load_fixture();
    let err = release
        .cluster("MI0000001", 1000, ClusterDirection::Both)
        .unwrap_err();
    assert!(matches!(err, MirusError::NotFound(_)));
}

#[test]
fn test_unknown_seed_is_not_found() {
    let release = load_fixture();
    let err = release
        .cluster("MI0000000", 1000, ClusterDirection::Both)
        .unwrap_err();
    assert!(matches!(err, MirusError::NotFound(_)));
}

#[test]
fn test_negative_window_is_invalid() {
    let release = load_fixture();
    let err = release
        .cluster("MI0000060", -1, ClusterDirection::Upstream)
        .unwrap_err();
    assert!(matches!(err, MirusError::InvalidInput(_)));
}

#[rstest]
#[case("up", ClusterDirection::Upstream)]
#[case("Downstream", ClusterDirection::Downstream)]
#[case("up-downstream", ClusterDirection::Both)]
fn test_direction_names(#[case] text: &str, #[case] expected: ClusterDirection) {
    assert_eq!(text.parse::<ClusterDirection>().unwrap(), expected);
}

fn direction() -> impl Strategy<Value = ClusterDirection> {
    prop_oneof![
        Just(ClusterDirection::Upstream),
        Just(ClusterDirection::Downstream),
        Just(ClusterDirection::Both),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cluster_grows_with_window(
        count in 2usize..30,
        gap in 100u64..5000,
        seed_index in 0usize..30,
        small in 0i64..20_000,
        extra in 0i64..20_000,
        direction in direction(),
    ) {
        let release = Release::build(chain_records(count, gap)).unwrap();
        let seed = format!("MI{:07}", seed_index % count + 1);

        let narrow = release.cluster(&seed, small, direction).unwrap();
        let wide = release.cluster(&seed, small + extra, direction).unwrap();

        prop_assert!(narrow.iter().any(|p| p.id == seed));
        for member in &narrow {
            prop_assert!(wide.iter().any(|p| p.id == member.id));
        }
        prop_assert!(narrow.windows(2).all(|w| w[0].placements[0].start < w[1].placements[0].start));
    }
}
