//! End-to-end scenarios (§8) not already covered by `router-sim::harness`'s
//! own unit tests: the Star/All_To_One and Mesh(2,3)/One_To_All cases.

use router_sim::cli::{Cli, LogLevel, TopologyKind, TrafficMode};
use router_sim::harness;

fn cli(topology: TopologyKind, size: usize, dimension: u32, mode: TrafficMode) -> Cli {
    Cli {
        topology,
        size,
        dimension,
        print_matrix: false,
        settle_ms: 30,
        mode,
        dropouts: 0,
        repeats: 10,
        force: false,
        log_level: LogLevel::None,
    }
}

#[compio::test]
async fn star_six_all_to_one_every_leaf_reaches_hub_in_one_hop() {
    let args = cli(TopologyKind::Star, 6, 3, TrafficMode::AllToOne);
    let template = harness::prepare(&args).unwrap();
    let report = harness::run(&args, &template).await;

    assert!(!report.timed_out);
    assert_eq!(report.deliveries.len(), 6);
    // Leaf 0 is the hub itself; everybody else is exactly one hop away.
    assert_eq!(report.min_hops, Some(0));
    assert_eq!(report.max_hops, Some(1));
}

#[compio::test]
async fn mesh_2_3_one_to_all_diameter_bounds_max_hops() {
    let args = cli(TopologyKind::Mesh, 2, 3, TrafficMode::OneToAll);
    let template = harness::prepare(&args).unwrap();
    let report = harness::run(&args, &template).await;

    assert!(!report.timed_out);
    assert_eq!(report.deliveries.len(), 8);
    assert!(report.max_hops.unwrap() <= 3);
}

#[compio::test]
async fn line_five_one_to_all_every_destination_observed_exactly_once() {
    let args = cli(TopologyKind::Line, 5, 3, TrafficMode::OneToAll);
    let template = harness::prepare(&args).unwrap();
    let report = harness::run(&args, &template).await;

    assert!(!report.timed_out);
    let mut keys: Vec<u32> = report.deliveries.iter().map(|d| d.payload_key).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![0, 1, 2, 3, 4]);
}
