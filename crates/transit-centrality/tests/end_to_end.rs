//! Full pipeline: lengths table → closeness, parallel vs sequential.

use transit_centrality::{closeness_centrality, shortest_path_lengths};
use transit_graph::{LinkAttrs, TransitGraph};

fn unit_cycle(ids: &[i64]) -> TransitGraph {
    let mut g = TransitGraph::new();
    for i in 0..ids.len() {
        let a = ids[i];
        let b = ids[(i + 1) % ids.len()];
        g.add_link(a, b, LinkAttrs::new().with("weight", 1.0));
    }
    g
}

#[test]
fn four_cycle_closeness_is_uniform() {
    // Unit cycle 1-2-3-4-1: each stop reaches the other three at distances
    // 1, 1, 2, so each column totals 4 with its self row. Closeness is
    // (4-1)² / ((4-1) * 4) = 0.75 for every stop.
    let g = unit_cycle(&[1, 2, 3, 4]);
    let table = shortest_path_lengths(&g, "weight", None, Some(4)).expect("lengths");
    let scores = closeness_centrality(&table).expect("closeness");

    assert_eq!(scores.len(), 4);
    for id in [1, 2, 3, 4] {
        assert!(
            (scores[&id] - 0.75).abs() < 1e-15,
            "stop {id}: {}",
            scores[&id]
        );
    }
}

#[test]
fn parallel_pipeline_matches_sequential_bit_for_bit() {
    let g = unit_cycle(&[1, 2, 3, 4]);

    let serial_table = shortest_path_lengths(&g, "weight", None, Some(1)).expect("serial");
    let parallel_table = shortest_path_lengths(&g, "weight", None, Some(4)).expect("parallel");
    assert_eq!(serial_table, parallel_table);

    let serial_scores = closeness_centrality(&serial_table).expect("serial closeness");
    let parallel_scores = closeness_centrality(&parallel_table).expect("parallel closeness");
    for (id, score) in &serial_scores {
        // Exact equality: the same floating-point operations run in the
        // same per-source order on both paths.
        assert_eq!(parallel_scores[id], *score, "stop {id}");
    }
}

#[test]
fn isolated_stop_flows_through_to_zero_closeness() {
    let mut g = unit_cycle(&[1, 2, 3, 4]);
    g.add_stop(99);

    let table = shortest_path_lengths(&g, "weight", None, Some(2)).expect("lengths");
    // The isolated stop's row holds only its own zero distance.
    assert_eq!(table[&99].len(), 1);

    let scores = closeness_centrality(&table).expect("closeness");
    assert!((scores[&99] - 0.0).abs() < f64::EPSILON);
    // Cycle stops are still scored against the full n = 5 network.
    // reachable = 4, total = 4, so (4-1)² / ((5-1) * 4) = 0.5625.
    for id in [1, 2, 3, 4] {
        assert!((scores[&id] - 0.5625).abs() < 1e-15, "stop {id}");
    }
}

#[test]
fn split_network_penalizes_both_halves() {
    // Two disjoint unit triangles. Within a triangle every distance is 1,
    // so reachable = 3 of n = 6, total = 2: (3-1)² / (5 * 2) = 0.4.
    let mut g = unit_cycle(&[1, 2, 3]);
    for (a, b) in [(10, 11), (11, 12), (12, 10)] {
        g.add_link(a, b, LinkAttrs::new().with("weight", 1.0));
    }

    let table = shortest_path_lengths(&g, "weight", None, Some(3)).expect("lengths");
    let scores = closeness_centrality(&table).expect("closeness");
    for id in [1, 2, 3, 10, 11, 12] {
        assert!((scores[&id] - 0.4).abs() < 1e-15, "stop {id}: {}", scores[&id]);
    }
}

#[test]
fn weighted_cycle_end_to_end() {
    // Cycle with one slow leg: 1-2 (1), 2-3 (1), 3-4 (1), 4-1 (10).
    // Distances route around the slow leg where cheaper.
    let mut g = TransitGraph::new();
    g.add_link(1, 2, LinkAttrs::new().with("weight", 1.0));
    g.add_link(2, 3, LinkAttrs::new().with("weight", 1.0));
    g.add_link(3, 4, LinkAttrs::new().with("weight", 1.0));
    g.add_link(4, 1, LinkAttrs::new().with("weight", 10.0));

    let table = shortest_path_lengths(&g, "weight", None, Some(2)).expect("lengths");
    // 1 → 4 goes the long way round: 1-2-3-4 = 3, not the direct 10.
    assert_eq!(table[&1][&4], 3.0);

    let scores = closeness_centrality(&table).expect("closeness");
    // Column totals: stop 1 → 0+1+2+3 = 6; stop 2 → 1+0+1+2 = 4.
    // Inner stops are closer to everything than the slow leg's endpoints.
    assert!(scores[&2] > scores[&1]);
    assert!(scores[&3] > scores[&4]);
}
