//! Node-set partitioning for parallel dispatch.
//!
//! # Overview
//!
//! The stop list is split into ordered, non-overlapping chunks; each chunk
//! becomes one worker task. Chunk boundaries carry no meaning beyond load
//! splitting.
//!
//! # Chunk Sizing
//!
//! Chunk size is `max(1, n / (4 * workers))` — four times more chunks than
//! workers. Per-chunk work is uneven (stop degree and reachable-set size
//! vary across a transit network), so the surplus lets the pool rebalance
//! as chunks finish at different times. Small graphs floor at one stop per
//! chunk; the extra dispatch overhead is bounded by the node count.

use fixedbitset::FixedBitSet;
use transit_graph::TransitGraph;

use crate::error::CentralityError;

/// Split `stops` into chunks sized for `workers` parallel workers.
///
/// The concatenation of the returned chunks is exactly `stops`, in order.
/// An empty stop list yields zero chunks.
#[must_use]
pub fn chunk_stops(stops: &[i64], workers: usize) -> Vec<Vec<i64>> {
    if stops.is_empty() {
        return Vec::new();
    }
    let size = (stops.len() / (4 * workers.max(1))).max(1);
    stops.chunks(size).map(<[i64]>::to_vec).collect()
}

/// Check that `chunks` is a strict partition of the graph's stop set:
/// every stop exactly once, no stop outside the graph.
///
/// # Errors
///
/// Returns [`CentralityError::InvalidPartition`] naming the first duplicate,
/// unknown, or missing stop found.
pub fn validate_partition(
    graph: &TransitGraph,
    chunks: &[Vec<i64>],
) -> Result<(), CentralityError> {
    let n = graph.node_count();
    let mut seen = FixedBitSet::with_capacity(n);
    let mut covered = 0usize;

    for chunk in chunks {
        for &id in chunk {
            let Some(idx) = graph.node_index(id) else {
                return Err(CentralityError::InvalidPartition {
                    reason: format!("chunk contains stop {id} which is not in the graph"),
                });
            };
            let i = idx.index();
            if seen.contains(i) {
                return Err(CentralityError::InvalidPartition {
                    reason: format!("stop {id} appears in more than one chunk"),
                });
            }
            seen.insert(i);
            covered += 1;
        }
    }

    if covered != n {
        return Err(CentralityError::InvalidPartition {
            reason: format!("chunks cover {covered} of {n} stops"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn graph_with_stops(ids: &[i64]) -> TransitGraph {
        let mut g = TransitGraph::new();
        for &id in ids {
            g.add_stop(id);
        }
        g
    }

    #[test]
    fn empty_stop_list_yields_no_chunks() {
        assert!(chunk_stops(&[], 4).is_empty());
    }

    #[test]
    fn small_list_floors_at_one_stop_per_chunk() {
        // 3 stops, 4 workers: n / (4 * workers) rounds to zero, floored to 1.
        let chunks = chunk_stops(&[1, 2, 3], 4);
        assert_eq!(chunks, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn chunk_count_is_roughly_four_per_worker() {
        let stops: Vec<i64> = (0..800).collect();
        let chunks = chunk_stops(&stops, 4);
        // size = 800 / 16 = 50 → exactly 16 chunks.
        assert_eq!(chunks.len(), 16);
        assert!(chunks.iter().all(|c| c.len() == 50));
    }

    #[test]
    fn last_chunk_may_be_short() {
        let stops: Vec<i64> = (0..10).collect();
        let chunks = chunk_stops(&stops, 1);
        // size = 10 / 4 = 2 → chunks of 2, exact fit here; with 11 stops the
        // tail chunk holds the remainder.
        let stops11: Vec<i64> = (0..11).collect();
        let chunks11 = chunk_stops(&stops11, 1);
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks11.last().map(Vec::len), Some(1));
    }

    #[test]
    fn valid_partition_passes() {
        let g = graph_with_stops(&[1, 2, 3, 4]);
        let chunks = vec![vec![1, 2], vec![3, 4]];
        assert!(validate_partition(&g, &chunks).is_ok());
    }

    #[test]
    fn duplicate_stop_is_rejected() {
        let g = graph_with_stops(&[1, 2, 3]);
        let chunks = vec![vec![1, 2], vec![2, 3]];
        let err = validate_partition(&g, &chunks).expect_err("overlap");
        assert!(matches!(err, CentralityError::InvalidPartition { .. }));
        assert!(err.to_string().contains("stop 2"));
    }

    #[test]
    fn missing_stop_is_rejected() {
        let g = graph_with_stops(&[1, 2, 3]);
        let chunks = vec![vec![1, 2]];
        let err = validate_partition(&g, &chunks).expect_err("incomplete");
        assert!(err.to_string().contains("2 of 3"));
    }

    #[test]
    fn unknown_stop_is_rejected() {
        let g = graph_with_stops(&[1, 2]);
        let chunks = vec![vec![1, 2, 99]];
        let err = validate_partition(&g, &chunks).expect_err("unknown stop");
        assert!(err.to_string().contains("stop 99"));
    }

    #[test]
    fn empty_graph_with_no_chunks_is_a_valid_partition() {
        let g = TransitGraph::new();
        assert!(validate_partition(&g, &[]).is_ok());
    }

    proptest! {
        /// For any stop list and worker count, the chunks concatenate back
        /// to the input exactly: no duplicates, no omissions, order kept.
        #[test]
        fn chunks_are_a_strict_partition(
            stops in proptest::collection::btree_set(any::<i64>(), 0..200),
            workers in 1usize..16,
        ) {
            let stops: Vec<i64> = stops.into_iter().collect();
            let chunks = chunk_stops(&stops, workers);

            let flattened: Vec<i64> = chunks.iter().flatten().copied().collect();
            prop_assert_eq!(flattened, stops.clone());

            // And the validator agrees.
            let g = graph_with_stops(&stops);
            prop_assert!(validate_partition(&g, &chunks).is_ok());
        }

        /// No chunk is ever empty, whatever the worker count.
        #[test]
        fn chunks_are_never_empty(
            len in 0usize..300,
            workers in 1usize..32,
        ) {
            let stops: Vec<i64> = (0..len as i64).collect();
            let chunks = chunk_stops(&stops, workers);
            prop_assert!(chunks.iter().all(|c| !c.is_empty()));
        }
    }
}
