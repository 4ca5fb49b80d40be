//! Execution coordinator: the concurrency boundary of the engine.
//!
//! # Overview
//!
//! Each entry point follows the same shape:
//!
//! 1. Validate the input (at least two stops) before any dispatch.
//! 2. Resolve the worker pool — borrow the caller's or build a run-scoped
//!    one ([`crate::pool::PoolHandle`]).
//! 3. Partition the stop list into chunks sized for the pool and check the
//!    partition invariant.
//! 4. Run one worker task per chunk inside the pool and wait for **all** of
//!    them — a full barrier, no streaming of partial results.
//! 5. Merge the partials into the global result.
//!
//! Chunks may finish in any order; the merge rules are order-independent.
//! The first task failure aborts the run: completed partials are discarded,
//! the error propagates whole, and a run-scoped pool is still released
//! (it is dropped with the handle on every path). Failures are not retried
//! — traversal is deterministic, so a retry would fail identically.

use std::collections::HashMap;

use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::{debug, instrument};

use transit_graph::TransitGraph;

use crate::closeness::DistanceTable;
use crate::error::{CentralityError, Result, TaskError};
use crate::merge::{sum_partials, union_disjoint};
use crate::partition::{chunk_stops, validate_partition};
use crate::pool::PoolHandle;
use crate::{betweenness, dijkstra};

/// Weighted betweenness centrality over the whole graph, normalized by
/// `1 / ((n - 1)(n - 2))` (no scaling below three stops).
///
/// `weight_key` names the link attribute used as traversal cost. Pass a
/// `pool` to reuse an existing rayon pool (it is left untouched for the
/// caller); otherwise a pool of `workers` threads (default: two-thirds of
/// hardware parallelism) is created for this run and released afterwards.
///
/// # Errors
///
/// [`CentralityError::DegenerateInput`] below two stops,
/// [`CentralityError::WorkerFailure`] on a missing or negative weight, and
/// [`CentralityError::InvalidPartition`] if chunking ever breaks its
/// contract.
#[instrument(skip(graph, pool), fields(stops = graph.node_count()))]
pub fn betweenness_centrality(
    graph: &TransitGraph,
    weight_key: &str,
    pool: Option<&ThreadPool>,
    workers: Option<usize>,
) -> Result<HashMap<i64, f64>> {
    ensure_analyzable(graph)?;
    let handle = PoolHandle::resolve(pool, workers)?;
    let chunks = partitioned_chunks(graph, &handle)?;

    // One constant from the global stop count, handed to every chunk, so
    // the merged total cannot depend on the partitioning.
    let scale = normalization_scale(graph.node_count());

    let partials = run_chunked(&handle, &chunks, |chunk| {
        betweenness::betweenness_subset(graph, chunk, weight_key, scale)
    })?;
    Ok(sum_partials(partials))
}

/// All-pairs shortest paths: source stop → (reachable stop → stop sequence).
///
/// Same pool and error contract as [`betweenness_centrality`]. Heavier than
/// [`shortest_path_lengths`]; prefer the length variant when only distances
/// are needed downstream.
///
/// # Errors
///
/// As for [`betweenness_centrality`].
#[instrument(skip(graph, pool), fields(stops = graph.node_count()))]
pub fn shortest_paths(
    graph: &TransitGraph,
    weight_key: &str,
    pool: Option<&ThreadPool>,
    workers: Option<usize>,
) -> Result<HashMap<i64, HashMap<i64, Vec<i64>>>> {
    ensure_analyzable(graph)?;
    let handle = PoolHandle::resolve(pool, workers)?;
    let chunks = partitioned_chunks(graph, &handle)?;

    let partials = run_chunked(&handle, &chunks, |chunk| {
        dijkstra::shortest_path_subset(graph, chunk, weight_key)
    })?;
    union_disjoint(partials)
}

/// All-pairs shortest-path lengths: source stop → (reachable stop →
/// distance). The result feeds [`crate::closeness::closeness_centrality`].
///
/// # Errors
///
/// As for [`betweenness_centrality`].
#[instrument(skip(graph, pool), fields(stops = graph.node_count()))]
pub fn shortest_path_lengths(
    graph: &TransitGraph,
    weight_key: &str,
    pool: Option<&ThreadPool>,
    workers: Option<usize>,
) -> Result<DistanceTable> {
    ensure_analyzable(graph)?;
    let handle = PoolHandle::resolve(pool, workers)?;
    let chunks = partitioned_chunks(graph, &handle)?;

    let partials = run_chunked(&handle, &chunks, |chunk| {
        dijkstra::shortest_path_length_subset(graph, chunk, weight_key)
    })?;
    union_disjoint(partials)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Reject graphs too small for any pairwise metric before dispatch.
fn ensure_analyzable(graph: &TransitGraph) -> Result<()> {
    let nodes = graph.node_count();
    if nodes < 2 {
        return Err(CentralityError::DegenerateInput { nodes });
    }
    Ok(())
}

/// Chunk the stop list for the resolved pool and verify the partition.
fn partitioned_chunks(graph: &TransitGraph, handle: &PoolHandle<'_>) -> Result<Vec<Vec<i64>>> {
    let chunks = chunk_stops(&graph.stop_ids(), handle.worker_count());
    validate_partition(graph, &chunks)?;
    debug!(
        chunks = chunks.len(),
        workers = handle.worker_count(),
        "dispatching centrality chunks"
    );
    Ok(chunks)
}

/// Run `task` once per chunk inside the pool and wait for all of them.
///
/// `collect` over `Result` short-circuits: the first chunk failure wins,
/// remaining results are dropped, and the barrier still holds (install
/// returns only when the parallel iterator is fully drained).
fn run_chunked<T, F>(
    handle: &PoolHandle<'_>,
    chunks: &[Vec<i64>],
    task: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&[i64]) -> std::result::Result<T, TaskError> + Sync,
{
    handle.get().install(|| {
        chunks
            .par_iter()
            .enumerate()
            .map(|(chunk, stops)| {
                task(stops).map_err(|source| CentralityError::WorkerFailure { chunk, source })
            })
            .collect()
    })
}

/// Betweenness normalization constant from the global stop count:
/// `1 / ((n - 1)(n - 2))` for `n > 2`, otherwise 1 (scores are all zero
/// below three stops anyway).
fn normalization_scale(n: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = n as f64;
    1.0 / ((n - 1.0) * (n - 2.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
