//! Single-source shortest-path worker tasks.
//!
//! # Overview
//!
//! Each task takes one chunk of source stops and runs Dijkstra from every
//! source over the **whole** graph, returning a self-contained partial
//! result keyed by source. Tasks are pure: shared read-only graph in, owned
//! map out, no I/O and no shared mutable state, so the coordinator can run
//! any number of them concurrently.
//!
//! Two variants exist because full paths are much heavier to build and
//! merge than scalar lengths: [`shortest_path_subset`] returns one stop
//! sequence per reachable target, [`shortest_path_length_subset`] only the
//! distances. All-pairs runs at network scale use the length variant.
//!
//! # Cost Selection
//!
//! The traversal cost is the link attribute named by `key`. A link without
//! that attribute, or with a negative value, fails the task — weights are a
//! configuration contract, not something to default around. One sweep
//! validates every link in the source's component (each link is read when
//! its first endpoint settles); links in other components are validated by
//! the all-pairs run, where every stop is a source in some chunk.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::NodeIndex;
use transit_graph::{LinkAttrs, TransitGraph};

use crate::error::TaskError;

// ---------------------------------------------------------------------------
// Heap entry
// ---------------------------------------------------------------------------

/// Min-heap entry for `BinaryHeap`: ordered by distance, then by insertion
/// sequence so ties pop in deterministic FIFO order. Comparisons are
/// reversed because `BinaryHeap` is a max-heap.
///
/// Distances are finite and non-negative by construction (every cost is
/// validated before being added), so the `partial_cmp` fallback never fires
/// on real input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinScored<T> {
    pub dist: f64,
    pub seq: u64,
    pub payload: T,
}

impl<T> PartialEq for MinScored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist && self.seq == other.seq
    }
}

impl<T> Eq for MinScored<T> {}

impl<T> PartialOrd for MinScored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for MinScored<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ---------------------------------------------------------------------------
// Cost selection
// ---------------------------------------------------------------------------

/// Read the traversal cost for one link, rejecting absent and negative
/// values. `a` and `b` are the endpoint stop IDs used in error reports.
pub(crate) fn link_cost(
    attrs: &LinkAttrs,
    key: &str,
    a: i64,
    b: i64,
) -> Result<f64, TaskError> {
    let Some(cost) = attrs.get(key) else {
        return Err(TaskError::MissingWeight {
            a,
            b,
            key: key.to_string(),
        });
    };
    if cost < 0.0 {
        return Err(TaskError::NegativeWeight {
            a,
            b,
            key: key.to_string(),
            cost,
        });
    }
    Ok(cost)
}

// ---------------------------------------------------------------------------
// Dijkstra core
// ---------------------------------------------------------------------------

/// Dijkstra from `source` over the full graph.
///
/// Returns per-node settled distances (`f64::INFINITY` = unreachable) and
/// the predecessor of each settled node on one shortest path from the
/// source. Predecessors are updated only on strict improvement, so the
/// first shortest path found for a target is the one kept.
fn dijkstra(
    graph: &TransitGraph,
    ids: &[i64],
    source: NodeIndex,
    key: &str,
) -> Result<(Vec<f64>, Vec<Option<NodeIndex>>), TaskError> {
    let n = ids.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut pred: Vec<Option<NodeIndex>> = vec![None; n];

    let mut seq = 0u64;
    let mut fringe: BinaryHeap<MinScored<NodeIndex>> = BinaryHeap::new();
    dist[source.index()] = 0.0;
    fringe.push(MinScored {
        dist: 0.0,
        seq,
        payload: source,
    });

    while let Some(MinScored {
        dist: d,
        payload: v,
        ..
    }) = fringe.pop()
    {
        let vi = v.index();
        if settled[vi] {
            continue;
        }
        settled[vi] = true;

        for (u, attrs) in graph.links(v) {
            let ui = u.index();
            if settled[ui] {
                // Second visit of this link; its cost was validated when
                // the other endpoint settled first.
                continue;
            }
            let cost = link_cost(attrs, key, ids[vi], ids[ui])?;
            let vu_dist = d + cost;
            if vu_dist < dist[ui] {
                dist[ui] = vu_dist;
                pred[ui] = Some(v);
                seq += 1;
                fringe.push(MinScored {
                    dist: vu_dist,
                    seq,
                    payload: u,
                });
            }
        }
    }

    Ok((dist, pred))
}

// ---------------------------------------------------------------------------
// Worker tasks
// ---------------------------------------------------------------------------

/// Shortest-path-length task for one chunk.
///
/// For every source stop in `sources`, returns the map of reachable stop →
/// distance. The source itself appears at distance `0.0`; unreachable stops
/// are absent, not infinite.
///
/// # Errors
///
/// Fails on a missing or negative `key` attribute anywhere the traversal
/// touches, or on a source stop that is not in the graph.
pub fn shortest_path_length_subset(
    graph: &TransitGraph,
    sources: &[i64],
    key: &str,
) -> Result<HashMap<i64, HashMap<i64, f64>>, TaskError> {
    let ids = graph.stop_ids();
    let mut out = HashMap::with_capacity(sources.len());

    for &s in sources {
        let s_idx = graph
            .node_index(s)
            .ok_or(TaskError::UnknownStop { id: s })?;
        let (dist, _) = dijkstra(graph, &ids, s_idx, key)?;

        let lengths: HashMap<i64, f64> = dist
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(i, &d)| (ids[i], d))
            .collect();
        out.insert(s, lengths);
    }
    Ok(out)
}

/// Shortest-path task for one chunk.
///
/// Like [`shortest_path_length_subset`] but returns one full stop sequence
/// per reachable target (source first, target last). The source maps to the
/// single-element path `[source]`.
///
/// # Errors
///
/// Same failure conditions as [`shortest_path_length_subset`].
pub fn shortest_path_subset(
    graph: &TransitGraph,
    sources: &[i64],
    key: &str,
) -> Result<HashMap<i64, HashMap<i64, Vec<i64>>>, TaskError> {
    let ids = graph.stop_ids();
    let mut out = HashMap::with_capacity(sources.len());

    for &s in sources {
        let s_idx = graph
            .node_index(s)
            .ok_or(TaskError::UnknownStop { id: s })?;
        let (dist, pred) = dijkstra(graph, &ids, s_idx, key)?;

        let mut paths: HashMap<i64, Vec<i64>> = HashMap::new();
        for (ti, d) in dist.iter().enumerate() {
            if !d.is_finite() {
                continue;
            }
            // Walk the predecessor chain back to the source.
            let mut path = vec![ids[ti]];
            let mut cursor = ti;
            while let Some(p) = pred[cursor] {
                cursor = p.index();
                path.push(ids[cursor]);
            }
            path.reverse();
            paths.insert(ids[ti], path);
        }
        out.insert(s, paths);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
