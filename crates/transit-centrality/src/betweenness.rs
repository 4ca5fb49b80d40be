//! Pivot-restricted betweenness worker task.
//!
//! # Overview
//!
//! Brandes' algorithm (2001) splits cleanly over source pivots: each pivot
//! contributes an independent dependency score to every node, and the final
//! centrality is the sum over all pivots. [`betweenness_subset`] runs the
//! per-pivot work for one chunk of stops — shortest-path counting by
//! Dijkstra (links are weighted) followed by dependency accumulation in
//! reverse settle order — and returns scores over the **full** stop set.
//! Summing the partial results of chunks that partition the stop set gives
//! exactly the single-worker answer.
//!
//! # Normalization
//!
//! The caller passes `scale` precomputed from the global node count and the
//! same value goes to every chunk. Deriving it locally (say from the chunk
//! size) would make merged totals depend on the partitioning, which must
//! never happen.
//!
//! Path counting keeps each unordered stop pair twice (once per direction),
//! as an undirected sweep over all pivots naturally does. The conventional
//! normalized score for undirected graphs therefore uses
//! `scale = 1 / ((n - 1) * (n - 2))`.

use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::NodeIndex;
use transit_graph::TransitGraph;

use crate::dijkstra::{MinScored, link_cost};
use crate::error::TaskError;

/// Betweenness dependency accumulation using each stop in `sources` as a
/// pivot, scored over every stop in the graph and multiplied by `scale`.
///
/// Pure: no side effects, no shared mutable state. Partial results from
/// chunks that partition the stop set sum pointwise to the exact global
/// betweenness.
///
/// # Errors
///
/// Fails on a missing or negative `key` attribute anywhere the traversal
/// touches, or on a source stop that is not in the graph.
pub fn betweenness_subset(
    graph: &TransitGraph,
    sources: &[i64],
    key: &str,
    scale: f64,
) -> Result<HashMap<i64, f64>, TaskError> {
    let ids = graph.stop_ids();
    let n = ids.len();
    let mut betweenness = vec![0.0; n];

    for &s in sources {
        let s_idx = graph
            .node_index(s)
            .ok_or(TaskError::UnknownStop { id: s })?;
        accumulate_from_pivot(graph, &ids, s_idx, key, &mut betweenness)?;
    }

    Ok(ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, betweenness[i] * scale))
        .collect())
}

/// One pivot's contribution: weighted shortest-path counting from `s`, then
/// dependency accumulation over the settle stack, added into `betweenness`.
#[allow(clippy::float_cmp)] // equal-distance routes are detected by exact comparison
fn accumulate_from_pivot(
    graph: &TransitGraph,
    ids: &[i64],
    s: NodeIndex,
    key: &str,
    betweenness: &mut [f64],
) -> Result<(), TaskError> {
    let n = ids.len();
    let si = s.index();

    // Settle order (farthest popped last, so the stack unwinds outside-in).
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    // preds[w] = nodes immediately preceding w on shortest paths from s.
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    // sigma[t] = number of shortest paths from s to t (up to a common
    // factor, which cancels in the dependency ratios).
    let mut sigma = vec![0.0; n];
    sigma[si] = 1.0;

    // seen[t] = best tentative distance; settled nodes are final.
    let mut seen = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];

    // Heap entries carry (pred, node) so path counts accumulate at settle
    // time, after every equal-length route into the node has been seen.
    let mut seq = 0u64;
    let mut fringe: BinaryHeap<MinScored<(NodeIndex, NodeIndex)>> = BinaryHeap::new();
    seen[si] = 0.0;
    fringe.push(MinScored {
        dist: 0.0,
        seq,
        payload: (s, s),
    });

    while let Some(MinScored {
        dist,
        payload: (pred, v),
        ..
    }) = fringe.pop()
    {
        let vi = v.index();
        if settled[vi] {
            continue;
        }
        sigma[vi] += sigma[pred.index()];
        settled[vi] = true;
        stack.push(vi);

        for (w, attrs) in graph.links(v) {
            let wi = w.index();
            let cost = link_cost(attrs, key, ids[vi], ids[wi])?;
            let vw_dist = dist + cost;

            if !settled[wi] && vw_dist < seen[wi] {
                // Strictly better route: previous counts are stale.
                seen[wi] = vw_dist;
                sigma[wi] = 0.0;
                preds[wi].clear();
                preds[wi].push(vi);
                seq += 1;
                fringe.push(MinScored {
                    dist: vw_dist,
                    seq,
                    payload: (v, w),
                });
            } else if !settled[wi] && vw_dist == seen[wi] {
                // Another shortest route into w through v. Settled stops
                // are final even when a zero-cost link re-reaches them at
                // equal distance; their counts were already consumed.
                sigma[wi] += sigma[vi];
                preds[wi].push(vi);
            }
        }
    }

    // Dependency accumulation in reverse settle order.
    let mut delta = vec![0.0; n];
    while let Some(wi) = stack.pop() {
        let coeff = (1.0 + delta[wi]) / sigma[wi];
        for &vi in &preds[wi] {
            delta[vi] += sigma[vi] * coeff;
        }
        if wi != si {
            betweenness[wi] += delta[wi];
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
