//! Merging partial results into one global result.
//!
//! Two accumulation rules, one per result shape:
//!
//! - **Betweenness** partials are defined over the full stop set for every
//!   chunk, so merging is a pointwise numeric sum over a fixed key set.
//! - **Path and length** partials are keyed by their chunk's source stops.
//!   Chunks partition the stop set, so the key sets are pairwise disjoint
//!   and merging is a union — a key collision means the partitioner broke
//!   its contract and is reported as [`CentralityError::InvalidPartition`],
//!   never papered over by overwriting.
//!
//! Both rules are order-independent: chunk completion order is not
//! controlled by the coordinator.

#![allow(clippy::implicit_hasher)]

use std::collections::HashMap;

use crate::error::CentralityError;

/// Sum betweenness partials pointwise.
///
/// Every partial covers the full stop set, so the result has the same key
/// set as the first partial. Zero partials merge to an empty map.
#[must_use]
pub fn sum_partials(partials: Vec<HashMap<i64, f64>>) -> HashMap<i64, f64> {
    let mut iter = partials.into_iter();
    let Some(mut acc) = iter.next() else {
        return HashMap::new();
    };
    for partial in iter {
        for (id, score) in partial {
            *acc.entry(id).or_insert(0.0) += score;
        }
    }
    acc
}

/// Union path/length partials over disjoint source-key sets.
///
/// # Errors
///
/// Returns [`CentralityError::InvalidPartition`] on the first source stop
/// seen in more than one partial.
pub fn union_disjoint<V>(
    partials: Vec<HashMap<i64, V>>,
) -> Result<HashMap<i64, V>, CentralityError> {
    let total: usize = partials.iter().map(HashMap::len).sum();
    let mut acc = HashMap::with_capacity(total);

    for partial in partials {
        for (source, value) in partial {
            if acc.insert(source, value).is_some() {
                return Err(CentralityError::InvalidPartition {
                    reason: format!("source stop {source} was produced by more than one chunk"),
                });
            }
        }
    }
    Ok(acc)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
