//! Closeness centrality from an all-pairs distance table.
//!
//! # Overview
//!
//! A pure post-merge transform: the merged output of the shortest-path-
//! length computation, viewed as a sources × targets matrix, becomes one
//! scalar per stop. The formula is the Wasserman–Faust closeness adapted
//! for disconnected networks:
//!
//! ```text
//! closeness(j) = (reachable(j) - 1)² / ((n - 1) * total_distance(j))
//! ```
//!
//! where `reachable(j)` counts the rows with a defined distance to `j`
//! (the self-distance 0 row counts) and `total_distance(j)` sums them.
//! A stop reaching few others is penalized twice: the squared numerator
//! shrinks and the `n - 1` denominator still normalizes against the whole
//! network.
//!
//! # Degenerate Cases
//!
//! - An isolated stop is reached only by its own zero-distance row:
//!   `reachable = 1` makes the numerator exactly 0, no division trouble.
//! - A column whose distances sum to exactly zero (only possible when the
//!   self row is the sole entry) substitutes `1` for the sum. That is a
//!   floor to keep the arithmetic defined, not a real distance.
//! - A table with fewer than two rows has `n - 1 = 0` and is rejected
//!   up front rather than producing infinities.

#![allow(clippy::implicit_hasher)]

use std::collections::HashMap;

use crate::error::{CentralityError, Result};

/// All-pairs shortest-path lengths: source stop → (target stop → distance).
/// Built by [`crate::parallel::shortest_path_lengths`], consumed here, and
/// discarded — nothing persists it.
pub type DistanceTable = HashMap<i64, HashMap<i64, f64>>;

/// Derive per-stop closeness from an all-pairs distance table.
///
/// Scores are keyed by the table's source stops; `n` is the row count.
///
/// # Errors
///
/// Returns [`CentralityError::DegenerateInput`] for tables with fewer than
/// two rows.
#[allow(clippy::float_cmp)] // the 1-floor applies on an exact zero sum only
pub fn closeness_centrality(table: &DistanceTable) -> Result<HashMap<i64, f64>> {
    let n = table.len();
    if n < 2 {
        return Err(CentralityError::DegenerateInput { nodes: n });
    }
    #[allow(clippy::cast_precision_loss)]
    let n_minus_1 = (n - 1) as f64;

    let mut scores = HashMap::with_capacity(n);
    for &j in table.keys() {
        let mut reachable = 0usize;
        let mut total = 0.0;
        for row in table.values() {
            if let Some(&d) = row.get(&j) {
                reachable += 1;
                total += d;
            }
        }

        if reachable == 0 {
            // No row reaches j at all; nothing flows through the formula.
            scores.insert(j, 0.0);
            continue;
        }

        if total == 0.0 {
            total = 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let numerator = ((reachable - 1) as f64).powi(2);
        scores.insert(j, numerator / (n_minus_1 * total));
    }
    Ok(scores)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
