#![forbid(unsafe_code)]
//! Exact partition-and-merge parallel centrality for transit graphs.
//!
//! # Overview
//!
//! Betweenness centrality, all-pairs shortest paths, and closeness are
//! super-linear in stop count; on a city-scale network (tens of thousands
//! of stops) a single-threaded sweep is impractical. This crate partitions
//! the stop set into chunks, runs the per-chunk work on a rayon pool, and
//! merges the partial results into exactly the answer a sequential run
//! would produce — partitioning is a load-splitting device, never an
//! approximation.
//!
//! ## Pipeline
//!
//! ```text
//! TransitGraph
//!      ↓  partition::chunk_stops()          (≈ 4 chunks per worker)
//! chunks ──→ worker tasks on the pool       (betweenness / dijkstra)
//!      ↓  merge::sum_partials() / merge::union_disjoint()
//! global result
//!      ↓  closeness::closeness_centrality() (for the length table)
//! stop → score
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use transit_centrality::{betweenness_centrality, closeness_centrality,
//!                          shortest_path_lengths};
//!
//! let bc = betweenness_centrality(&graph, "time", None, None)?;
//! let table = shortest_path_lengths(&graph, "time", None, None)?;
//! let cc = closeness_centrality(&table)?;
//! ```
//!
//! Pass `Some(&pool)` to run several computations on one caller-owned rayon
//! pool; the engine never releases a pool it did not create.
//!
//! # Conventions
//!
//! - **Errors**: typed per-layer enums ([`CentralityError`], [`TaskError`]);
//!   failures are fail-fast and never retried.
//! - **Logging**: `tracing`; entry points are instrumented, worker tasks
//!   are silent (they are pure functions).

pub mod betweenness;
pub mod closeness;
pub mod dijkstra;
pub mod error;
pub mod merge;
pub mod parallel;
pub mod partition;
pub mod pool;

pub use closeness::{DistanceTable, closeness_centrality};
pub use error::{CentralityError, TaskError};
pub use parallel::{betweenness_centrality, shortest_path_lengths, shortest_paths};
pub use pool::{PoolHandle, default_worker_count};
