#![forbid(unsafe_code)]
//! Weighted undirected graph model for public-transit networks.
//!
//! Stops are identified by opaque `i64` IDs (OSM node IDs in practice) and
//! links carry named numeric attributes (`weight`, `time`, `distance`, …)
//! so that downstream analysis can pick the traversal cost per run. The
//! graph is built once by an ingestion layer and then only handed around by
//! shared reference.

pub mod graph;
pub mod stats;

pub use graph::{LinkAttrs, TransitGraph};
pub use stats::GraphStats;
