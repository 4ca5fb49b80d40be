//! Transit graph construction and access.
//!
//! # Overview
//!
//! [`TransitGraph`] wraps a [`petgraph`] undirected graph whose nodes are
//! stop IDs and whose edges carry a [`LinkAttrs`] attribute map. Stop IDs
//! are opaque `i64` values; a side table maps each ID to its petgraph
//! `NodeIndex` so callers never handle indices directly.
//!
//! ## Edge Attributes
//!
//! A link between two stops usually carries several costs at once — walking
//! distance, scheduled travel time, a combined weight. Analysis code selects
//! which attribute to traverse by at call time, so the edge payload is a
//! small named map rather than a single scalar. A missing attribute is a
//! caller-visible error in the analysis layer, never a silent default.
//!
//! ## Multigraph Handling
//!
//! The underlying network data can report the same stop pair more than once
//! (parallel service lines). Duplicate links and self-loops are dropped at
//! insertion so every metric downstream sees a simple graph.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

// ---------------------------------------------------------------------------
// LinkAttrs
// ---------------------------------------------------------------------------

/// Named numeric attributes attached to one link.
///
/// Keys are attribute names (`"weight"`, `"time"`, `"distance"`), values are
/// non-negative traversal costs. Negative values are representable here and
/// rejected by the traversal layer, which is where the error has enough
/// context (both endpoints and the selected key) to report usefully.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkAttrs {
    attrs: HashMap<String, f64>,
}

impl LinkAttrs {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion: `LinkAttrs::new().with("time", 90.0)`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.attrs.get(key).copied()
    }

    /// Number of attributes on this link.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the link carries no attributes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for LinkAttrs {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            attrs: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// TransitGraph
// ---------------------------------------------------------------------------

/// An undirected weighted stop graph.
///
/// Nodes are stop IDs (`i64`), edges are links with named costs. Built by
/// the ingestion layer, then treated as read-only: every analysis entry
/// point takes `&TransitGraph` and the struct exposes no mutation beyond
/// the two insertion methods used during construction.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    graph: UnGraph<i64, LinkAttrs>,
    node_map: HashMap<i64, NodeIndex>,
}

impl TransitGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop, returning its index. Adding an existing stop is a no-op
    /// that returns the original index.
    pub fn add_stop(&mut self, id: i64) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.node_map.insert(id, idx);
        idx
    }

    /// Add an undirected link between two stops, creating either endpoint
    /// if it is not yet present.
    ///
    /// Returns `false` without touching the graph for self-loops and for
    /// stop pairs that are already linked (parallel service lines collapse
    /// to the first link seen).
    pub fn add_link(&mut self, a: i64, b: i64, attrs: LinkAttrs) -> bool {
        if a == b {
            return false;
        }
        let ai = self.add_stop(a);
        let bi = self.add_stop(b);
        if self.graph.contains_edge(ai, bi) {
            return false;
        }
        self.graph.add_edge(ai, bi, attrs);
        true
    }

    /// Number of stops.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a stop ID is present.
    #[must_use]
    pub fn contains_stop(&self, id: i64) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Look up the `NodeIndex` for a stop ID.
    #[must_use]
    pub fn node_index(&self, id: i64) -> Option<NodeIndex> {
        self.node_map.get(&id).copied()
    }

    /// Return the stop ID stored at a node.
    #[must_use]
    pub fn stop_id(&self, idx: NodeIndex) -> Option<i64> {
        self.graph.node_weight(idx).copied()
    }

    /// All stop IDs in node-index order.
    ///
    /// Index order is insertion order (nodes are never removed), so this
    /// list is stable across calls and aligns with dense per-node vectors
    /// indexed by `NodeIndex::index()`.
    #[must_use]
    pub fn stop_ids(&self) -> Vec<i64> {
        self.graph.node_weights().copied().collect()
    }

    /// Iterate over the links incident to a stop as
    /// `(neighbor index, attrs)` pairs.
    pub fn links(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, &LinkAttrs)> {
        use petgraph::visit::EdgeRef;
        self.graph.edges(idx).map(move |e| {
            let other = if e.source() == idx { e.target() } else { e.source() };
            (other, e.weight())
        })
    }

    /// Borrow the underlying petgraph structure (read-only uses such as
    /// component counting).
    #[must_use]
    pub fn inner(&self) -> &UnGraph<i64, LinkAttrs> {
        &self.graph
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
