//! Error types for the centrality engine.
//!
//! Two layers: [`TaskError`] is what a single worker task can produce while
//! traversing the graph, and [`CentralityError`] is what the public entry
//! points return. A task failure is wrapped in
//! [`CentralityError::WorkerFailure`] together with the offending chunk so
//! the caller can tell a data problem (bad weight on some link) from an
//! engine invariant breach ([`CentralityError::InvalidPartition`]).
//!
//! Traversal is deterministic, so none of these are retried: a failed run is
//! abandoned whole and surfaced to the caller.

/// Failure inside one worker task.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    /// A link does not carry the attribute selected as traversal cost.
    #[error("link {a} -- {b} has no '{key}' attribute")]
    MissingWeight { a: i64, b: i64, key: String },

    /// A link carries a negative cost, which Dijkstra cannot traverse.
    #[error("link {a} -- {b} has negative '{key}' cost {cost}")]
    NegativeWeight {
        a: i64,
        b: i64,
        key: String,
        cost: f64,
    },

    /// A chunk named a stop that is not in the graph.
    #[error("stop {id} is not in the graph")]
    UnknownStop { id: i64 },
}

/// Failure of a centrality computation.
#[derive(Debug, thiserror::Error)]
pub enum CentralityError {
    /// The node chunks do not form a strict partition of the stop set.
    /// Always an internal invariant breach, never recoverable by retrying.
    #[error("node chunks do not partition the stop set: {reason}")]
    InvalidPartition { reason: String },

    /// A worker task failed; the whole computation is abandoned and partial
    /// results from other chunks are discarded.
    #[error("worker task for chunk {chunk} failed: {source}")]
    WorkerFailure {
        chunk: usize,
        #[source]
        source: TaskError,
    },

    /// The input is too small for the metric to be defined.
    #[error("graph has {nodes} stop(s); centrality needs at least 2")]
    DegenerateInput { nodes: usize },

    /// The engine-owned worker pool could not be created.
    #[error("failed to build worker pool")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, CentralityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_failure_names_chunk_and_cause() {
        let err = CentralityError::WorkerFailure {
            chunk: 3,
            source: TaskError::MissingWeight {
                a: 10,
                b: 20,
                key: "time".to_string(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("chunk 3"), "got: {text}");
        assert!(text.contains("no 'time' attribute"), "got: {text}");
    }

    #[test]
    fn negative_weight_reports_offending_link() {
        let err = TaskError::NegativeWeight {
            a: 1,
            b: 2,
            key: "weight".to_string(),
            cost: -4.5,
        };
        assert_eq!(err.to_string(), "link 1 -- 2 has negative 'weight' cost -4.5");
    }
}
