//! Common error types for Trellis.

use crate::{EdgeId, NodeId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge not found.
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
