//! Entity structures for Trellis.
//!
//! Nodes and directed, typed, binary edges are the two entity kinds the
//! runtime scans and expands over.

use crate::{EdgeId, NodeId, Properties, Value};

/// A node in the graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Property values.
    pub properties: Properties,
}

impl Node {
    /// Create a new node with the given properties.
    pub fn new(id: NodeId, properties: Properties) -> Self {
        Self { id, properties }
    }

    /// Get a property value by name.
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// Relationship type name.
    pub rel_type: String,
    /// Source node.
    pub source: NodeId,
    /// Target node.
    pub target: NodeId,
    /// Property values.
    pub properties: Properties,
}

impl Edge {
    /// Create a new edge with the given properties.
    pub fn new(
        id: EdgeId,
        rel_type: impl Into<String>,
        source: NodeId,
        target: NodeId,
        properties: Properties,
    ) -> Self {
        Self {
            id,
            rel_type: rel_type.into(),
            source,
            target,
            properties,
        }
    }

    /// Get a property value by name.
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Check if this edge involves a specific node as source or target.
    pub fn involves(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}
