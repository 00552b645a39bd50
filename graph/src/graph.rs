//! Core graph storage implementation.

use crate::index::AdjacencyIndex;
use std::collections::BTreeMap;
use trellis_core::{Edge, EdgeId, GraphError, GraphResult, Node, NodeId, Properties};

/// ID allocator for nodes and edges.
#[derive(Debug, Default)]
struct IdAllocator {
    next_node_id: u64,
    next_edge_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn alloc_edge_id(&mut self) -> EdgeId {
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        id
    }
}

/// The in-memory graph storage.
///
/// Entities are stored in BTreeMaps keyed by their sequentially allocated
/// ids, so iteration order is creation order. The scan operator relies on
/// this for deterministic results.
#[derive(Debug)]
pub struct Graph {
    /// Node storage
    nodes: BTreeMap<NodeId, Node>,
    /// Edge storage
    edges: BTreeMap<EdgeId, Edge>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Adjacency index
    adj_index: AdjacencyIndex,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            id_alloc: IdAllocator::new(),
            adj_index: AdjacencyIndex::new(),
        }
    }

    // ==================== Node Operations ====================

    /// Create a new node with the given properties.
    pub fn create_node(&mut self, properties: Properties) -> NodeId {
        let id = self.id_alloc.alloc_node_id();
        self.nodes.insert(id, Node::new(id, properties));
        id
    }

    /// Get a node by ID.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Delete a node and all edges involving it.
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<()> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::NodeNotFound(id));
        }

        // First, collect all edges that need to be deleted. A self-loop
        // shows up in both postings, so dedupe before deleting.
        let mut edges_to_delete: Vec<EdgeId> = self
            .adj_index
            .edges_from(id)
            .chain(self.adj_index.edges_to(id))
            .collect();
        edges_to_delete.sort_unstable();
        edges_to_delete.dedup();

        for edge_id in edges_to_delete {
            self.delete_edge(edge_id)?;
        }

        self.nodes.remove(&id);
        Ok(())
    }

    /// Iterate over all node IDs in creation order.
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== Edge Operations ====================

    /// Create a new directed edge between two nodes.
    pub fn create_edge(
        &mut self,
        rel_type: impl Into<String>,
        source: NodeId,
        target: NodeId,
        properties: Properties,
    ) -> GraphResult<EdgeId> {
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::NodeNotFound(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::NodeNotFound(target));
        }

        let id = self.id_alloc.alloc_edge_id();
        self.edges
            .insert(id, Edge::new(id, rel_type, source, target, properties));
        self.adj_index.insert(source, target, id);
        Ok(id)
    }

    /// Get an edge by ID.
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Delete an edge.
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let edge = self.edges.remove(&id).ok_or(GraphError::EdgeNotFound(id))?;
        self.adj_index.remove(edge.source, edge.target, id);
        Ok(())
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over outgoing edges of a node, optionally filtered by type.
    pub fn edges_from<'a>(
        &'a self,
        node: NodeId,
        rel_type: Option<&'a str>,
    ) -> impl Iterator<Item = EdgeId> + 'a {
        self.adj_index.edges_from(node).filter(move |id| {
            rel_type.is_none()
                || self
                    .edges
                    .get(id)
                    .is_some_and(|edge| Some(edge.rel_type.as_str()) == rel_type)
        })
    }

    /// Iterate over incoming edges of a node, optionally filtered by type.
    pub fn edges_to<'a>(
        &'a self,
        node: NodeId,
        rel_type: Option<&'a str>,
    ) -> impl Iterator<Item = EdgeId> + 'a {
        self.adj_index.edges_to(node).filter(move |id| {
            rel_type.is_none()
                || self
                    .edges
                    .get(id)
                    .is_some_and(|edge| Some(edge.rel_type.as_str()) == rel_type)
        })
    }
}
