//! Adjacency index for efficient edge lookups.

use std::collections::HashMap;
use trellis_core::{EdgeId, NodeId};

/// Adjacency index: NodeId -> outgoing/incoming edge postings.
///
/// Postings keep edge creation order so traversals are deterministic.
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    incoming: HashMap<NodeId, Vec<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: NodeId, target: NodeId, edge_id: EdgeId) {
        self.outgoing.entry(source).or_default().push(edge_id);
        self.incoming.entry(target).or_default().push(edge_id);
    }

    pub fn remove(&mut self, source: NodeId, target: NodeId, edge_id: EdgeId) {
        if let Some(postings) = self.outgoing.get_mut(&source) {
            postings.retain(|id| *id != edge_id);
        }
        if let Some(postings) = self.incoming.get_mut(&target) {
            postings.retain(|id| *id != edge_id);
        }
    }

    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.outgoing
            .get(&node)
            .into_iter()
            .flat_map(|postings| postings.iter().copied())
    }

    pub fn edges_to(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incoming
            .get(&node)
            .into_iter()
            .flat_map(|postings| postings.iter().copied())
    }
}
