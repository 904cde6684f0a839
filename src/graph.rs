//! Sparse proximity graph over the trip endpoints and charging candidates.
//!
//! Each node keeps edges to its k nearest other nodes only. Edges are added
//! from the owning node's perspective, so the adjacency is directed: A may
//! list B among its nearest while B does not list A.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::haversine::distance_km;
use crate::model::{ChargingCandidate, Coordinate};

/// Default ceiling on neighbours kept per node.
pub const DEFAULT_MAX_NEIGHBORS: usize = 100;

/// Stable node key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Origin,
    Destination,
    Station(String),
}

impl NodeId {
    pub fn station(id: impl Into<String>) -> Self {
        NodeId::Station(id.into())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Origin => f.write_str("origin"),
            NodeId::Destination => f.write_str("destination"),
            NodeId::Station(id) => f.write_str(id),
        }
    }
}

/// Directed edge to another node in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    pub(crate) target: usize,
    /// Great-circle distance in kilometers.
    pub(crate) weight: f64,
}

#[derive(Debug, Clone)]
struct Node {
    id: NodeId,
    location: Coordinate,
}

/// Per-request planning graph. Node and edge tables are plain vectors
/// indexed by insertion order: origin, destination, then candidates.
#[derive(Debug, Clone)]
pub struct PlanningGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Edge>>,
}

impl PlanningGraph {
    /// Builds the graph keeping `min(max_neighbors, node_count - 1)` nearest
    /// neighbours per node. Candidates repeating an identifier are dropped.
    pub fn build(
        origin: Coordinate,
        destination: Coordinate,
        candidates: &[ChargingCandidate],
        max_neighbors: usize,
    ) -> Self {
        let mut nodes = Vec::with_capacity(candidates.len() + 2);
        nodes.push(Node {
            id: NodeId::Origin,
            location: origin,
        });
        nodes.push(Node {
            id: NodeId::Destination,
            location: destination,
        });

        let mut index: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.capacity());
        index.insert(NodeId::Origin, 0);
        index.insert(NodeId::Destination, 1);

        for candidate in candidates {
            let id = NodeId::station(candidate.id.as_str());
            if index.contains_key(&id) {
                warn!(station = %candidate.id, "dropping duplicate charging candidate");
                continue;
            }
            index.insert(id.clone(), nodes.len());
            nodes.push(Node {
                id,
                location: candidate.location,
            });
        }

        let k = max_neighbors.min(nodes.len() - 1);
        let adjacency = nodes
            .iter()
            .enumerate()
            .map(|(from, node)| nearest_edges(&nodes, from, node.location, k))
            .collect();

        let graph = Self {
            nodes,
            index,
            adjacency,
        };
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            k,
            "built planning graph"
        );
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn coordinate(&self, id: &NodeId) -> Option<Coordinate> {
        self.index.get(id).map(|&i| self.nodes[i].location)
    }

    /// Node identifiers in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|node| &node.id)
    }

    /// Outgoing edges of `id`, nearest first.
    pub fn neighbours(&self, id: &NodeId) -> Vec<(&NodeId, f64)> {
        self.index
            .get(id)
            .map(|&i| {
                self.adjacency[i]
                    .iter()
                    .map(|edge| (&self.nodes[edge.target].id, edge.weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Weight of the directed edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.adjacency[from]
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.weight)
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_id(&self, index: usize) -> &NodeId {
        &self.nodes[index].id
    }

    pub(crate) fn location(&self, index: usize) -> Coordinate {
        self.nodes[index].location
    }

    pub(crate) fn edges(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }
}

fn nearest_edges(nodes: &[Node], from: usize, location: Coordinate, k: usize) -> Vec<Edge> {
    let mut edges: Vec<Edge> = nodes
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != from)
        .map(|(target, other)| Edge {
            target,
            weight: distance_km(location, other.location),
        })
        .collect();

    // Stable, so equal distances keep insertion order.
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    edges.truncate(k);
    edges
}
