//! Range-constrained shortest path over a [`PlanningGraph`].
//!
//! Dijkstra where an edge is only relaxed when its own weight fits within the
//! vehicle's autonomy. Heavier edges are invisible to the search.
//!
//! The graph is pruned to k nearest neighbours per node, so the result is the
//! shortest path over the pruned graph. It can be longer than the optimum over
//! every pairing of candidates, and with a small k a feasible chain may be
//! missed entirely.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::PlanError;
use crate::graph::{NodeId, PlanningGraph};
use crate::haversine::distance_km;
use crate::model::{Coordinate, validate_autonomy};

/// Whether a trip needs a graph search at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteDecision {
    /// The destination is within one charge of the origin.
    Direct,
    NeedsSearch { direct_km: f64 },
}

impl RouteDecision {
    pub fn decide(origin: Coordinate, destination: Coordinate, autonomy_km: f64) -> Self {
        let direct_km = distance_km(origin, destination);
        if direct_km <= autonomy_km {
            RouteDecision::Direct
        } else {
            RouteDecision::NeedsSearch { direct_km }
        }
    }
}

/// A node along a path with its resolved position.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: NodeId,
    pub coordinate: Coordinate,
}

/// Ordered waypoints from the start node to the end node.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Waypoint>,
}

impl Path {
    /// The two-element path with no stops.
    pub fn direct(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            waypoints: vec![
                Waypoint {
                    id: NodeId::Origin,
                    coordinate: origin,
                },
                Waypoint {
                    id: NodeId::Destination,
                    coordinate: destination,
                },
            ],
        }
    }

    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn is_direct(&self) -> bool {
        self.waypoints.len() == 2
    }

    pub fn ids(&self) -> Vec<&NodeId> {
        self.waypoints.iter().map(|w| &w.id).collect()
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.waypoints.iter().map(|w| w.coordinate).collect()
    }

    /// Everything between the first and last waypoint.
    pub fn intermediate_stops(&self) -> &[Waypoint] {
        match self.waypoints.len() {
            0..=2 => &[],
            n => &self.waypoints[1..n - 1],
        }
    }

    /// Sum of great-circle leg lengths in kilometers.
    pub fn length_km(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|leg| distance_km(leg[0].coordinate, leg[1].coordinate))
            .sum()
    }
}

/// Finds the shortest admissible path from `start` to `end`.
///
/// When the endpoints are within `autonomy_km` of each other the direct
/// two-element path is returned without searching.
pub fn find_path(
    graph: &PlanningGraph,
    start: &NodeId,
    end: &NodeId,
    autonomy_km: f64,
) -> Result<Path, PlanError> {
    validate_autonomy(autonomy_km)?;
    let start_index = resolve(graph, start, "start")?;
    let end_index = resolve(graph, end, "end")?;

    let from = graph.location(start_index);
    let to = graph.location(end_index);
    match RouteDecision::decide(from, to, autonomy_km) {
        RouteDecision::Direct => Ok(Path::new(vec![
            waypoint(graph, start_index),
            waypoint(graph, end_index),
        ])),
        RouteDecision::NeedsSearch { .. } => search(graph, start_index, end_index, autonomy_km),
    }
}

/// Runs the constrained Dijkstra search without the direct-trip shortcut.
///
/// When `start` and `end` are the same node the result is still the
/// two-waypoint form, so it can be handed to the assembler as is.
pub fn search_path(
    graph: &PlanningGraph,
    start: &NodeId,
    end: &NodeId,
    autonomy_km: f64,
) -> Result<Path, PlanError> {
    validate_autonomy(autonomy_km)?;
    let start_index = resolve(graph, start, "start")?;
    let end_index = resolve(graph, end, "end")?;
    if start_index == end_index {
        return Ok(Path::new(vec![
            waypoint(graph, start_index),
            waypoint(graph, end_index),
        ]));
    }
    search(graph, start_index, end_index, autonomy_km)
}

fn search(
    graph: &PlanningGraph,
    start: usize,
    end: usize,
    autonomy_km: f64,
) -> Result<Path, PlanError> {
    let mut distances = vec![f64::INFINITY; graph.node_count()];
    let mut parents: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut queue = BinaryHeap::new();
    let mut pops = 0usize;

    distances[start] = 0.0;
    queue.push(QueueEntry {
        node: start,
        cost: 0.0,
    });

    while let Some(QueueEntry { node, cost }) = queue.pop() {
        pops += 1;
        if cost > distances[node] {
            continue;
        }
        if node == end {
            break;
        }

        for edge in graph.edges(node) {
            if edge.weight > autonomy_km {
                continue;
            }
            let next_cost = cost + edge.weight;
            if next_cost < distances[edge.target] {
                distances[edge.target] = next_cost;
                parents[edge.target] = Some(node);
                queue.push(QueueEntry {
                    node: edge.target,
                    cost: next_cost,
                });
            }
        }
    }

    debug!(pops, total_km = distances[end], "range-constrained search finished");

    if distances[end].is_infinite() {
        return Err(PlanError::NoFeasibleRoute { autonomy_km });
    }

    let mut indices = vec![end];
    let mut current = end;
    while let Some(parent) = parents[current] {
        indices.push(parent);
        current = parent;
    }
    indices.reverse();

    Ok(Path::new(
        indices.into_iter().map(|i| waypoint(graph, i)).collect(),
    ))
}

fn resolve(graph: &PlanningGraph, id: &NodeId, role: &str) -> Result<usize, PlanError> {
    graph
        .index_of(id)
        .ok_or_else(|| PlanError::InvalidInput(format!("unknown {} node {}", role, id)))
}

fn waypoint(graph: &PlanningGraph, index: usize) -> Waypoint {
    Waypoint {
        id: graph.node_id(index).clone(),
        coordinate: graph.location(index),
    }
}

/// Min-heap entry ordered by cost only; equal costs pop in heap order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    node: usize,
    cost: f64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the cheapest entry first.
        other.cost.total_cmp(&self.cost)
    }
}
