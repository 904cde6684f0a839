//! Turns a waypoint path into a drivable route via the routing provider.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::graph::NodeId;
use crate::model::Coordinate;
use crate::router::Path;
use crate::traits::{RouteProvider, RouteSummary};

/// Final planner output handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingRoute {
    pub summary: RouteSummary,
    /// Charging stops in driving order.
    pub stops: Vec<Coordinate>,
    /// Station identifiers matching `stops`.
    pub stop_ids: Vec<String>,
}

impl ChargingRoute {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// Requests the road route for `path` from `provider`.
///
/// A two-element path is requested as a direct route; anything longer passes
/// the intermediate nodes as ordered waypoints. Provider failures are returned
/// as-is.
pub fn assemble<P>(path: &Path, provider: &P) -> Result<ChargingRoute, PlanError>
where
    P: RouteProvider,
{
    let waypoints = path.waypoints();
    let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) else {
        return Err(PlanError::InvalidInput("path has no waypoints".to_string()));
    };
    if waypoints.len() < 2 {
        return Err(PlanError::InvalidInput(
            "path must contain an origin and a destination".to_string(),
        ));
    }

    let stops: Vec<Coordinate> = path
        .intermediate_stops()
        .iter()
        .map(|w| w.coordinate)
        .collect();
    let stop_ids = path
        .intermediate_stops()
        .iter()
        .map(|w| match &w.id {
            NodeId::Station(id) => id.clone(),
            other => other.to_string(),
        })
        .collect();

    debug!(stops = stops.len(), "requesting route from provider");
    let summary = if path.is_direct() {
        provider.route(first.coordinate, last.coordinate, &[])?
    } else {
        provider.route(first.coordinate, last.coordinate, &stops)?
    };

    Ok(ChargingRoute {
        summary,
        stops,
        stop_ids,
    })
}
