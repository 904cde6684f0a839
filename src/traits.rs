//! Seams to the collaborators the planner consumes.
//!
//! These are intentionally minimal. Hosts implement them over their own
//! station store and routing backend.

use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::model::{ChargingCandidate, Coordinate, Envelope};

/// A charging-station catalog that can be queried by bounding envelope.
///
/// Implementations may return stations outside the envelope (a coarse index,
/// for instance); the candidate selector filters again.
pub trait StationCatalog {
    type Error: Error + Send + Sync + 'static;

    fn stations_within(&self, envelope: &Envelope) -> Result<Vec<ChargingCandidate>, Self::Error>;
}

/// Point-to-point routing over a road network.
pub trait RouteProvider {
    /// Route from `origin` to `destination` through `waypoints` in order.
    /// An empty slice asks for the direct route.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<RouteSummary, ProviderError>;
}

/// Decoded provider answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Encoded polyline, precision 5.
    pub polyline: String,
    /// Seconds.
    pub duration_s: f64,
    /// Meters.
    pub distance_m: f64,
}
