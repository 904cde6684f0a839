//! End-to-end charging route planning.

use serde::Deserialize;
use tracing::{debug, info};

use crate::assembler::{ChargingRoute, assemble};
use crate::error::{PlanError, ProviderError};
use crate::graph::{DEFAULT_MAX_NEIGHBORS, NodeId, PlanningGraph};
use crate::model::{Coordinate, VehicleProfile, validate_autonomy};
use crate::polyline::Polyline;
use crate::router::{Path, RouteDecision, find_path};
use crate::selector::select_candidates;
use crate::traits::{RouteProvider, StationCatalog};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// Ceiling on neighbours kept per node when building the graph.
    pub max_neighbors: usize,
    /// Padding added around the direct route before selecting stations.
    pub envelope_margin_km: f64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            max_neighbors: DEFAULT_MAX_NEIGHBORS,
            envelope_margin_km: 0.0,
        }
    }
}

impl PlannerOptions {
    fn validate(&self) -> Result<(), PlanError> {
        if self.max_neighbors == 0 {
            return Err(PlanError::InvalidInput(
                "max_neighbors must be at least 1".to_string(),
            ));
        }
        if !self.envelope_margin_km.is_finite() || self.envelope_margin_km < 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "envelope_margin_km must be a non-negative number, got {}",
                self.envelope_margin_km
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub vehicle: VehicleProfile,
}

impl PlanRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, vehicle: VehicleProfile) -> Self {
        Self {
            origin,
            destination,
            vehicle,
        }
    }

    fn validate(&self) -> Result<(), PlanError> {
        self.origin.validate("origin")?;
        self.destination.validate("destination")?;
        validate_autonomy(self.vehicle.autonomy_km)
    }
}

/// Plans a route from `request.origin` to `request.destination`, adding
/// charging stops from `catalog` only when the trip exceeds the vehicle's
/// autonomy.
///
/// Trips within range go straight to the provider. Longer trips fetch the
/// direct route first to bound the station search, then search the proximity
/// graph for a chain of legs that each fit within one charge.
pub fn plan_charging_route<C, P>(
    request: &PlanRequest,
    catalog: &C,
    provider: &P,
    options: &PlannerOptions,
) -> Result<ChargingRoute, PlanError>
where
    C: StationCatalog,
    P: RouteProvider,
{
    request.validate()?;
    options.validate()?;

    let autonomy_km = request.vehicle.autonomy_km;
    let (decision, path) =
        match RouteDecision::decide(request.origin, request.destination, autonomy_km) {
            RouteDecision::Direct => {
                debug!(autonomy_km, "destination within range, skipping station search");
                ("direct", Path::direct(request.origin, request.destination))
            }
            RouteDecision::NeedsSearch { direct_km } => {
                debug!(direct_km, autonomy_km, "destination out of range, searching for stops");
                ("searched", search_with_stops(request, catalog, provider, options)?)
            }
        };

    let route = assemble(&path, provider)?;
    info!(
        decision = %decision,
        stops = route.stop_count(),
        distance_m = route.summary.distance_m,
        duration_s = route.summary.duration_s,
        "planned charging route"
    );
    Ok(route)
}

fn search_with_stops<C, P>(
    request: &PlanRequest,
    catalog: &C,
    provider: &P,
    options: &PlannerOptions,
) -> Result<Path, PlanError>
where
    C: StationCatalog,
    P: RouteProvider,
{
    let direct = provider.route(request.origin, request.destination, &[])?;
    let geometry = Polyline::decode(&direct.polyline).map_err(ProviderError::from)?;
    let envelope = geometry.envelope();
    if envelope.is_empty() {
        return Err(ProviderError::Malformed("direct route has no geometry".to_string()).into());
    }
    let envelope = envelope.expand_km(options.envelope_margin_km);

    let candidates = select_candidates(catalog, &envelope, &request.vehicle.connectors)?;
    let graph = PlanningGraph::build(
        request.origin,
        request.destination,
        &candidates,
        options.max_neighbors,
    );

    find_path(
        &graph,
        &NodeId::Origin,
        &NodeId::Destination,
        request.vehicle.autonomy_km,
    )
}
