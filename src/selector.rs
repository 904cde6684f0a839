//! Candidate selection: narrows the station catalog to stations a vehicle can
//! actually use along a route.

use std::collections::HashSet;
use std::convert::Infallible;

use tracing::{debug, warn};

use crate::error::PlanError;
use crate::haversine::distance_km;
use crate::model::{ChargingCandidate, ConnectorKind, Coordinate, Envelope};
use crate::traits::StationCatalog;

/// Queries `catalog` for `envelope` and keeps the AC-capable stations inside
/// it that offer at least one of the `required` connectors.
///
/// An empty envelope or connector set short-circuits to an empty result
/// without touching the catalog.
pub fn select_candidates<C>(
    catalog: &C,
    envelope: &Envelope,
    required: &HashSet<ConnectorKind>,
) -> Result<Vec<ChargingCandidate>, PlanError>
where
    C: StationCatalog,
{
    if envelope.is_empty() || required.is_empty() {
        debug!(
            empty_envelope = envelope.is_empty(),
            empty_connectors = required.is_empty(),
            "skipping candidate selection"
        );
        return Ok(Vec::new());
    }

    let stations = catalog
        .stations_within(envelope)
        .map_err(|err| PlanError::CatalogUnavailable(Box::new(err)))?;
    let fetched = stations.len();
    let selected = filter_candidates(stations, envelope, required);

    debug!(fetched, selected = selected.len(), "selected charging candidates");
    Ok(selected)
}

/// Pure filtering half of [`select_candidates`].
pub fn filter_candidates<I>(
    stations: I,
    envelope: &Envelope,
    required: &HashSet<ConnectorKind>,
) -> Vec<ChargingCandidate>
where
    I: IntoIterator<Item = ChargingCandidate>,
{
    if envelope.is_empty() || required.is_empty() {
        return Vec::new();
    }

    stations
        .into_iter()
        .filter(|station| {
            if !station.location.is_finite() {
                warn!(station = %station.id, "skipping station with invalid coordinates");
                return false;
            }
            envelope.contains(&station.location)
                && station.power_mode.supports_ac()
                && station.supports_any(required)
        })
        .collect()
}

/// Every station within `radius_km` (inclusive) of `center`.
pub fn stations_within_radius<'a, I>(
    stations: I,
    center: Coordinate,
    radius_km: f64,
) -> Vec<&'a ChargingCandidate>
where
    I: IntoIterator<Item = &'a ChargingCandidate>,
{
    if !center.is_finite() || radius_km.is_nan() || radius_km <= 0.0 {
        return Vec::new();
    }

    stations
        .into_iter()
        .filter(|station| {
            if !station.location.is_finite() {
                warn!(station = %station.id, "skipping station with invalid coordinates");
                return false;
            }
            distance_km(center, station.location) <= radius_km
        })
        .collect()
}

/// A pre-loaded catalog held in memory for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct StationSnapshot {
    stations: Vec<ChargingCandidate>,
}

impl StationSnapshot {
    pub fn new(stations: Vec<ChargingCandidate>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[ChargingCandidate] {
        &self.stations
    }
}

impl StationCatalog for StationSnapshot {
    type Error = Infallible;

    /// Stations inside `envelope`. Entries with non-finite coordinates are
    /// passed through so the selector can report and drop them.
    fn stations_within(&self, envelope: &Envelope) -> Result<Vec<ChargingCandidate>, Self::Error> {
        Ok(self
            .stations
            .iter()
            .filter(|station| {
                !station.location.is_finite() || envelope.contains(&station.location)
            })
            .cloned()
            .collect())
    }
}
