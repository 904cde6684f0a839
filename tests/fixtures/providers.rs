//! In-process collaborators for planner tests.

use std::cell::{Cell, RefCell};
use std::fmt;

use ev_route_planner::error::ProviderError;
use ev_route_planner::haversine::distance_km;
use ev_route_planner::model::{ChargingCandidate, Coordinate, Envelope};
use ev_route_planner::polyline::Polyline;
use ev_route_planner::selector::StationSnapshot;
use ev_route_planner::traits::{RouteProvider, RouteSummary, StationCatalog};

/// Routes along straight lines between the requested points at 90 km/h.
#[derive(Default)]
pub struct StraightLineProvider {
    pub requests: RefCell<Vec<Vec<Coordinate>>>,
}

impl StraightLineProvider {
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl RouteProvider for StraightLineProvider {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<RouteSummary, ProviderError> {
        let mut points = vec![origin];
        points.extend_from_slice(waypoints);
        points.push(destination);
        self.requests.borrow_mut().push(points.clone());

        let km: f64 = points.windows(2).map(|leg| distance_km(leg[0], leg[1])).sum();
        Ok(RouteSummary {
            polyline: Polyline::new(points).encode(),
            duration_s: km / 90.0 * 3600.0,
            distance_m: km * 1000.0,
        })
    }
}

/// Always fails with the given error factory.
pub struct FailingProvider(pub fn() -> ProviderError);

impl RouteProvider for FailingProvider {
    fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _waypoints: &[Coordinate],
    ) -> Result<RouteSummary, ProviderError> {
        Err((self.0)())
    }
}

/// Answers every request with the given encoded geometry, valid or not.
pub struct GarbledProvider(pub &'static str);

impl RouteProvider for GarbledProvider {
    fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _waypoints: &[Coordinate],
    ) -> Result<RouteSummary, ProviderError> {
        Ok(RouteSummary {
            polyline: self.0.to_string(),
            duration_s: 1.0,
            distance_m: 1.0,
        })
    }
}

/// Snapshot catalog that counts lookups.
pub struct CountingCatalog {
    pub snapshot: StationSnapshot,
    pub lookups: Cell<usize>,
}

impl CountingCatalog {
    pub fn new(stations: Vec<ChargingCandidate>) -> Self {
        Self {
            snapshot: StationSnapshot::new(stations),
            lookups: Cell::new(0),
        }
    }
}

impl StationCatalog for CountingCatalog {
    type Error = <StationSnapshot as StationCatalog>::Error;

    fn stations_within(&self, envelope: &Envelope) -> Result<Vec<ChargingCandidate>, Self::Error> {
        self.lookups.set(self.lookups.get() + 1);
        self.snapshot.stations_within(envelope)
    }
}

#[derive(Debug)]
pub struct StoreDown;

impl fmt::Display for StoreDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("station store is down")
    }
}

impl std::error::Error for StoreDown {}

pub struct UnavailableCatalog;

impl StationCatalog for UnavailableCatalog {
    type Error = StoreDown;

    fn stations_within(&self, _envelope: &Envelope) -> Result<Vec<ChargingCandidate>, Self::Error> {
        Err(StoreDown)
    }
}
