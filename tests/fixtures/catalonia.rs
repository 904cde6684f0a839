//! Catalonia locations for realistic planning fixtures.
//!
//! Coordinates are town centres; stations are placed on them.

use ev_route_planner::model::{ChargingCandidate, ConnectorKind, Coordinate, PowerMode};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// A station at this location.
    pub fn station(&self, connectors: &str, power_mode: PowerMode) -> ChargingCandidate {
        ChargingCandidate::new(
            self.name,
            self.coords(),
            ConnectorKind::parse_list(connectors),
            power_mode,
        )
    }
}

pub const BARCELONA: Location = Location::new("barcelona", 41.3874, 2.1686);
pub const LLEIDA: Location = Location::new("lleida", 41.6176, 0.6200);
pub const GIRONA: Location = Location::new("girona", 41.9794, 2.8214);
pub const IGUALADA: Location = Location::new("igualada", 41.5789, 1.6172);
pub const CERVERA: Location = Location::new("cervera", 41.6722, 1.2711);
pub const TARREGA: Location = Location::new("tarrega", 41.6470, 1.1394);
pub const MANRESA: Location = Location::new("manresa", 41.7250, 1.8266);
pub const TARRAGONA: Location = Location::new("tarragona", 41.1189, 1.2445);

/// Stations along the A-2 corridor between Barcelona and Lleida, plus a few
/// off-corridor ones.
pub fn a2_corridor_stations() -> Vec<ChargingCandidate> {
    vec![
        IGUALADA.station("MENNEKES.M+CHADEMO", PowerMode::AcDc),
        CERVERA.station("MENNEKES", PowerMode::Ac),
        TARREGA.station("MENNEKES", PowerMode::Ac),
        MANRESA.station("SCHUKO+MENNEKES", PowerMode::Ac),
        GIRONA.station("MENNEKES", PowerMode::Ac),
        TARRAGONA.station("MENNEKES", PowerMode::Ac),
    ]
}

pub fn type2() -> Vec<ConnectorKind> {
    vec![ConnectorKind::new("MENNEKES")]
}
