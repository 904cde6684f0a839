//! Request-scoped data model: coordinates, envelopes and charging stations.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Kilometers spanned by one degree of latitude on a 6371 km sphere.
const KM_PER_DEGREE: f64 = 111.195;

/// A geographic point in degrees.
///
/// Equality and hashing compare the exact value of both components, so a
/// coordinate can key a map. Signed zeros compare equal. NaN components
/// compare by bit pattern, so a NaN coordinate equals itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Finite and within [-90, 90] x [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Rejects coordinates that are not [valid](Self::is_valid).
    pub fn validate(&self, label: &str) -> Result<(), PlanError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PlanError::InvalidInput(format!(
                "{} coordinate ({}, {}) is out of range",
                label, self.latitude, self.longitude
            )))
        }
    }
}

impl Coordinate {
    fn key(&self) -> (u64, u64) {
        (component_bits(self.latitude), component_bits(self.longitude))
    }
}

/// Bit pattern with `-0.0` folded into `0.0`.
fn component_bits(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Axis-aligned bounding rectangle in degrees. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Envelope {
    pub fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// An envelope that contains nothing.
    pub fn empty() -> Self {
        Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY)
    }

    /// Smallest envelope covering every finite point. Non-finite points are ignored.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        points
            .into_iter()
            .filter(Coordinate::is_finite)
            .fold(Self::empty(), |mut envelope, point| {
                envelope.min_latitude = envelope.min_latitude.min(point.latitude);
                envelope.max_latitude = envelope.max_latitude.max(point.latitude);
                envelope.min_longitude = envelope.min_longitude.min(point.longitude);
                envelope.max_longitude = envelope.max_longitude.max(point.longitude);
                envelope
            })
    }

    pub fn is_empty(&self) -> bool {
        !(self.min_latitude <= self.max_latitude && self.min_longitude <= self.max_longitude)
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }

    /// Pads the envelope by `margin_km` on every side.
    ///
    /// Longitude padding is scaled for the envelope's widest latitude so the
    /// margin is at least `margin_km` everywhere inside it.
    pub fn expand_km(&self, margin_km: f64) -> Self {
        if self.is_empty() || margin_km.is_nan() || margin_km <= 0.0 {
            return *self;
        }

        let lat_pad = margin_km / KM_PER_DEGREE;
        let min_latitude = (self.min_latitude - lat_pad).max(-90.0);
        let max_latitude = (self.max_latitude + lat_pad).min(90.0);

        let widest = min_latitude.abs().max(max_latitude.abs()).to_radians().cos();
        let (min_longitude, max_longitude) = if widest <= f64::EPSILON {
            (-180.0, 180.0)
        } else {
            let lng_pad = margin_km / (KM_PER_DEGREE * widest);
            (
                (self.min_longitude - lng_pad).max(-180.0),
                (self.max_longitude + lng_pad).min(180.0),
            )
        };

        Self::new(min_latitude, max_latitude, min_longitude, max_longitude)
    }
}

/// Normalized connector label, e.g. `MENNEKES`, `CHADEMO`, `CCS COMBO2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectorKind(String);

impl ConnectorKind {
    pub fn new(label: &str) -> Self {
        let normalized = label.trim().to_uppercase();
        // Legacy catalog spelling of the Type 2 plug.
        if normalized == "MENNEKES.M" {
            return Self("MENNEKES".to_string());
        }
        Self(normalized)
    }

    /// Parses a `+`-separated catalog list such as `MENNEKES.M+CHADEMO`.
    pub fn parse_list(raw: &str) -> HashSet<ConnectorKind> {
        raw.split('+')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(ConnectorKind::new)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current type delivered by a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerMode {
    Ac,
    Dc,
    AcDc,
}

impl PowerMode {
    pub fn supports_ac(self) -> bool {
        matches!(self, PowerMode::Ac | PowerMode::AcDc)
    }

    /// Parses catalog values like `AC`, `DC`, `AC-DC` or `AC DC`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "AC" => Some(PowerMode::Ac),
            "DC" => Some(PowerMode::Dc),
            "ACDC" | "DCAC" => Some(PowerMode::AcDc),
            _ => None,
        }
    }
}

/// A charging station considered as a potential waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingCandidate {
    pub id: String,
    pub location: Coordinate,
    pub connectors: HashSet<ConnectorKind>,
    pub power_mode: PowerMode,
}

impl ChargingCandidate {
    pub fn new(
        id: impl Into<String>,
        location: Coordinate,
        connectors: HashSet<ConnectorKind>,
        power_mode: PowerMode,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            connectors,
            power_mode,
        }
    }

    pub fn supports_any(&self, required: &HashSet<ConnectorKind>) -> bool {
        !self.connectors.is_disjoint(required)
    }
}

/// What the requesting driver's vehicle can do.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProfile {
    /// Maximum distance on one full charge, in kilometers.
    pub autonomy_km: f64,
    pub connectors: HashSet<ConnectorKind>,
}

impl VehicleProfile {
    pub fn new<I>(autonomy_km: f64, connectors: I) -> Self
    where
        I: IntoIterator<Item = ConnectorKind>,
    {
        Self {
            autonomy_km,
            connectors: connectors.into_iter().collect(),
        }
    }
}

/// Rejects NaN, infinite, zero or negative autonomy.
pub fn validate_autonomy(autonomy_km: f64) -> Result<(), PlanError> {
    if autonomy_km.is_finite() && autonomy_km > 0.0 {
        Ok(())
    } else {
        Err(PlanError::InvalidInput(format!(
            "autonomy must be a positive number of kilometers, got {}",
            autonomy_km
        )))
    }
}
