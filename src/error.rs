//! Error types for the planning pipeline.

use thiserror::Error;

/// Errors surfaced by [`plan_charging_route`](crate::plan_charging_route) and
/// the individual pipeline stages.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed coordinates, non-positive autonomy or unusable options.
    /// Raised before any graph work begins.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The range-constrained search could not reach the destination.
    #[error("no reachable charging path within vehicle range of {autonomy_km} km")]
    NoFeasibleRoute { autonomy_km: f64 },

    /// The routing provider failed or returned an unusable payload.
    #[error("routing provider failure: {0}")]
    ProviderFailure(#[from] ProviderError),

    /// The station catalog lookup failed.
    #[error("station catalog unavailable: {0}")]
    CatalogUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failures reported by a [`RouteProvider`](crate::traits::RouteProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but refused the request.
    #[error("provider rejected request ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("provider returned no routes")]
    NoRoutes,

    #[error("malformed provider payload: {0}")]
    Malformed(String),
}

/// Encoded polyline could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("polyline value at byte {position} does not fit in 64 bits")]
    Overflow { position: usize },

    #[error("polyline has a latitude without a longitude")]
    DanglingLatitude,
}

impl From<PolylineError> for ProviderError {
    fn from(err: PolylineError) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}
