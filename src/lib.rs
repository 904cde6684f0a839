//! ev-route-planner core
//!
//! Plans drivable routes for range-limited electric vehicles, inserting
//! charging stops only when the trip exceeds the vehicle's autonomy.

pub mod assembler;
pub mod error;
pub mod graph;
pub mod haversine;
pub mod model;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod router;
pub mod selector;
pub mod traits;

pub use error::{PlanError, PolylineError, ProviderError};
pub use planner::{PlanRequest, PlannerOptions, plan_charging_route};
