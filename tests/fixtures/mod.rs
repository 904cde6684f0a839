#![allow(dead_code)]

//! Test fixtures for ev-route-planner.
//!
//! Provides:
//! - Catalonia town locations and charging stations
//! - A straight-line routing provider and instrumented catalogs
//! - Captured tracing output
//! - A small deterministic generator for randomized property tests

pub mod catalonia;
pub mod logs;
pub mod providers;

pub use catalonia::*;
pub use logs::*;
pub use providers::*;

/// Linear congruential generator; enough for reproducible test layouts.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    /// Uniform value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}
