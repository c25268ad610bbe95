use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{invalid_input_error, Error};

const DISTANCE_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// An ordered, non-empty sequence of legs. `total_distance` is the sum of
/// the leg distances; `approximate` marks a great-circle estimate produced
/// when the directions provider was unavailable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub token: Uuid,
    pub legs: Vec<RouteLeg>,
    pub total_distance: f64,
    pub approximate: bool,
}

impl Route {
    pub fn new(legs: Vec<RouteLeg>, approximate: bool) -> Result<Self, Error> {
        if legs.is_empty() {
            return Err(invalid_input_error());
        }

        if legs.iter().any(|leg| leg.distance < 0.0) {
            return Err(invalid_input_error());
        }

        let total_distance = legs.iter().map(|leg| leg.distance).sum();

        Ok(Self {
            token: Uuid::new_v4(),
            legs,
            total_distance,
            approximate,
        })
    }

    /// Re-checks the invariants on a route that crossed a serialization
    /// boundary (stored JSONB, request body).
    pub fn validate(&self) -> Result<(), Error> {
        if self.legs.is_empty() {
            return Err(invalid_input_error());
        }

        if self.legs.iter().any(|leg| leg.distance < 0.0) {
            return Err(invalid_input_error());
        }

        let sum: f64 = self.legs.iter().map(|leg| leg.distance).sum();

        if (sum - self.total_distance).abs() > DISTANCE_TOLERANCE {
            return Err(invalid_input_error());
        }

        Ok(())
    }
}
