//! Error types for backhaul-estimator.

use backhaul_field::FieldError;
use thiserror::Error;

/// Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Errors that can occur while estimating or learning drop costs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// The underlying field rejected a location or is in an inconsistent state.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The quoted price does not cover twice the line-haul cost, so no
    /// positive endpoint cost (and no update radius) can be derived.
    #[error("degenerate negotiation: price {price} implies endpoint cost {implied_cost}")]
    DegenerateNegotiation {
        /// The resolved price.
        price: f64,
        /// The per-endpoint cost implied by that price.
        implied_cost: f64,
    },

    /// Evidence passed to a single-location update cannot drive a finite
    /// update: the cost must be positive and the distance non-negative.
    #[error("invalid evidence: cost {cost} at distance {distance}")]
    InvalidEvidence {
        /// The implied endpoint cost.
        cost: f64,
        /// Distance to the nearest negotiation endpoint.
        distance: f64,
    },

    /// Estimator configuration is unusable.
    #[error("invalid estimator config: {reason}")]
    InvalidConfig {
        /// Description of why the config is invalid.
        reason: String,
    },

    /// Configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for EstimatorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
