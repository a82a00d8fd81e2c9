//! The spatial field capability.
//!
//! A field owns one [`CostBelief`] per location and answers the two geometric
//! questions the estimator needs: how far apart two locations are, and which
//! locations lie within a radius of a reference point.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Learned state at a single location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBelief {
    /// Current estimate of the fixed cost of positioning a vehicle here.
    pub cost_est: f64,
    /// Confidence in `cost_est`; higher values resist change.
    pub weight: f64,
}

impl CostBelief {
    /// Creates a belief from a cost estimate and weight.
    #[must_use]
    pub const fn new(cost_est: f64, weight: f64) -> Self {
        Self { cost_est, weight }
    }

    /// Initial belief for a fresh location: the configured cost at full weight.
    #[must_use]
    pub const fn initial(init_cost: f64) -> Self {
        Self::new(init_cost, 1.0)
    }

    /// Returns true if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cost_est.is_finite() && self.weight.is_finite()
    }
}

/// Geometry and belief storage required by the cost estimator.
///
/// Implementations decide what a location is (grid cell, road-network node,
/// ...) and how distance is measured. Distances are in real-world units; any
/// conversion to an internal index scale happens inside the implementation.
pub trait SpatialField: Send + Sync {
    /// Opaque coordinate identifying a point in the field.
    type Location: Copy + Eq + Hash + Debug + Send + Sync;

    /// Returns true if `loc` is inside the field's domain.
    fn contains(&self, loc: &Self::Location) -> bool;

    /// Symmetric, non-negative distance between two locations.
    ///
    /// `distance(x, x)` is always zero.
    fn distance(&self, a: &Self::Location, b: &Self::Location) -> f64;

    /// All in-domain locations whose distance from `loc` is at most `radius`.
    ///
    /// For any `radius >= 0` the result contains `loc` itself. A negative or
    /// NaN radius yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidLocation`](crate::FieldError::InvalidLocation)
    /// if `loc` is outside the domain.
    fn neighborhood(&self, loc: &Self::Location, radius: f64) -> Result<HashSet<Self::Location>>;

    /// Reads the belief stored at `loc`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLocation` for out-of-domain locations and
    /// `InconsistentState` if the cost and weight storage disagree.
    fn get(&self, loc: &Self::Location) -> Result<CostBelief>;

    /// Overwrites the belief stored at `loc`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLocation` for out-of-domain locations; never clamps.
    fn set(&mut self, loc: &Self::Location, belief: CostBelief) -> Result<()>;
}
