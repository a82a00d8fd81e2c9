//! Lock-guarded estimator for fields shared across threads.
//!
//! Reads (estimates, belief lookups) take a shared lock and may run
//! concurrently. [`SharedEstimator::resolve`] holds the exclusive lock for the
//! whole read-modify-write pass, so updates are serialized and never
//! interleave with reads.

use backhaul_field::{CostBelief, GridField, SpatialField};
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::info;

use crate::config::BackhaulConfig;
use crate::error::Result;
use crate::estimator::{CostEstimator, Negotiation, PriceEstimate, ResolveReport};

/// A [`CostEstimator`] paired with the field it learns into.
pub struct SharedEstimator<F: SpatialField> {
    estimator: CostEstimator,
    field: RwLock<F>,
}

impl SharedEstimator<GridField> {
    /// Builds a grid field and estimator from one config document.
    ///
    /// # Errors
    ///
    /// Returns an error if either section of the config is invalid.
    pub fn from_config(config: &BackhaulConfig) -> Result<Self> {
        config.validate()?;
        let field = GridField::from_config(&config.field)?;
        let estimator = CostEstimator::new(config.estimator.clone())?;
        info!(
            width = field.width(),
            height = field.height(),
            base_rate = config.estimator.base_rate,
            "shared grid estimator ready"
        );
        Ok(Self::new(estimator, field))
    }
}

impl<F: SpatialField> SharedEstimator<F> {
    /// Wraps an estimator and a field.
    #[must_use]
    pub fn new(estimator: CostEstimator, field: F) -> Self {
        Self {
            estimator,
            field: RwLock::new(field),
        }
    }

    /// The wrapped estimator.
    #[must_use]
    pub fn estimator(&self) -> &CostEstimator {
        &self.estimator
    }

    /// Point estimate and band between two locations.
    ///
    /// # Errors
    ///
    /// Returns a field error if either location is outside the field.
    pub fn estimate(&self, origin: &F::Location, destination: &F::Location) -> Result<PriceEstimate> {
        self.estimator.estimate(&*self.field.read(), origin, destination)
    }

    /// Single recommended price between two locations.
    ///
    /// # Errors
    ///
    /// Returns a field error if either location is outside the field.
    pub fn recommended_price(&self, origin: &F::Location, destination: &F::Location) -> Result<f64> {
        self.estimator
            .recommended_price(&*self.field.read(), origin, destination)
    }

    /// Current belief at a location.
    ///
    /// # Errors
    ///
    /// Returns a field error if the location is outside the field.
    pub fn belief(&self, loc: &F::Location) -> Result<CostBelief> {
        Ok(self.field.read().get(loc)?)
    }

    /// Learns from one resolved negotiation under the exclusive lock.
    ///
    /// # Errors
    ///
    /// See [`CostEstimator::resolve`].
    pub fn resolve(&self, negotiation: &Negotiation<F::Location>) -> Result<ResolveReport> {
        let mut field = self.field.write();
        self.estimator.resolve(&mut *field, negotiation)
    }

    /// Shared read access to the field.
    pub fn read_field(&self) -> RwLockReadGuard<'_, F> {
        self.field.read()
    }

    /// Consumes the wrapper and returns the field.
    pub fn into_inner(self) -> F {
        self.field.into_inner()
    }
}
