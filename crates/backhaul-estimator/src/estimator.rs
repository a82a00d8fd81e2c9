//! Drop-cost estimation and learning from resolved negotiations.
//!
//! The estimator is stateless: every operation borrows a [`SpatialField`]
//! and reads or rewrites the beliefs stored there. A price between two
//! locations is modelled as the cost of being at the origin, plus the cost of
//! vacating the destination, plus a line-haul cost proportional to distance.

use backhaul_field::{CostBelief, FieldError, SpatialField};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EstimatorConfig;
use crate::error::{EstimatorError, Result};
use crate::radial::RadialArea;

/// A resolved price quote between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Negotiation<L> {
    /// Pickup location.
    pub origin: L,
    /// Drop-off location.
    pub destination: L,
    /// Quoted price.
    pub price: f64,
    /// Whether the counterparty accepted the price.
    pub accepted: bool,
}

impl<L> Negotiation<L> {
    /// An accepted quote.
    pub fn accepted(origin: L, destination: L, price: f64) -> Self {
        Self {
            origin,
            destination,
            price,
            accepted: true,
        }
    }

    /// A rejected quote.
    pub fn rejected(origin: L, destination: L, price: f64) -> Self {
        Self {
            origin,
            destination,
            price,
            accepted: false,
        }
    }
}

/// Recommended price band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower end of the band, never negative.
    pub low: f64,
    /// Upper end of the band, never below `low`.
    pub high: f64,
}

impl PriceRange {
    /// Width of the band.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if `price` lies inside the band.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        (self.low..=self.high).contains(&price)
    }
}

/// Point estimate plus exploration band for an origin-destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Expected cost of the move.
    pub point: f64,
    /// Band trading acceptance likelihood against information gain.
    pub range: PriceRange,
}

/// What one call to [`CostEstimator::resolve`] did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveReport {
    /// Per-endpoint cost implied by the price.
    pub implied_cost: f64,
    /// Radius of the full-strength update.
    pub radius: f64,
    /// Locations in the merged inner area.
    pub inner: usize,
    /// Locations in the merged outer ring.
    pub outer: usize,
    /// Locations whose belief was rewritten.
    pub updated: usize,
    /// Locations left unchanged because the evidence was uninformative.
    pub unchanged: usize,
}

/// Estimates move costs and learns per-location drop costs.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    config: EstimatorConfig,
}

impl CostEstimator {
    /// Creates an estimator from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::InvalidConfig`] if the config does not validate.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Point estimate and recommended band for moving between two locations.
    ///
    /// # Errors
    ///
    /// Returns a field error if either location is outside the field.
    pub fn estimate<F: SpatialField>(
        &self,
        field: &F,
        origin: &F::Location,
        destination: &F::Location,
    ) -> Result<PriceEstimate> {
        let (point, confidence) = self.point_and_confidence(field, origin, destination)?;
        let range = self.band(point, confidence);
        debug!(
            ?origin,
            ?destination,
            point,
            low = range.low,
            high = range.high,
            "cost estimate"
        );
        Ok(PriceEstimate { point, range })
    }

    /// Price band around the point estimate.
    ///
    /// The band is `point * (1 ± k / w)` where `w` is the lower of the two
    /// endpoint weights, with the lower end floored at zero.
    ///
    /// # Errors
    ///
    /// Returns a field error if either location is outside the field.
    pub fn recommended_range<F: SpatialField>(
        &self,
        field: &F,
        origin: &F::Location,
        destination: &F::Location,
    ) -> Result<PriceRange> {
        let (point, confidence) = self.point_and_confidence(field, origin, destination)?;
        Ok(self.band(point, confidence))
    }

    /// Single price to offer: the point estimate, capped at the band's top.
    ///
    /// # Errors
    ///
    /// Returns a field error if either location is outside the field.
    pub fn recommended_price<F: SpatialField>(
        &self,
        field: &F,
        origin: &F::Location,
        destination: &F::Location,
    ) -> Result<f64> {
        let PriceEstimate { point, range } = self.estimate(field, origin, destination)?;
        if point < range.high {
            Ok(point)
        } else {
            Ok(range.high)
        }
    }

    /// Learns from one resolved negotiation.
    ///
    /// The line-haul share of the price is removed and the remainder split
    /// evenly between the two endpoints. Every location within
    /// `cost / base_rate` of either endpoint gets the full-strength update;
    /// the ring out to twice that distance gets a distance-decayed one.
    ///
    /// # Errors
    ///
    /// Returns a field error for out-of-domain endpoints, and
    /// [`EstimatorError::DegenerateNegotiation`] if the price implies a
    /// non-positive endpoint cost. The field is untouched in both cases.
    pub fn resolve<F: SpatialField>(
        &self,
        field: &mut F,
        negotiation: &Negotiation<F::Location>,
    ) -> Result<ResolveReport> {
        let Negotiation {
            origin,
            destination,
            price,
            accepted,
        } = *negotiation;
        ensure_contains(&*field, &origin)?;
        ensure_contains(&*field, &destination)?;

        let line_haul = self.config.base_rate * field.distance(&origin, &destination);
        let implied_cost = (price - line_haul) / 2.0;
        if !(implied_cost.is_finite() && implied_cost > 0.0) {
            warn!(
                ?origin,
                ?destination,
                price,
                implied_cost,
                "skipping negotiation with non-positive implied cost"
            );
            return Err(EstimatorError::DegenerateNegotiation {
                price,
                implied_cost,
            });
        }

        let radius = implied_cost / self.config.base_rate;
        let area = RadialArea::around(&*field, &origin, radius)?
            .merge(RadialArea::around(&*field, &destination, radius)?);
        debug!(
            radius,
            inner = area.inner.len(),
            outer = area.outer.len(),
            "merged radial area"
        );

        let mut report = ResolveReport {
            implied_cost,
            radius,
            inner: area.inner.len(),
            outer: area.outer.len(),
            updated: 0,
            unchanged: 0,
        };

        let inner = area.inner.iter().map(|loc| (loc, 0.0));
        let outer = area.outer.iter().map(|(loc, d)| (loc, *d));
        for (loc, d) in inner.chain(outer) {
            if self.update_location(field, loc, implied_cost, accepted, d)? {
                report.updated += 1;
            } else {
                report.unchanged += 1;
            }
        }

        info!(
            ?origin,
            ?destination,
            price,
            accepted,
            implied_cost,
            updated = report.updated,
            unchanged = report.unchanged,
            "resolved negotiation"
        );
        Ok(report)
    }

    /// Applies one piece of evidence to a single location.
    ///
    /// `d` is the distance from the location to the nearest negotiation
    /// endpoint (zero inside the inner area). The update fires only if the
    /// quote was accepted or the implied cost exceeds the current belief.
    /// Returns whether the belief was rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::InvalidEvidence`] unless `cost` is positive
    /// and finite and `d` is non-negative and finite, and a field error if
    /// `loc` is outside the field or its state is inconsistent. The field is
    /// untouched on error.
    pub fn update_location<F: SpatialField>(
        &self,
        field: &mut F,
        loc: &F::Location,
        cost: f64,
        accepted: bool,
        d: f64,
    ) -> Result<bool> {
        if !(cost.is_finite() && cost > 0.0 && d.is_finite() && d >= 0.0) {
            warn!(?loc, cost, distance = d, "rejecting unusable evidence");
            return Err(EstimatorError::InvalidEvidence { cost, distance: d });
        }

        let CostBelief {
            cost_est: c_hat,
            weight,
        } = field.get(loc)?;

        if !accepted && cost <= c_hat {
            return Ok(false);
        }

        let alpha = d * self.config.base_rate / cost - 1.0;
        let movement = alpha * weight;
        let cost_est = (1.0 - movement).mul_add(cost, movement * c_hat);
        let raw_weight = if accepted {
            weight * weight
        } else {
            weight * weight / alpha
        };

        field.set(loc, CostBelief::new(cost_est, self.bound_weight(raw_weight)))?;
        Ok(true)
    }

    fn point_and_confidence<F: SpatialField>(
        &self,
        field: &F,
        origin: &F::Location,
        destination: &F::Location,
    ) -> Result<(f64, f64)> {
        let from = field.get(origin)?;
        let to = field.get(destination)?;
        let line_haul = field.distance(origin, destination) * self.config.base_rate;
        let point = from.cost_est + to.cost_est + line_haul;
        let confidence = self.bound_weight(from.weight.min(to.weight));
        Ok((point, confidence))
    }

    fn band(&self, point: f64, confidence: f64) -> PriceRange {
        let spread = point.abs() * self.config.exploration_k / confidence;
        let low = (point - spread).max(0.0);
        let high = (point + spread).max(low);
        PriceRange { low, high }
    }

    /// Keeps a weight finite and inside the configured confidence range.
    fn bound_weight(&self, weight: f64) -> f64 {
        if weight.is_nan() {
            self.config.weight_floor
        } else {
            weight.clamp(self.config.weight_floor, self.config.weight_ceiling)
        }
    }
}

fn ensure_contains<F: SpatialField>(field: &F, loc: &F::Location) -> Result<()> {
    if field.contains(loc) {
        Ok(())
    } else {
        Err(FieldError::invalid_location(loc).into())
    }
}
