//! # backhaul-estimator
//!
//! Adaptive drop-cost estimation for backhaul pricing.
//!
//! This crate provides:
//!
//! - **Estimates**: [`CostEstimator::estimate`] combines the learned cost at
//!   both endpoints with a distance-proportional line-haul cost, plus a price
//!   band that widens as confidence drops
//! - **Learning**: [`CostEstimator::resolve`] turns one resolved negotiation
//!   into radial belief updates around both endpoints
//! - **Neighborhoods**: [`RadialArea`] for the inner/outer partition and its
//!   overlap-aware merge
//! - **Sharing**: [`SharedEstimator`] for serialized updates under a
//!   readers-writer lock
//!
//! ## Example
//!
//! ```rust
//! use backhaul_estimator::{CostEstimator, EstimatorConfig, Negotiation};
//! use backhaul_field::{GridField, GridPoint, SpatialField};
//!
//! let estimator = CostEstimator::new(EstimatorConfig::new(0.2)).unwrap();
//! let mut field = GridField::new(10, 10, 10.0, 1.0).unwrap();
//! let (a, b) = (GridPoint::new(0, 0), GridPoint::new(3, 0));
//!
//! assert_eq!(estimator.estimate(&field, &a, &b).unwrap().point, 50.0);
//!
//! let report = estimator
//!     .resolve(&mut field, &Negotiation::accepted(a, b, 80.0))
//!     .unwrap();
//! assert_eq!(report.implied_cost, 25.0);
//! assert_eq!(field.get(&a).unwrap().cost_est, 40.0);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod estimator;
pub mod radial;
pub mod shared;

pub use config::{BackhaulConfig, EstimatorConfig};
pub use error::{EstimatorError, Result};
pub use estimator::{CostEstimator, Negotiation, PriceEstimate, PriceRange, ResolveReport};
pub use radial::RadialArea;
pub use shared::SharedEstimator;
