//! # backhaul-field
//!
//! Spatial cost fields for the backhaul drop-cost estimator.
//!
//! This crate provides:
//!
//! - **Field capability**: [`SpatialField`], the distance / neighborhood /
//!   belief read-write surface every geometry must offer
//! - **Paired state**: [`CostBelief`], the cost estimate and confidence weight
//!   stored per location
//! - **Grid geometry**: [`GridField`], a uniform 2D grid with Euclidean
//!   distance and a circular neighborhood mask
//!
//! ## Example
//!
//! ```rust
//! use backhaul_field::{GridField, GridPoint, SpatialField};
//!
//! let field = GridField::new(10, 10, 10.0, 1.0).unwrap();
//! let origin = GridPoint::new(0, 0);
//!
//! assert_eq!(field.distance(&origin, &GridPoint::new(3, 4)), 5.0);
//! assert!(field.neighborhood(&origin, 0.0).unwrap().contains(&origin));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod grid;

pub use config::GridConfig;
pub use error::{FieldError, Result};
pub use field::{CostBelief, SpatialField};
pub use grid::{GridField, GridPoint};
