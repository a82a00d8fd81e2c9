//! Uniform 2D grid field.
//!
//! Locations are integer cell coordinates on a `width x height` rectangle.
//! Distances are Euclidean over cell indices, scaled by the grid resolution
//! into real-world units.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GridConfig;
use crate::error::{FieldError, Result};
use crate::field::{CostBelief, SpatialField};

/// A cell coordinate on a [`GridField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl GridPoint {
    /// Creates a grid point.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared index-space distance to another point.
    fn index_distance_sq(&self, other: &Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.mul_add(dx, dy * dy)
    }
}

impl From<(usize, usize)> for GridPoint {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular grid of cost beliefs.
#[derive(Debug, Clone)]
pub struct GridField {
    width: usize,
    height: usize,
    resolution: f64,
    cost_est: Vec<f64>,
    weights: Vec<f64>,
}

impl GridField {
    /// Creates a grid with every cell initialized to `init_cost` at weight 1.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidGeometry`] for a zero dimension, a
    /// non-finite `init_cost`, or a resolution that is not positive.
    pub fn new(width: usize, height: usize, init_cost: f64, resolution: f64) -> Result<Self> {
        Self::from_config(&GridConfig {
            width,
            height,
            init_cost,
            resolution,
        })
    }

    /// Creates a grid from a validated [`GridConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidGeometry`] if the config does not validate.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        let cells = config.width * config.height;
        let initial = CostBelief::initial(config.init_cost);

        info!(
            width = config.width,
            height = config.height,
            init_cost = config.init_cost,
            resolution = config.resolution,
            "created grid field"
        );

        Ok(Self {
            width: config.width,
            height: config.height,
            resolution: config.resolution,
            cost_est: vec![initial.cost_est; cells],
            weights: vec![initial.weight; cells],
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Real-world distance units per index step.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; a grid has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every cell in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| GridPoint::new(x, y)))
    }

    fn index(&self, loc: &GridPoint) -> Option<usize> {
        (loc.x < self.width && loc.y < self.height).then(|| loc.y * self.width + loc.x)
    }
}

impl SpatialField for GridField {
    type Location = GridPoint;

    fn contains(&self, loc: &GridPoint) -> bool {
        self.index(loc).is_some()
    }

    fn distance(&self, a: &GridPoint, b: &GridPoint) -> f64 {
        a.index_distance_sq(b).sqrt() * self.resolution
    }

    fn neighborhood(&self, loc: &GridPoint, radius: f64) -> Result<HashSet<GridPoint>> {
        if !self.contains(loc) {
            return Err(FieldError::invalid_location(loc));
        }
        if radius.is_nan() || radius < 0.0 {
            return Ok(HashSet::new());
        }

        let normalized = radius / self.resolution;
        let limit = normalized * normalized;

        // Only the circle's bounding box can pass the mask.
        let span = normalized.floor() as usize;
        let x_range = loc.x.saturating_sub(span)..=loc.x.saturating_add(span).min(self.width - 1);
        let y_range = loc.y.saturating_sub(span)..=loc.y.saturating_add(span).min(self.height - 1);

        let cells: HashSet<GridPoint> = y_range
            .flat_map(|y| x_range.clone().map(move |x| GridPoint::new(x, y)))
            .filter(|p| p.index_distance_sq(loc) <= limit)
            .collect();

        debug!(center = %loc, radius, cells = cells.len(), "grid neighborhood");
        Ok(cells)
    }

    fn get(&self, loc: &GridPoint) -> Result<CostBelief> {
        let idx = self
            .index(loc)
            .ok_or_else(|| FieldError::invalid_location(loc))?;
        match (self.cost_est.get(idx), self.weights.get(idx)) {
            (Some(&cost_est), Some(&weight)) => Ok(CostBelief::new(cost_est, weight)),
            _ => Err(FieldError::inconsistent_state(loc)),
        }
    }

    fn set(&mut self, loc: &GridPoint, belief: CostBelief) -> Result<()> {
        let Some(idx) = self.index(loc) else {
            warn!(location = %loc, "rejected write outside grid bounds");
            return Err(FieldError::invalid_location(loc));
        };
        match (self.cost_est.get_mut(idx), self.weights.get_mut(idx)) {
            (Some(cost_est), Some(weight)) => {
                *cost_est = belief.cost_est;
                *weight = belief.weight;
                Ok(())
            }
            _ => Err(FieldError::inconsistent_state(loc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_grid() -> GridField {
        GridField::new(10, 10, 10.0, 1.0).unwrap()
    }

    #[test]
    fn fresh_grid_has_initial_beliefs_everywhere() {
        let grid = make_grid();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.locations().count(), 100);
        for p in grid.locations() {
            assert_eq!(grid.get(&p).unwrap(), CostBelief::new(10.0, 1.0));
        }
    }

    #[test]
    fn invalid_geometry_rejected() {
        assert!(GridField::new(0, 10, 10.0, 1.0).is_err());
        assert!(GridField::new(10, 10, 10.0, 0.0).is_err());
    }

    #[test]
    fn distance_is_euclidean() {
        let grid = make_grid();
        let a = GridPoint::new(0, 0);
        assert_eq!(grid.distance(&a, &GridPoint::new(3, 4)), 5.0);
        assert_eq!(grid.distance(&a, &GridPoint::new(3, 0)), 3.0);
        assert_eq!(grid.distance(&a, &GridPoint::new(0, 2)), 2.0);
        assert_eq!(grid.distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let grid = make_grid();
        let a = GridPoint::new(1, 7);
        let b = GridPoint::new(8, 2);
        assert_eq!(grid.distance(&a, &b), grid.distance(&b, &a));
    }

    #[test]
    fn distance_scales_with_resolution() {
        let grid = GridField::new(10, 10, 10.0, 2.5).unwrap();
        let d = grid.distance(&GridPoint::new(0, 0), &GridPoint::new(3, 4));
        assert!((d - 12.5).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_is_just_the_center() {
        let grid = make_grid();
        let center = GridPoint::new(4, 4);
        let cells = grid.neighborhood(&center, 0.0).unwrap();
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&center));
    }

    #[test]
    fn negative_radius_is_empty() {
        let grid = make_grid();
        let cells = grid.neighborhood(&GridPoint::new(4, 4), -1.0).unwrap();
        assert!(cells.is_empty());
        let cells = grid.neighborhood(&GridPoint::new(4, 4), f64::NAN).unwrap();
        assert!(cells.is_empty());
    }

    #[test_case(GridPoint::new(5, 5), 1.0, 5 ; "unit radius is a plus sign")]
    #[test_case(GridPoint::new(5, 5), 1.5, 9 ; "radius 1.5 is a 3x3 block")]
    #[test_case(GridPoint::new(0, 0), 1.0, 3 ; "corner clips to grid")]
    #[test_case(GridPoint::new(0, 0), 2.5, 8 ; "corner radius 2.5")]
    #[test_case(GridPoint::new(5, 5), 100.0, 100 ; "huge radius covers grid")]
    fn neighborhood_sizes(center: GridPoint, radius: f64, expected: usize) {
        let grid = make_grid();
        assert_eq!(grid.neighborhood(&center, radius).unwrap().len(), expected);
    }

    #[test]
    fn neighborhood_matches_distance() {
        let grid = make_grid();
        let center = GridPoint::new(3, 6);
        let radius = 2.7;
        let cells = grid.neighborhood(&center, radius).unwrap();
        for p in grid.locations() {
            assert_eq!(cells.contains(&p), grid.distance(&center, &p) <= radius, "{p}");
        }
    }

    #[test]
    fn neighborhood_uses_resolution() {
        let grid = GridField::new(10, 10, 10.0, 2.0).unwrap();
        // 2.0 real units is one index step at resolution 2.
        let cells = grid.neighborhood(&GridPoint::new(5, 5), 2.0).unwrap();
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn neighborhood_of_outside_location_fails() {
        let grid = make_grid();
        let result = grid.neighborhood(&GridPoint::new(10, 0), 1.0);
        assert!(matches!(result, Err(FieldError::InvalidLocation { .. })));
    }

    #[test]
    fn set_then_get() {
        let mut grid = make_grid();
        let p = GridPoint::new(2, 9);
        grid.set(&p, CostBelief::new(42.0, 0.5)).unwrap();
        assert_eq!(grid.get(&p).unwrap(), CostBelief::new(42.0, 0.5));
        assert_eq!(grid.get(&GridPoint::new(9, 2)).unwrap(), CostBelief::initial(10.0));
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut grid = make_grid();
        let outside = GridPoint::new(3, 10);
        assert!(!grid.contains(&outside));
        assert!(matches!(
            grid.get(&outside),
            Err(FieldError::InvalidLocation { .. })
        ));
        assert!(matches!(
            grid.set(&outside, CostBelief::new(1.0, 1.0)),
            Err(FieldError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn non_square_grid_indexing() {
        let mut grid = GridField::new(3, 7, 1.0, 1.0).unwrap();
        let p = GridPoint::new(2, 6);
        assert!(grid.contains(&p));
        assert!(!grid.contains(&GridPoint::new(6, 2)));
        grid.set(&p, CostBelief::new(9.0, 0.9)).unwrap();
        assert_eq!(grid.get(&p).unwrap().cost_est, 9.0);
    }

    #[test]
    fn grid_point_from_tuple() {
        assert_eq!(GridPoint::from((3, 4)), GridPoint::new(3, 4));
        assert_eq!(GridPoint::new(3, 4).to_string(), "(3, 4)");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn neighborhood_contains_center(
                x in 0usize..10,
                y in 0usize..10,
                radius in 0.0f64..20.0
            ) {
                let grid = make_grid();
                let center = GridPoint::new(x, y);
                prop_assert!(grid.neighborhood(&center, radius).unwrap().contains(&center));
            }

            #[test]
            fn neighborhood_is_monotonic_in_radius(
                x in 0usize..10,
                y in 0usize..10,
                r1 in 0.0f64..8.0,
                extra in 0.0f64..8.0
            ) {
                let grid = make_grid();
                let center = GridPoint::new(x, y);
                let small = grid.neighborhood(&center, r1).unwrap();
                let large = grid.neighborhood(&center, r1 + extra).unwrap();
                prop_assert!(small.is_subset(&large));
            }

            #[test]
            fn distance_is_non_negative_and_symmetric(
                ax in 0usize..10, ay in 0usize..10,
                bx in 0usize..10, by in 0usize..10
            ) {
                let grid = make_grid();
                let a = GridPoint::new(ax, ay);
                let b = GridPoint::new(bx, by);
                let d = grid.distance(&a, &b);
                prop_assert!(d >= 0.0);
                prop_assert_eq!(d, grid.distance(&b, &a));
            }
        }
    }
}
