//! Grid field configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

fn default_init_cost() -> f64 {
    10.0
}

fn default_resolution() -> f64 {
    1.0
}

/// Configuration for a [`GridField`](crate::GridField).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Initial cost belief at every cell.
    #[serde(default = "default_init_cost")]
    pub init_cost: f64,
    /// Real-world distance units per grid index step.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
}

impl GridConfig {
    /// Creates a config of the given size with default cost and resolution.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            init_cost: default_init_cost(),
            resolution: default_resolution(),
        }
    }

    /// Sets the initial cost belief.
    #[must_use]
    pub fn with_init_cost(mut self, init_cost: f64) -> Self {
        self.init_cost = init_cost;
        self
    }

    /// Sets the grid resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidGeometry`] if a dimension is zero, the
    /// initial cost is not finite, or the resolution is not a positive finite
    /// number.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidGeometry {
                reason: format!(
                    "grid dimensions must be at least 1x1, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(FieldError::InvalidGeometry {
                reason: "grid cell count overflows".to_string(),
            });
        }
        if !self.init_cost.is_finite() {
            return Err(FieldError::InvalidGeometry {
                reason: format!("init_cost must be finite, got {}", self.init_cost),
            });
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(FieldError::InvalidGeometry {
                reason: format!("resolution must be positive, got {}", self.resolution),
            });
        }
        Ok(())
    }
}
