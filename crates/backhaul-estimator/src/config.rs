//! Estimator configuration.
//!
//! Every option has the source default except `exploration_k`, which the
//! integrator must always supply.

use backhaul_field::GridConfig;
use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};

fn default_base_rate() -> f64 {
    10.0
}

fn default_weight_floor() -> f64 {
    0.01
}

fn default_weight_ceiling() -> f64 {
    1.0
}

/// Configuration for a [`CostEstimator`](crate::CostEstimator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Line-haul cost per real-world distance unit.
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    /// Width constant for the recommended price band.
    pub exploration_k: f64,
    /// Lowest weight a location may hold.
    #[serde(default = "default_weight_floor")]
    pub weight_floor: f64,
    /// Highest weight a location may hold.
    #[serde(default = "default_weight_ceiling")]
    pub weight_ceiling: f64,
}

impl EstimatorConfig {
    /// Creates a config with the given exploration constant and defaults elsewhere.
    #[must_use]
    pub fn new(exploration_k: f64) -> Self {
        Self {
            base_rate: default_base_rate(),
            exploration_k,
            weight_floor: default_weight_floor(),
            weight_ceiling: default_weight_ceiling(),
        }
    }

    /// Sets the line-haul rate.
    #[must_use]
    pub fn with_base_rate(mut self, base_rate: f64) -> Self {
        self.base_rate = base_rate;
        self
    }

    /// Sets the confidence range stored weights are bounded to.
    #[must_use]
    pub fn with_weight_bounds(mut self, floor: f64, ceiling: f64) -> Self {
        self.weight_floor = floor;
        self.weight_ceiling = ceiling;
        self
    }

    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::Parse`] for malformed JSON (including a
    /// missing `exploration_k`) and [`EstimatorError::InvalidConfig`] if the
    /// parsed values do not validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !self.base_rate.is_finite() || self.base_rate <= 0.0 {
            return Err(EstimatorError::InvalidConfig {
                reason: format!("base_rate must be positive, got {}", self.base_rate),
            });
        }
        if !self.exploration_k.is_finite() || self.exploration_k < 0.0 {
            return Err(EstimatorError::InvalidConfig {
                reason: format!(
                    "exploration_k must be non-negative, got {}",
                    self.exploration_k
                ),
            });
        }
        if !(self.weight_floor > 0.0
            && self.weight_floor <= self.weight_ceiling
            && self.weight_ceiling.is_finite())
        {
            return Err(EstimatorError::InvalidConfig {
                reason: format!(
                    "weight bounds must satisfy 0 < floor <= ceiling, got [{}, {}]",
                    self.weight_floor, self.weight_ceiling
                ),
            });
        }
        Ok(())
    }
}

/// Field and estimator configuration in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackhaulConfig {
    /// Grid geometry and initial beliefs.
    pub field: GridConfig,
    /// Pricing and learning parameters.
    pub estimator: EstimatorConfig,
}

impl BackhaulConfig {
    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::Parse`] for malformed JSON and a validation
    /// error from either section otherwise.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError::Field`] for bad geometry and
    /// [`EstimatorError::InvalidConfig`] for bad estimator values.
    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.estimator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backhaul_field::FieldError;
    use test_case::test_case;

    #[test]
    fn config_defaults() {
        let config = EstimatorConfig::new(0.2);
        assert_eq!(config.base_rate, 10.0);
        assert_eq!(config.exploration_k, 0.2);
        assert_eq!(config.weight_floor, 0.01);
        assert_eq!(config.weight_ceiling, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_from_json_fills_defaults() {
        let config = EstimatorConfig::from_json(r#"{"exploration_k": 0.3}"#).unwrap();
        assert_eq!(config, EstimatorConfig::new(0.3));
    }

    #[test]
    fn config_from_json_requires_exploration_k() {
        let result = EstimatorConfig::from_json(r#"{"base_rate": 12.0}"#);
        assert!(matches!(result, Err(EstimatorError::Parse(_))));
    }

    #[test]
    fn config_from_json_validates() {
        let result = EstimatorConfig::from_json(r#"{"exploration_k": 0.3, "base_rate": 0}"#);
        assert!(matches!(result, Err(EstimatorError::InvalidConfig { .. })));
    }

    #[test_case(EstimatorConfig::new(0.2).with_base_rate(0.0) ; "zero base rate")]
    #[test_case(EstimatorConfig::new(0.2).with_base_rate(f64::INFINITY) ; "infinite base rate")]
    #[test_case(EstimatorConfig::new(-0.1) ; "negative k")]
    #[test_case(EstimatorConfig::new(f64::NAN) ; "nan k")]
    #[test_case(EstimatorConfig::new(0.2).with_weight_bounds(0.0, 1.0) ; "zero floor")]
    #[test_case(EstimatorConfig::new(0.2).with_weight_bounds(0.8, 0.5) ; "floor above ceiling")]
    #[test_case(EstimatorConfig::new(0.2).with_weight_bounds(f64::NAN, 1.0) ; "nan floor")]
    fn config_rejects_invalid(config: EstimatorConfig) {
        assert!(matches!(
            config.validate(),
            Err(EstimatorError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn combined_config_from_json() {
        let config = BackhaulConfig::from_json(
            r#"{
                "field": {"width": 10, "height": 10},
                "estimator": {"exploration_k": 0.25, "base_rate": 10.0}
            }"#,
        )
        .unwrap();
        assert_eq!(config.field, GridConfig::new(10, 10));
        assert_eq!(config.estimator.exploration_k, 0.25);
    }

    #[test]
    fn combined_config_reports_field_errors() {
        let result = BackhaulConfig::from_json(
            r#"{
                "field": {"width": 0, "height": 10},
                "estimator": {"exploration_k": 0.25}
            }"#,
        );
        assert!(matches!(
            result,
            Err(EstimatorError::Field(FieldError::InvalidGeometry { .. }))
        ));
    }
}
