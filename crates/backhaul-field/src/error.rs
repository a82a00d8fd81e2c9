//! Error types for backhaul-field.

use thiserror::Error;

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors that can occur when reading or writing a spatial field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Location lies outside the field's domain.
    #[error("location outside field domain: {location}")]
    InvalidLocation {
        /// Debug rendering of the rejected location.
        location: String,
    },

    /// Cost and weight maps disagree on whether a location exists.
    #[error("inconsistent field state at {location}: cost and weight maps disagree")]
    InconsistentState {
        /// Debug rendering of the location with unpaired state.
        location: String,
    },

    /// Field dimensions or scale are unusable.
    #[error("invalid field geometry: {reason}")]
    InvalidGeometry {
        /// Description of why the geometry is invalid.
        reason: String,
    },
}

impl FieldError {
    /// Builds an [`FieldError::InvalidLocation`] from any debuggable location.
    pub fn invalid_location(location: &impl std::fmt::Debug) -> Self {
        Self::InvalidLocation {
            location: format!("{location:?}"),
        }
    }

    /// Builds an [`FieldError::InconsistentState`] from any debuggable location.
    pub fn inconsistent_state(location: &impl std::fmt::Debug) -> Self {
        Self::InconsistentState {
            location: format!("{location:?}"),
        }
    }
}
