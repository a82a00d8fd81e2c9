//! Inner/outer radial areas around a negotiation endpoint.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use backhaul_field::{FieldError, SpatialField};

/// Locations affected by one negotiation, split by update strength.
///
/// `inner` holds every location within the radius of a reference point and
/// receives the full-strength update. `outer` holds the ring out to twice the
/// radius, keyed by distance to the closest reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialArea<L: Eq + Hash> {
    /// Locations within the radius.
    pub inner: HashSet<L>,
    /// Locations in the outer ring with their distance to the reference point.
    pub outer: HashMap<L, f64>,
}

impl<L: Copy + Eq + Hash> RadialArea<L> {
    /// Computes the radial area of `radius` around `center`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidLocation`] if `center` is outside the field.
    pub fn around<F>(field: &F, center: &L, radius: f64) -> Result<Self, FieldError>
    where
        F: SpatialField<Location = L>,
    {
        let inner = field.neighborhood(center, radius)?;
        let outer = field
            .neighborhood(center, 2.0 * radius)?
            .into_iter()
            .filter(|loc| !inner.contains(loc))
            .map(|loc| (loc, field.distance(center, &loc)))
            .collect();
        Ok(Self { inner, outer })
    }

    /// Merges two areas.
    ///
    /// Inner membership wins over outer membership, and a location in both
    /// outer rings keeps the smaller of its two distances.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let Self {
            mut inner,
            mut outer,
        } = self;
        inner.extend(other.inner);
        for (loc, d) in other.outer {
            outer
                .entry(loc)
                .and_modify(|existing| *existing = existing.min(d))
                .or_insert(d);
        }
        outer.retain(|loc, _| !inner.contains(loc));
        Self { inner, outer }
    }

    /// Total number of affected locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len() + self.outer.len()
    }

    /// Returns true if no location is affected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty() && self.outer.is_empty()
    }
}
