use crate::domain::{DistanceThreshold, GeoPoint, PointSet};
use crate::geometry::GeometryService;
use std::f64::consts::PI;
use tracing::{debug, instrument};

/// Outcome of a colocation estimate. Never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ColocationResult {
    quotient: f64,
    proximate_pairs: Vec<(GeoPoint, GeoPoint)>,
    observed_pairs: usize,
    total_pairs: usize,
    area_km2: f64,
    expected_proportion: Option<f64>,
    fallback: bool,
}

impl ColocationResult {
    /// Observed over expected proportion. Zero when there are no pairs or the bounding box of the
    /// first set has no area, see [`ColocationResult::is_fallback`].
    pub fn quotient(&self) -> f64 {
        self.quotient
    }

    /// Pairs within the threshold, first-set-major.
    pub fn proximate_pairs(&self) -> &[(GeoPoint, GeoPoint)] {
        &self.proximate_pairs
    }

    pub fn observed_pairs(&self) -> usize {
        self.observed_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn observed_proportion(&self) -> f64 {
        if self.total_pairs == 0 {
            0.0
        } else {
            self.observed_pairs as f64 / self.total_pairs as f64
        }
    }

    /// Probability that a uniform point in the bounding box of the first set lies within the
    /// threshold of a fixed point. `None` when the box has no area.
    pub fn expected_proportion(&self) -> Option<f64> {
        self.expected_proportion
    }

    pub fn area_km2(&self) -> f64 {
        self.area_km2
    }

    /// True when the quotient is the zero substituted for an undefined ratio rather than a
    /// measured value.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Colocation quotient of `set_a` around `set_b`.
///
/// Every pair is measured, so this is quadratic in the input sizes. The expected proportion uses
/// the bounding box of `set_a` only, so swapping the sets changes the result.
#[instrument(skip_all, fields(set_a = set_a.len(), set_b = set_b.len(), threshold_km = threshold.km()))]
pub fn estimate(set_a: &PointSet, set_b: &PointSet, threshold: DistanceThreshold, geometry: &dyn GeometryService) -> ColocationResult {
    let mut proximate_pairs = Vec::new();
    for a in set_a {
        for b in set_b {
            if geometry.distance_km(*a, *b) <= threshold.km() {
                proximate_pairs.push((*a, *b));
            }
        }
    }

    let observed_pairs = proximate_pairs.len();
    let total_pairs = set_a.len() * set_b.len();

    let area_km2 = geometry
        .bbox(set_a.as_slice())
        .map(|bbox| geometry.area_m2(&bbox) / 1_000_000.0)
        .unwrap_or(0.0);

    let expected_proportion = if area_km2.is_finite() && area_km2 > 0.0 {
        Some(PI * threshold.km().powi(2) / area_km2)
    } else {
        None
    };

    let mut result = ColocationResult {
        quotient: 0.0,
        proximate_pairs,
        observed_pairs,
        total_pairs,
        area_km2,
        expected_proportion,
        fallback: true,
    };

    match expected_proportion {
        Some(expected) if expected > 0.0 && total_pairs > 0 => {
            result.quotient = result.observed_proportion() / expected;
            result.fallback = false;
        }
        _ => debug!(area_km2, total_pairs, "📐 Colocation quotient undefined, using 0"),
    }

    debug!(
        observed_pairs,
        total_pairs,
        quotient = result.quotient,
        "📐 Estimated colocation quotient"
    );
    result
}
