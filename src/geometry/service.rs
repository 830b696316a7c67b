use crate::domain::{BoundingBox, GeoPoint, PointSet};
use std::fmt::Debug;

/// Measurement and construction primitives on geographic coordinates.
pub trait GeometryService: Debug + Send + Sync {
    /// Great-circle distance in kilometers.
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64;

    /// Smallest axis-aligned box enclosing all points, `None` for an empty slice.
    fn bbox(&self, points: &[GeoPoint]) -> Option<BoundingBox>;

    /// Geographic area of the box polygon in square meters.
    fn area_m2(&self, bbox: &BoundingBox) -> f64;

    /// Closed ring approximating a circle of `radius_km` around `center`.
    fn buffer(&self, center: GeoPoint, radius_km: f64) -> Vec<GeoPoint>;

    /// Mean center.
    fn center(&self, points: &[GeoPoint]) -> Option<GeoPoint>;

    /// Geometric median, the point minimizing the summed distance to all points.
    fn center_median(&self, points: &[GeoPoint]) -> Option<GeoPoint>;

    /// Uniformly distributed points within `bbox`.
    fn random_points(&self, count: usize, bbox: &BoundingBox) -> PointSet;
}
