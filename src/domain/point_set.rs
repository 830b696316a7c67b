use crate::domain::GeoPoint;
use std::ops::Index;

/// Ordered collection of points. Order only matters for display; duplicates are counted
/// individually.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<GeoPoint>,
}

impl PointSet {
    pub fn new() -> Self {
        PointSet { points: Vec::new() }
    }

    pub fn push(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[GeoPoint] {
        &self.points
    }
}

impl From<Vec<GeoPoint>> for PointSet {
    fn from(points: Vec<GeoPoint>) -> Self {
        PointSet { points }
    }
}

impl FromIterator<GeoPoint> for PointSet {
    fn from_iter<T: IntoIterator<Item = GeoPoint>>(iter: T) -> Self {
        PointSet {
            points: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for PointSet {
    type Output = GeoPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
