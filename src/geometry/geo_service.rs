use crate::domain::{BoundingBox, GeoPoint, PointSet};
use crate::geometry::GeometryService;
use crate::geometry::median::{MedianOptions, geometric_median};
use geo::{BoundingRect, Centroid, ChamberlainDuquetteArea, Destination, Distance, Haversine, MultiPoint, Point, Rect, coord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

const BUFFER_STEPS: usize = 64;

/// [`GeometryService`] backed by the `geo` crate. Distances use the haversine formula on the mean
/// earth radius, areas the spherical Chamberlain-Duquette formula.
#[derive(Debug)]
pub struct GeoService {
    rng: Mutex<StdRng>,
    median: MedianOptions,
}

impl GeoService {
    pub fn new(median: MedianOptions) -> Self {
        GeoService {
            rng: Mutex::new(StdRng::from_entropy()),
            median,
        }
    }

    pub fn with_seed(median: MedianOptions, seed: u64) -> Self {
        GeoService {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            median,
        }
    }
}

impl Default for GeoService {
    fn default() -> Self {
        GeoService::new(MedianOptions::default())
    }
}

impl GeometryService for GeoService {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64 {
        Haversine.distance(Point::from(from), Point::from(to)) / 1000.0
    }

    fn bbox(&self, points: &[GeoPoint]) -> Option<BoundingBox> {
        let multi_point = MultiPoint::new(points.iter().map(|&point| Point::from(point)).collect());
        multi_point
            .bounding_rect()
            .map(|rect| BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    fn area_m2(&self, bbox: &BoundingBox) -> f64 {
        let rect = Rect::new(coord! { x: bbox.west(), y: bbox.south() }, coord! { x: bbox.east(), y: bbox.north() });
        rect.to_polygon().chamberlain_duquette_unsigned_area()
    }

    fn buffer(&self, center: GeoPoint, radius_km: f64) -> Vec<GeoPoint> {
        let origin = Point::from(center);
        let mut ring: Vec<GeoPoint> = (0..BUFFER_STEPS)
            .map(|step| {
                let bearing = step as f64 * -360.0 / BUFFER_STEPS as f64;
                GeoPoint::from(Haversine.destination(origin, bearing, radius_km * 1000.0))
            })
            .collect();

        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        ring
    }

    fn center(&self, points: &[GeoPoint]) -> Option<GeoPoint> {
        let multi_point = MultiPoint::new(points.iter().map(|&point| Point::from(point)).collect());
        multi_point.centroid().map(GeoPoint::from)
    }

    fn center_median(&self, points: &[GeoPoint]) -> Option<GeoPoint> {
        let start = self.center(points)?;
        geometric_median(points, start, &self.median, |a, b| self.distance_km(a, b))
    }

    fn random_points(&self, count: usize, bbox: &BoundingBox) -> PointSet {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..count)
            .map(|_| {
                let longitude = rng.gen_range(bbox.west()..=bbox.east());
                let latitude = rng.gen_range(bbox.south()..=bbox.north());
                GeoPoint::normalized(longitude, latitude)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(longitude: f64, latitude: f64) -> GeoPoint {
        GeoPoint::new(longitude, latitude).unwrap()
    }

    #[test]
    fn measures_great_circle_distance_in_kilometers() {
        let service = GeoService::default();
        let distance = service.distance_km(point(85.3, 27.7), point(85.5, 27.9));

        assert!((distance - 29.691).abs() < 0.01, "unexpected distance {distance}");
        assert_eq!(service.distance_km(point(85.3, 27.7), point(85.3, 27.7)), 0.0);
    }

    #[test]
    fn bbox_encloses_all_points() {
        let service = GeoService::default();
        let bbox = service.bbox(&[point(85.3, 27.9), point(85.2, 27.6), point(85.4, 27.7)]).unwrap();

        assert_eq!(bbox, BoundingBox::from([85.2, 27.6, 85.4, 27.9]));
        assert_eq!(service.bbox(&[]), None);
    }

    #[test]
    fn area_of_a_one_degree_box_at_the_equator() {
        let service = GeoService::default();
        let area_km2 = service.area_m2(&BoundingBox::from([0.0, 0.0, 1.0, 1.0])) / 1_000_000.0;

        assert!((area_km2 - 12_391.4).abs() < 1.0, "unexpected area {area_km2}");
    }

    #[test]
    fn area_of_a_degenerate_box_is_zero() {
        let service = GeoService::default();
        assert_eq!(service.area_m2(&BoundingBox::from([85.3, 27.7, 85.3, 27.7])), 0.0);
    }

    #[test]
    fn buffer_is_a_closed_ring_at_the_radius() {
        let service = GeoService::default();
        let center = point(85.324, 27.7172);
        let ring = service.buffer(center, 5.0);

        assert_eq!(ring.len(), BUFFER_STEPS + 1);
        assert_eq!(ring.first(), ring.last());
        for vertex in &ring {
            let distance = service.distance_km(center, *vertex);
            assert!((distance - 5.0).abs() < 1e-6, "vertex at {distance} km");
        }
    }

    #[test]
    fn center_is_the_mean_of_the_coordinates() {
        let service = GeoService::default();
        let center = service.center(&[point(85.0, 27.0), point(85.4, 27.8), point(85.2, 27.6)]).unwrap();

        assert!((center.longitude() - 85.2).abs() < 1e-9);
        assert!((center.latitude() - 27.466_666_666).abs() < 1e-6);
        assert_eq!(service.center(&[]), None);
    }

    #[test]
    fn center_median_stays_within_the_points() {
        let service = GeoService::default();
        let points = [point(85.30, 27.70), point(85.31, 27.70), point(85.30, 27.71), point(85.40, 27.70)];
        let median = service.center_median(&points).unwrap();
        let bbox = service.bbox(&points).unwrap();

        assert!(bbox.contains(&median));
        assert_eq!(service.center_median(&[]), None);
    }

    #[test]
    fn random_points_fall_inside_the_box() {
        let service = GeoService::with_seed(MedianOptions::default(), 42);
        let bbox = BoundingBox::from([85.2, 27.6, 85.4, 27.8]);
        let points = service.random_points(50, &bbox);

        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|point| bbox.contains(point)));
    }

    #[test]
    fn seeded_services_sample_the_same_points() {
        let bbox = BoundingBox::from([85.2, 27.6, 85.4, 27.8]);
        let first = GeoService::with_seed(MedianOptions::default(), 7).random_points(5, &bbox);
        let second = GeoService::with_seed(MedianOptions::default(), 7).random_points(5, &bbox);

        assert_eq!(first, second);
    }
}
