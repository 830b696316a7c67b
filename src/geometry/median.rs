use crate::domain::GeoPoint;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct MedianOptions {
    /// Convergence tolerance in degrees, applied to both axes.
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for MedianOptions {
    fn default() -> Self {
        MedianOptions {
            tolerance: 0.001,
            max_iterations: 10,
        }
    }
}

/// Weiszfeld iteration starting at `start`. Each round re-weights the points by the inverse of
/// their distance to the current candidate; a zero distance counts as 1 so a candidate sitting on
/// an input point stays finite.
///
/// Convergence compares the new candidate with the candidate from two rounds back, so an
/// oscillating sequence still terminates within `max_iterations`.
pub fn geometric_median<F>(points: &[GeoPoint], start: GeoPoint, options: &MedianOptions, distance_km: F) -> Option<GeoPoint>
where
    F: Fn(GeoPoint, GeoPoint) -> f64,
{
    if points.is_empty() {
        return None;
    }

    let mut candidate = start;
    let mut previous = (0.0, 0.0);
    let mut remaining = options.max_iterations;

    loop {
        let (mut x_sum, mut y_sum, mut k_sum) = (0.0, 0.0, 0.0);
        for point in points {
            let mut distance = distance_km(*point, candidate);
            if distance == 0.0 {
                distance = 1.0;
            }
            let k = 1.0 / distance;
            x_sum += point.longitude() * k;
            y_sum += point.latitude() * k;
            k_sum += k;
        }

        let next = (x_sum / k_sum, y_sum / k_sum);
        let converged = (next.0 - previous.0).abs() < options.tolerance && (next.1 - previous.1).abs() < options.tolerance;
        if points.len() == 1 || remaining == 0 || converged {
            return Some(GeoPoint::normalized(next.0, next.1));
        }

        remaining -= 1;
        previous = (candidate.longitude(), candidate.latitude());
        candidate = GeoPoint::normalized(next.0, next.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar(a: GeoPoint, b: GeoPoint) -> f64 {
        ((a.longitude() - b.longitude()).powi(2) + (a.latitude() - b.latitude()).powi(2)).sqrt() * 100.0
    }

    fn point(longitude: f64, latitude: f64) -> GeoPoint {
        GeoPoint::new(longitude, latitude).unwrap()
    }

    #[test]
    fn returns_none_without_points() {
        assert_eq!(geometric_median(&[], point(0.0, 0.0), &MedianOptions::default(), planar), None);
    }

    #[test]
    fn a_single_point_is_its_own_median() {
        let only = point(85.3, 27.7);
        let median = geometric_median(&[only], point(85.0, 27.0), &MedianOptions::default(), planar).unwrap();

        assert!((median.longitude() - 85.3).abs() < 1e-9);
        assert!((median.latitude() - 27.7).abs() < 1e-9);
    }

    #[test]
    fn symmetric_points_keep_the_center() {
        let points = [point(-1.0, 0.0), point(1.0, 0.0), point(0.0, -1.0), point(0.0, 1.0)];
        let median = geometric_median(&points, point(0.0, 0.0), &MedianOptions::default(), planar).unwrap();

        assert!(median.longitude().abs() < 1e-9);
        assert!(median.latitude().abs() < 1e-9);
    }

    #[test]
    fn pulls_towards_the_cluster_compared_to_the_mean() {
        // Three clustered points and one outlier: the mean is dragged east, the median is not
        let points = [point(0.0, 0.0), point(0.01, 0.0), point(0.0, 0.01), point(1.0, 0.0)];
        let mean_longitude = points.iter().map(|p| p.longitude()).sum::<f64>() / points.len() as f64;
        let options = MedianOptions {
            tolerance: 1e-9,
            max_iterations: 200,
        };

        let median = geometric_median(&points, point(mean_longitude, 0.0025), &options, planar).unwrap();

        assert!(median.longitude() < mean_longitude);
        assert!(median.longitude() < 0.05);
    }

    #[test]
    fn stops_after_max_iterations() {
        let points = [point(0.0, 0.0), point(10.0, 0.0), point(0.0, 10.0)];
        let options = MedianOptions {
            tolerance: 0.0,
            max_iterations: 0,
        };

        // One weighting round from the start point, no more
        let median = geometric_median(&points, point(5.0, 5.0), &options, planar).unwrap();
        assert!(median.longitude() > 0.0 && median.longitude() < 10.0);
    }
}
