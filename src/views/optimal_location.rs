use crate::domain::{GeoPoint, PointSet};
use crate::geometry::GeometryService;
use crate::map::{DivIcon, Layer, LayerId, MapSurface, PathStyle};
use crate::views::ViewError;
use tracing::{info, instrument, warn};

const RESULT_ELEMENT: &str = "optimal-result";
const MIN_POINTS: usize = 2;

const POINT_ICON: DivIcon = DivIcon {
    class_name: "point-marker",
    html: "<div class=\"marker-inner\"></div>",
    size: (12, 12),
};

const MEAN_CENTER_ICON: DivIcon = DivIcon {
    class_name: "optimal-marker mean-center",
    html: "<div class=\"marker-inner\"></div>",
    size: (20, 20),
};

const MEDIAN_CENTER_ICON: DivIcon = DivIcon {
    class_name: "optimal-marker median-center",
    html: "<div class=\"marker-inner\"></div>",
    size: (20, 20),
};

/// Mean center and geometric median of the clicked points.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimalLocation {
    pub mean_center: GeoPoint,
    pub mean_distance_km: f64,
    pub median_center: GeoPoint,
    pub median_distance_km: f64,
}

impl OptimalLocation {
    pub fn to_html(&self) -> String {
        format!(
            "<h4>Optimal Location Found</h4>\n\
             <p><strong>Mean Center:</strong> {:.4}, {:.4}</p>\n\
             <p><strong>Total Distance:</strong> {:.2} km</p>\n\
             <p><strong>Median Center:</strong> {:.4}, {:.4}</p>\n\
             <p><strong>Total Distance:</strong> {:.2} km</p>",
            self.mean_center.latitude(),
            self.mean_center.longitude(),
            self.mean_distance_km,
            self.median_center.latitude(),
            self.median_center.longitude(),
            self.median_distance_km,
        )
    }
}

#[derive(Debug)]
pub struct OptimalLocationController {
    points: PointSet,
    point_layer: LayerId,
    lines_layer: LayerId,
    optimal_layer: Option<LayerId>,
    fit_padding: f64,
}

impl OptimalLocationController {
    pub fn new(map: &mut dyn MapSurface, fit_padding: f64) -> Self {
        OptimalLocationController {
            points: PointSet::new(),
            point_layer: map.add_layer(Layer::Group),
            lines_layer: map.add_layer(Layer::Group),
            optimal_layer: None,
            fit_padding,
        }
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn point_layer(&self) -> LayerId {
        self.point_layer
    }

    pub fn lines_layer(&self) -> LayerId {
        self.lines_layer
    }

    pub fn optimal_layer(&self) -> Option<LayerId> {
        self.optimal_layer
    }

    pub fn add_point(&mut self, point: GeoPoint, map: &mut dyn MapSurface) {
        self.points.push(point);
        map.add_to_group(
            self.point_layer,
            Layer::Marker {
                at: point,
                icon: Some(POINT_ICON),
                popup: None,
                popup_open: false,
            },
        );

        if let Some(optimal_layer) = self.optimal_layer.take() {
            map.remove_layer(optimal_layer);
            map.clear_group(self.lines_layer);
        }
    }

    #[instrument(skip_all, fields(points = self.points.len()))]
    pub fn find_optimal(&mut self, map: &mut dyn MapSurface, geometry: &dyn GeometryService) -> Result<OptimalLocation, ViewError> {
        let not_enough_points = || ViewError::NotEnoughPoints {
            required: MIN_POINTS,
            actual: self.points.len(),
        };

        if self.points.len() < MIN_POINTS {
            warn!("📍 Finding optimal location... failed, {} point(s) placed", self.points.len());
            map.set_panel(
                RESULT_ELEMENT,
                "<p class=\"error\">Please add at least 2 points to find optimal location.</p>".to_string(),
            );
            return Err(not_enough_points());
        }

        let points = self.points.as_slice();
        let mean_center = geometry.center(points).ok_or_else(not_enough_points)?;
        let median_center = geometry.center_median(points).ok_or_else(not_enough_points)?;

        let location = OptimalLocation {
            mean_center,
            mean_distance_km: total_distance_km(mean_center, points, geometry),
            median_center,
            median_distance_km: total_distance_km(median_center, points, geometry),
        };
        map.set_panel(RESULT_ELEMENT, location.to_html());

        if let Some(previous) = self.optimal_layer.take() {
            map.remove_layer(previous);
        }

        let optimal_layer = map.add_layer(Layer::Group);
        map.add_to_group(
            optimal_layer,
            Layer::Marker {
                at: mean_center,
                icon: Some(MEAN_CENTER_ICON),
                popup: Some("Mean Center (Centroid)".to_string()),
                popup_open: false,
            },
        );
        map.add_to_group(
            optimal_layer,
            Layer::Marker {
                at: median_center,
                icon: Some(MEDIAN_CENTER_ICON),
                popup: Some("Median Center (Minimizes Distance)".to_string()),
                popup_open: false,
            },
        );
        self.optimal_layer = Some(optimal_layer);

        map.clear_group(self.lines_layer);
        for point in points {
            map.add_to_group(
                self.lines_layer,
                Layer::Polyline {
                    points: vec![median_center, *point],
                    style: PathStyle {
                        dash_array: Some("5, 5"),
                        ..PathStyle::stroke("#e74c3c", 2.0)
                    },
                },
            );
        }

        let mut all_points = points.to_vec();
        all_points.push(mean_center);
        all_points.push(median_center);
        if let Some(bounds) = geometry.bbox(&all_points) {
            map.fit_bounds(bounds.pad(self.fit_padding));
        }

        info!(
            mean_distance_km = location.mean_distance_km,
            median_distance_km = location.median_distance_km,
            "📍 Finding optimal location... OK, median center at {}",
            median_center
        );
        Ok(location)
    }

    pub fn clear(&mut self, map: &mut dyn MapSurface) {
        self.points.clear();
        map.clear_group(self.point_layer);
        if let Some(optimal_layer) = self.optimal_layer.take() {
            map.remove_layer(optimal_layer);
        }
        map.clear_group(self.lines_layer);
        map.set_panel(RESULT_ELEMENT, String::new());
    }
}

fn total_distance_km(center: GeoPoint, points: &[GeoPoint], geometry: &dyn GeometryService) -> f64 {
    points.iter().map(|point| geometry.distance_km(center, *point)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MapView;
    use crate::geometry::GeoService;
    use crate::map::{MemorySurface, Viewport};
    use pretty_assertions::assert_eq;

    fn point(longitude: f64, latitude: f64) -> GeoPoint {
        GeoPoint::new(longitude, latitude).unwrap()
    }

    fn controller_with(points: &[GeoPoint], map: &mut MemorySurface) -> OptimalLocationController {
        let mut controller = OptimalLocationController::new(map, 0.1);
        for point in points {
            controller.add_point(*point, map);
        }
        controller
    }

    #[test]
    fn add_point_places_a_marker() {
        let mut map = MemorySurface::new(MapView::OptimalLocation);
        let controller = controller_with(&[point(85.30, 27.70)], &mut map);

        assert_eq!(controller.points().len(), 1);
        assert_eq!(
            map.members(controller.point_layer()),
            vec![&Layer::Marker {
                at: point(85.30, 27.70),
                icon: Some(POINT_ICON),
                popup: None,
                popup_open: false,
            }]
        );
    }

    #[test]
    fn find_optimal_requires_two_points() {
        let mut map = MemorySurface::new(MapView::OptimalLocation);
        let mut controller = controller_with(&[point(85.30, 27.70)], &mut map);
        let layers_before = map.layer_count();

        let result = controller.find_optimal(&mut map, &GeoService::default());

        assert_eq!(result, Err(ViewError::NotEnoughPoints { required: 2, actual: 1 }));
        assert_eq!(
            map.panel(RESULT_ELEMENT),
            Some("<p class=\"error\">Please add at least 2 points to find optimal location.</p>")
        );
        assert_eq!(map.layer_count(), layers_before);
        assert_eq!(map.viewport(), None);
        assert_eq!(controller.optimal_layer(), None);
    }

    #[test]
    fn find_optimal_places_both_centers_and_the_lines() {
        let mut map = MemorySurface::new(MapView::OptimalLocation);
        let geometry = GeoService::default();
        let points = [point(85.30, 27.70), point(85.32, 27.70), point(85.31, 27.72)];
        let mut controller = controller_with(&points, &mut map);

        let location = controller.find_optimal(&mut map, &geometry).unwrap();

        assert!((location.mean_center.longitude() - 85.31).abs() < 1e-9);
        assert!(geometry.bbox(&points).unwrap().contains(&location.median_center));
        assert!(location.median_distance_km > 0.0);

        let optimal = controller.optimal_layer().unwrap();
        assert_eq!(map.members(optimal).len(), 2);

        let lines = map.members(controller.lines_layer());
        assert_eq!(lines.len(), points.len());
        for (line, point) in lines.iter().zip(points) {
            let Layer::Polyline { points: ends, style } = line else {
                panic!("Expected a polyline");
            };
            assert_eq!(ends, &vec![location.median_center, point]);
            assert_eq!(style.dash_array, Some("5, 5"));
        }

        let mut all_points = points.to_vec();
        all_points.extend([location.mean_center, location.median_center]);
        let expected_bounds = geometry.bbox(&all_points).unwrap().pad(0.1);
        assert_eq!(map.viewport(), Some(&Viewport::Bounds(expected_bounds)));
        assert_eq!(map.panel(RESULT_ELEMENT), Some(location.to_html().as_str()));
    }

    #[test]
    fn adding_a_point_discards_the_previous_result() {
        let mut map = MemorySurface::new(MapView::OptimalLocation);
        let mut controller = controller_with(&[point(85.30, 27.70), point(85.32, 27.70)], &mut map);
        controller.find_optimal(&mut map, &GeoService::default()).unwrap();
        let optimal = controller.optimal_layer().unwrap();

        controller.add_point(point(85.31, 27.72), &mut map);

        assert_eq!(controller.optimal_layer(), None);
        assert_eq!(map.layer(optimal), None);
        assert!(map.members(controller.lines_layer()).is_empty());
    }

    #[test]
    fn clear_resets_points_layers_and_result() {
        let mut map = MemorySurface::new(MapView::OptimalLocation);
        let mut controller = controller_with(&[point(85.30, 27.70), point(85.32, 27.70)], &mut map);
        controller.find_optimal(&mut map, &GeoService::default()).unwrap();

        controller.clear(&mut map);

        assert!(controller.points().is_empty());
        assert!(map.members(controller.point_layer()).is_empty());
        assert!(map.members(controller.lines_layer()).is_empty());
        assert_eq!(controller.optimal_layer(), None);
        assert_eq!(map.panel(RESULT_ELEMENT), Some(""));
        // Only the two empty groups are left
        assert_eq!(map.layer_count(), 2);
    }

    #[test]
    fn renders_the_report() {
        let location = OptimalLocation {
            mean_center: point(85.31234, 27.712345),
            mean_distance_km: 3.14159,
            median_center: point(85.3, 27.7),
            median_distance_km: 2.0,
        };

        assert_eq!(
            location.to_html(),
            "<h4>Optimal Location Found</h4>\n\
             <p><strong>Mean Center:</strong> 27.7123, 85.3123</p>\n\
             <p><strong>Total Distance:</strong> 3.14 km</p>\n\
             <p><strong>Median Center:</strong> 27.7000, 85.3000</p>\n\
             <p><strong>Total Distance:</strong> 2.00 km</p>"
        );
    }
}
