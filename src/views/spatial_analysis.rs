use crate::analysis::{ColocationResult, Interpretation, estimate};
use crate::domain::{DistanceThreshold, PointSet};
use crate::geometry::GeometryService;
use crate::map::{CircleStyle, Layer, LayerId, MapSurface, PathStyle};
use std::time::Duration;
use tracing::{info, instrument};

const FACILITY_STYLE: CircleStyle = CircleStyle {
    radius: 8.0,
    fill_color: "#e74c3c",
    color: "#c0392b",
    weight: 1.0,
    opacity: 1.0,
    fill_opacity: 0.8,
};

const POPULATION_STYLE: CircleStyle = CircleStyle {
    radius: 6.0,
    fill_color: "#3498db",
    color: "#2980b9",
    weight: 1.0,
    opacity: 1.0,
    fill_opacity: 0.8,
};

/// A finished analysis: the estimate and the highlight overlay that should disappear after
/// `expires_after`.
#[derive(Debug)]
pub struct AnalysisRun {
    pub result: ColocationResult,
    pub highlight: LayerId,
    pub expires_after: Duration,
}

/// Colocation of healthcare facilities with population centers.
#[derive(Debug)]
pub struct SpatialAnalysisController {
    facilities: PointSet,
    population: PointSet,
    threshold: DistanceThreshold,
    highlight_duration: Duration,
    facility_layer: LayerId,
    population_layer: LayerId,
}

impl SpatialAnalysisController {
    pub fn new(
        facilities: PointSet,
        population: PointSet,
        threshold: DistanceThreshold,
        highlight_duration: Duration,
        map: &mut dyn MapSurface,
    ) -> Self {
        let facility_layer = add_point_layer(map, &facilities, FACILITY_STYLE, "Healthcare Facility");
        let population_layer = add_point_layer(map, &population, POPULATION_STYLE, "Population Center");

        SpatialAnalysisController {
            facilities,
            population,
            threshold,
            highlight_duration,
            facility_layer,
            population_layer,
        }
    }

    pub fn facilities(&self) -> &PointSet {
        &self.facilities
    }

    pub fn population(&self) -> &PointSet {
        &self.population
    }

    pub fn facility_layer(&self) -> LayerId {
        self.facility_layer
    }

    pub fn population_layer(&self) -> LayerId {
        self.population_layer
    }

    #[instrument(skip_all, fields(threshold_km = self.threshold.km()))]
    pub fn run_analysis(&mut self, map: &mut dyn MapSurface, geometry: &dyn GeometryService) -> AnalysisRun {
        let result = estimate(&self.facilities, &self.population, self.threshold, geometry);
        let interpretation = Interpretation::from_quotient(result.quotient());

        map.set_panel("cq-value", format!("{:.2}", result.quotient()));
        map.set_panel("cq-interpretation", interpretation.to_string());

        let highlight = map.add_layer(Layer::Group);
        for (facility, population_center) in result.proximate_pairs() {
            map.add_to_group(
                highlight,
                Layer::Polyline {
                    points: vec![*facility, *population_center],
                    style: PathStyle {
                        opacity: Some(0.7),
                        ..PathStyle::stroke("#27ae60", 2.0)
                    },
                },
            );
        }

        info!(
            quotient = result.quotient(),
            fallback = result.is_fallback(),
            pairs = result.proximate_pairs().len(),
            "📊 Colocation analysis... OK, {:?}",
            interpretation
        );

        AnalysisRun {
            result,
            highlight,
            expires_after: self.highlight_duration,
        }
    }
}

fn add_point_layer(map: &mut dyn MapSurface, points: &PointSet, style: CircleStyle, popup: &str) -> LayerId {
    let group = map.add_layer(Layer::Group);
    for point in points {
        map.add_to_group(
            group,
            Layer::CircleMarker {
                at: *point,
                style: style.clone(),
                popup: Some(popup.to_string()),
            },
        );
    }
    group
}
