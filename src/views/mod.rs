mod isochrone;
mod optimal_location;
mod spatial_analysis;

pub use isochrone::IsochroneController;
pub use optimal_location::{OptimalLocation, OptimalLocationController};
pub use spatial_analysis::{AnalysisRun, SpatialAnalysisController};

use crate::app_config::AppConfig;
use crate::domain::{DomainError, GeoPoint, MapView};
use crate::geometry::GeometryService;
use crate::map::{Layer, MapSurface};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq)]
pub enum ViewError {
    #[error("at least {required} points are needed, found {actual}")]
    NotEnoughPoints { required: usize, actual: usize },
    #[error(transparent)]
    InvalidPoint(#[from] DomainError),
}

/// Borrowed state a handler needs to act on one view.
pub struct ViewContext<'a, C> {
    pub controller: &'a mut C,
    pub map: &'a mut dyn MapSurface,
    pub geometry: &'a dyn GeometryService,
}

#[derive(Debug)]
struct View<C> {
    controller: C,
    map: Box<dyn MapSurface>,
}

/// The three views with their maps. Created once at start-up and owned by the dispatcher.
#[derive(Debug)]
pub struct Workspace {
    geometry: Arc<dyn GeometryService>,
    isochrone: View<IsochroneController>,
    optimal_location: View<OptimalLocationController>,
    spatial_analysis: View<SpatialAnalysisController>,
}

impl Workspace {
    pub fn new<F>(config: &AppConfig, geometry: Arc<dyn GeometryService>, new_surface: F) -> Self
    where
        F: Fn(MapView) -> Box<dyn MapSurface>,
    {
        let open_map = |view: MapView| {
            let mut map = new_surface(view);
            map.set_view(config.map().center(), config.map().zoom());
            map.add_layer(Layer::Tiles {
                url_template: config.map().tile_url().to_string(),
                attribution: config.map().attribution().to_string(),
            });
            map
        };

        let mut isochrone_map = open_map(MapView::Isochrone);
        let isochrone_center = GeoPoint::parse_lat_lng(config.isochrone().center()).unwrap_or_else(|| {
            warn!(center = config.isochrone().center(), "⚠️ Invalid isochrone center, using the map center");
            config.map().center()
        });
        let mut isochrone = IsochroneController::new(
            isochrone_center,
            config.map().zoom(),
            config.isochrone().time_minutes(),
            config.isochrone().speed_kmh(),
        );
        isochrone.init(isochrone_map.as_mut());

        let mut optimal_location_map = open_map(MapView::OptimalLocation);
        let optimal_location = OptimalLocationController::new(optimal_location_map.as_mut(), config.optimal_location().fit_padding());

        let analysis = config.analysis();
        let mut spatial_analysis_map = open_map(MapView::SpatialAnalysis);
        let facilities = geometry.random_points(analysis.facility_count(), &analysis.sample_bbox());
        let population = geometry.random_points(analysis.population_count(), &analysis.sample_bbox());
        info!(
            facilities = facilities.len(),
            population = population.len(),
            "🎲 Generated sample points"
        );
        let spatial_analysis = SpatialAnalysisController::new(
            facilities,
            population,
            analysis.distance_threshold(),
            analysis.highlight_duration(),
            spatial_analysis_map.as_mut(),
        );

        Workspace {
            geometry,
            isochrone: View {
                controller: isochrone,
                map: isochrone_map,
            },
            optimal_location: View {
                controller: optimal_location,
                map: optimal_location_map,
            },
            spatial_analysis: View {
                controller: spatial_analysis,
                map: spatial_analysis_map,
            },
        }
    }

    pub fn isochrone(&mut self) -> ViewContext<'_, IsochroneController> {
        ViewContext {
            controller: &mut self.isochrone.controller,
            map: self.isochrone.map.as_mut(),
            geometry: self.geometry.as_ref(),
        }
    }

    pub fn optimal_location(&mut self) -> ViewContext<'_, OptimalLocationController> {
        ViewContext {
            controller: &mut self.optimal_location.controller,
            map: self.optimal_location.map.as_mut(),
            geometry: self.geometry.as_ref(),
        }
    }

    pub fn spatial_analysis(&mut self) -> ViewContext<'_, SpatialAnalysisController> {
        ViewContext {
            controller: &mut self.spatial_analysis.controller,
            map: self.spatial_analysis.map.as_mut(),
            geometry: self.geometry.as_ref(),
        }
    }

    pub fn map(&self, view: MapView) -> &dyn MapSurface {
        match view {
            MapView::Isochrone => self.isochrone.map.as_ref(),
            MapView::OptimalLocation => self.optimal_location.map.as_ref(),
            MapView::SpatialAnalysis => self.spatial_analysis.map.as_ref(),
        }
    }

    pub fn map_mut(&mut self, view: MapView) -> &mut dyn MapSurface {
        match view {
            MapView::Isochrone => self.isochrone.map.as_mut(),
            MapView::OptimalLocation => self.optimal_location.map.as_mut(),
            MapView::SpatialAnalysis => self.spatial_analysis.map.as_mut(),
        }
    }
}
