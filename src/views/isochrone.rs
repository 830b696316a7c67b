use crate::domain::GeoPoint;
use crate::geometry::GeometryService;
use crate::map::{Layer, LayerId, MapSurface, PathStyle};
use tracing::{debug, info, instrument};

const CENTER_POPUP: &str = "Center point for isochrone";

/// Reachable area around a center point, approximated by a circle of `speed * time`.
#[derive(Debug)]
pub struct IsochroneController {
    center: GeoPoint,
    zoom: u8,
    time_minutes: u32,
    speed_kmh: u32,
    isochrone_layer: Option<LayerId>,
    center_marker: Option<LayerId>,
}

impl IsochroneController {
    pub fn new(center: GeoPoint, zoom: u8, time_minutes: u32, speed_kmh: u32) -> Self {
        IsochroneController {
            center,
            zoom,
            time_minutes,
            speed_kmh,
            isochrone_layer: None,
            center_marker: None,
        }
    }

    pub fn init(&mut self, map: &mut dyn MapSurface) {
        self.replace_center_marker(map);
        map.set_panel("time-value", self.time_minutes.to_string());
        map.set_panel("speed-value", self.speed_kmh.to_string());
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn isochrone_layer(&self) -> Option<LayerId> {
        self.isochrone_layer
    }

    /// Distance covered at the current speed within the current time.
    pub fn reach_km(&self) -> f64 {
        self.speed_kmh as f64 * self.time_minutes as f64 / 60.0
    }

    #[instrument(skip_all, fields(time_minutes = self.time_minutes, speed_kmh = self.speed_kmh))]
    pub fn generate(&mut self, map: &mut dyn MapSurface, geometry: &dyn GeometryService) {
        if let Some(previous) = self.isochrone_layer.take() {
            map.remove_layer(previous);
        }

        let reach_km = self.reach_km();
        let ring = geometry.buffer(self.center, reach_km);
        let bounds = geometry.bbox(&ring);

        let layer = map.add_layer(Layer::Polygon {
            ring,
            style: PathStyle {
                fill_color: Some("#3498db"),
                fill_opacity: Some(0.5),
                ..PathStyle::stroke("#2980b9", 2.0)
            },
        });
        self.isochrone_layer = Some(layer);

        if let Some(bounds) = bounds {
            map.fit_bounds(bounds);
        }
        info!(reach_km, "⭕ Generated isochrone around {}", self.center);
    }

    /// Moves the center to the `lat, lng` in `text`. Malformed text is ignored and leaves the map
    /// untouched.
    pub fn set_center(&mut self, text: &str, map: &mut dyn MapSurface) -> bool {
        let Some(center) = GeoPoint::parse_lat_lng(text) else {
            debug!(text, "⭕ Ignoring malformed isochrone center");
            return false;
        };

        self.center = center;
        map.set_view(center, self.zoom);
        self.replace_center_marker(map);
        true
    }

    pub fn set_time(&mut self, minutes: u32, map: &mut dyn MapSurface) {
        self.time_minutes = minutes;
        map.set_panel("time-value", minutes.to_string());
    }

    pub fn set_speed(&mut self, kmh: u32, map: &mut dyn MapSurface) {
        self.speed_kmh = kmh;
        map.set_panel("speed-value", kmh.to_string());
    }

    fn replace_center_marker(&mut self, map: &mut dyn MapSurface) {
        if let Some(marker) = self.center_marker.take() {
            map.remove_layer(marker);
        }

        self.center_marker = Some(map.add_layer(Layer::Marker {
            at: self.center,
            icon: None,
            popup: Some(CENTER_POPUP.to_string()),
            popup_open: true,
        }));
    }
}
