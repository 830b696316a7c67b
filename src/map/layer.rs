use crate::domain::GeoPoint;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub(in crate::map) fn new(id: u64) -> Self {
        LayerId(id)
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: Option<f64>,
    pub fill_color: Option<&'static str>,
    pub fill_opacity: Option<f64>,
    pub dash_array: Option<&'static str>,
}

impl PathStyle {
    pub fn stroke(color: &'static str, weight: f64) -> Self {
        PathStyle {
            color,
            weight,
            opacity: None,
            fill_color: None,
            fill_opacity: None,
            dash_array: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

/// Marker icon rendered from an HTML snippet instead of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct DivIcon {
    pub class_name: &'static str,
    pub html: &'static str,
    pub size: (u32, u32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Tiles {
        url_template: String,
        attribution: String,
    },
    Marker {
        at: GeoPoint,
        icon: Option<DivIcon>,
        popup: Option<String>,
        popup_open: bool,
    },
    CircleMarker {
        at: GeoPoint,
        style: CircleStyle,
        popup: Option<String>,
    },
    Polygon {
        ring: Vec<GeoPoint>,
        style: PathStyle,
    },
    Polyline {
        points: Vec<GeoPoint>,
        style: PathStyle,
    },
    Group,
}

impl Layer {
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Tiles { .. } => "tile layer",
            Layer::Marker { .. } => "marker",
            Layer::CircleMarker { .. } => "circle marker",
            Layer::Polygon { .. } => "polygon",
            Layer::Polyline { .. } => "polyline",
            Layer::Group => "layer group",
        }
    }
}
