use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapView {
    Isochrone,
    OptimalLocation,
    SpatialAnalysis,
}

impl Display for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapView::Isochrone => write!(f, "isochrone-map"),
            MapView::OptimalLocation => write!(f, "optimal-map"),
            MapView::SpatialAnalysis => write!(f, "analysis-map"),
        }
    }
}
