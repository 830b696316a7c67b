mod bounding_box;
mod distance_threshold;
mod domain_error;
pub mod events;
mod geo_point;
mod map_view;
mod point_set;

pub use bounding_box::BoundingBox;
pub use distance_threshold::DistanceThreshold;
pub use domain_error::DomainError;
pub use geo_point::GeoPoint;
pub use map_view::MapView;
pub use point_set::PointSet;
