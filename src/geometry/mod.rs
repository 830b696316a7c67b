mod geo_service;
pub mod median;
mod service;

pub use geo_service::GeoService;
pub use service::GeometryService;
