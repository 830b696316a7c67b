use crate::domain::{BoundingBox, DistanceThreshold, GeoPoint};
use crate::geometry::median::MedianOptions;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    map: Map,
    isochrone: Isochrone,
    optimal_location: OptimalLocation,
    analysis: Analysis,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("CARTOGRAPH").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn isochrone(&self) -> &Isochrone {
        &self.isochrone
    }

    pub fn optimal_location(&self) -> &OptimalLocation {
        &self.optimal_location
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: usize,
    scheduler_buffer_size: usize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }

    pub fn scheduler_buffer_size(&self) -> usize {
        self.scheduler_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Map {
    center: GeoPoint,
    zoom: u8,
    tile_url: String,
    attribution: String,
}

impl Map {
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tile_url(&self) -> &str {
        &self.tile_url
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }
}

#[derive(Debug, Deserialize)]
pub struct Isochrone {
    center: String,
    time_minutes: u32,
    speed_kmh: u32,
}

impl Isochrone {
    /// Initial text of the center input, `lat, lng`.
    pub fn center(&self) -> &str {
        &self.center
    }

    pub fn time_minutes(&self) -> u32 {
        self.time_minutes
    }

    pub fn speed_kmh(&self) -> u32 {
        self.speed_kmh
    }
}

#[derive(Debug, Deserialize)]
pub struct OptimalLocation {
    median: MedianOptions,
    fit_padding: f64,
}

impl OptimalLocation {
    pub fn median(&self) -> &MedianOptions {
        &self.median
    }

    pub fn fit_padding(&self) -> f64 {
        self.fit_padding
    }
}

#[derive(Debug, Deserialize)]
pub struct Analysis {
    distance_threshold_km: DistanceThreshold,
    #[serde(with = "humantime_serde")]
    highlight_duration: Duration,
    sample_bbox: [f64; 4],
    facility_count: usize,
    population_count: usize,
    seed: Option<u64>,
}

impl Analysis {
    pub fn distance_threshold(&self) -> DistanceThreshold {
        self.distance_threshold_km
    }

    pub fn highlight_duration(&self) -> Duration {
        self.highlight_duration
    }

    pub fn sample_bbox(&self) -> BoundingBox {
        BoundingBox::from(self.sample_bbox)
    }

    pub fn facility_count(&self) -> usize {
        self.facility_count
    }

    pub fn population_count(&self) -> usize {
        self.population_count
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    event_buffer_size: 8,
                    scheduler_buffer_size: 8,
                },
                map: Map {
                    center: GeoPoint::new(85.3240, 27.7172).unwrap(),
                    zoom: 12,
                    tile_url: "https://tiles.test/{z}/{x}/{y}.png".to_string(),
                    attribution: "test".to_string(),
                },
                isochrone: Isochrone {
                    center: "27.7172, 85.3240".to_string(),
                    time_minutes: 15,
                    speed_kmh: 30,
                },
                optimal_location: OptimalLocation {
                    median: MedianOptions::default(),
                    fit_padding: 0.1,
                },
                analysis: Analysis {
                    distance_threshold_km: DistanceThreshold::from_km(2.0).unwrap(),
                    highlight_duration: Duration::from_secs(5),
                    sample_bbox: [85.2, 27.6, 85.4, 27.8],
                    facility_count: 15,
                    population_count: 20,
                    seed: Some(42),
                },
            },
        }
    }

    pub fn isochrone_center(mut self, center: &str) -> Self {
        self.config.isochrone.center = center.to_string();
        self
    }

    pub fn distance_threshold_km(mut self, km: f64) -> Self {
        self.config.analysis.distance_threshold_km = DistanceThreshold::from_km(km).unwrap();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_the_shipped_configuration() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(include_str!("../config.toml"), FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.analysis().distance_threshold().km(), 2.0);
        assert_eq!(config.analysis().highlight_duration(), Duration::from_secs(5));
        assert_eq!(config.analysis().sample_bbox(), BoundingBox::from([85.2, 27.6, 85.4, 27.8]));
        assert_eq!(config.analysis().facility_count(), 15);
        assert_eq!(config.analysis().population_count(), 20);
        assert_eq!(config.optimal_location().median(), &MedianOptions::default());
        assert_eq!(config.map().zoom(), 12);
        assert_eq!(GeoPoint::parse_lat_lng(config.isochrone().center()), Some(config.map().center()));
    }

    #[test]
    fn rejects_a_non_positive_threshold() {
        let toml = include_str!("../config.toml").replace("distance_threshold_km = 2.0", "distance_threshold_km = 0.0");
        let result = Config::builder()
            .add_source(config::File::from_str(&toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>();

        assert!(result.is_err());
    }
}
