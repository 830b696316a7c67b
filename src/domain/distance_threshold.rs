use crate::domain::DomainError;
use serde::Deserialize;

/// Search radius in kilometers, always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct DistanceThreshold(f64);

impl DistanceThreshold {
    pub fn from_km(km: f64) -> Result<Self, DomainError> {
        if km.is_finite() && km > 0.0 {
            Ok(DistanceThreshold(km))
        } else {
            Err(DomainError::InvalidThreshold(km))
        }
    }

    pub fn km(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for DistanceThreshold {
    type Error = DomainError;

    fn try_from(km: f64) -> Result<Self, Self::Error> {
        DistanceThreshold::from_km(km)
    }
}
