use crate::domain::GeoPoint;

/// Axis-aligned box in degrees, `[west, south, east, north]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        BoundingBox {
            west: west.min(east),
            south: south.min(north),
            east: west.max(east),
            north: south.max(north),
        }
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.west..=self.east).contains(&point.longitude()) && (self.south..=self.north).contains(&point.latitude())
    }

    /// Grows every side by `ratio` times the extent along that axis.
    pub fn pad(&self, ratio: f64) -> Self {
        let width_buffer = self.width() * ratio;
        let height_buffer = self.height() * ratio;

        BoundingBox {
            west: self.west - width_buffer,
            south: self.south - height_buffer,
            east: self.east + width_buffer,
            north: self.north + height_buffer,
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([west, south, east, north]: [f64; 4]) -> Self {
        BoundingBox::new(west, south, east, north)
    }
}
