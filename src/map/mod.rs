mod layer;
mod memory_surface;
mod surface;

pub use layer::{CircleStyle, DivIcon, Layer, LayerId, PathStyle};
pub use memory_surface::{MemorySurface, Viewport};
pub use surface::MapSurface;
