use crate::domain::{BoundingBox, GeoPoint};
use crate::map::{Layer, LayerId};
use std::any::Any;
use std::fmt::Debug;

/// A pannable map plus the panel of text elements next to it.
pub trait MapSurface: Debug + Send {
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    fn fit_bounds(&mut self, bounds: BoundingBox);

    fn add_layer(&mut self, layer: Layer) -> LayerId;

    /// Adds `layer` to an existing group, `None` if `group` is not a group on this surface.
    fn add_to_group(&mut self, group: LayerId, layer: Layer) -> Option<LayerId>;

    /// Removes a layer, and all members if it is a group. Returns false if it was already gone.
    fn remove_layer(&mut self, layer: LayerId) -> bool;

    fn clear_group(&mut self, group: LayerId);

    fn set_panel(&mut self, element: &str, content: String);

    fn as_any(&self) -> &dyn Any;
}
