use crate::domain::{BoundingBox, GeoPoint, MapView};
use crate::map::{Layer, LayerId, MapSurface};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum Viewport {
    Center { center: GeoPoint, zoom: u8 },
    Bounds(BoundingBox),
}

/// [`MapSurface`] that keeps every layer in memory and logs what a renderer would draw.
#[derive(Debug)]
pub struct MemorySurface {
    view: MapView,
    next_id: u64,
    layers: BTreeMap<LayerId, Layer>,
    members: HashMap<LayerId, Vec<LayerId>>,
    parents: HashMap<LayerId, LayerId>,
    viewport: Option<Viewport>,
    panels: HashMap<String, String>,
}

impl MemorySurface {
    pub fn new(view: MapView) -> Self {
        MemorySurface {
            view,
            next_id: 0,
            layers: BTreeMap::new(),
            members: HashMap::new(),
            parents: HashMap::new(),
            viewport: None,
            panels: HashMap::new(),
        }
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    /// Members of a group in insertion order.
    pub fn members(&self, group: LayerId) -> Vec<&Layer> {
        self.members
            .get(&group)
            .map(|ids| ids.iter().filter_map(|id| self.layers.get(id)).collect())
            .unwrap_or_default()
    }

    /// All layers, grouped ones included, in creation order.
    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
        self.layers.iter()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn panel(&self, element: &str) -> Option<&str> {
        self.panels.get(element).map(String::as_str)
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        let id = LayerId::new(self.next_id);
        if matches!(layer, Layer::Group) {
            self.members.insert(id, Vec::new());
        }
        self.layers.insert(id, layer);
        id
    }

    fn remove_recursive(&mut self, id: LayerId) {
        if let Some(members) = self.members.remove(&id) {
            for member in members {
                self.parents.remove(&member);
                self.remove_recursive(member);
            }
        }
        self.layers.remove(&id);
    }
}

impl MapSurface for MemorySurface {
    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        info!(map = %self.view, zoom, "🗺️ Centered map on {}", center);
        self.viewport = Some(Viewport::Center { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        info!(map = %self.view, ?bounds, "🗺️ Fitted map to bounds");
        self.viewport = Some(Viewport::Bounds(bounds));
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let kind = layer.kind();
        let id = self.insert(layer);
        debug!(map = %self.view, layer = %id, "🗺️ Added {}", kind);
        id
    }

    fn add_to_group(&mut self, group: LayerId, layer: Layer) -> Option<LayerId> {
        if !self.members.contains_key(&group) {
            warn!(map = %self.view, group = %group, "⚠️ Cannot add {} to unknown layer group", layer.kind());
            return None;
        }

        let kind = layer.kind();
        let id = self.insert(layer);
        self.members.entry(group).or_default().push(id);
        self.parents.insert(id, group);
        debug!(map = %self.view, layer = %id, group = %group, "🗺️ Added {} to group", kind);
        Some(id)
    }

    fn remove_layer(&mut self, layer: LayerId) -> bool {
        let Some(kind) = self.layers.get(&layer).map(Layer::kind) else {
            debug!(map = %self.view, layer = %layer, "🗺️ Layer already removed");
            return false;
        };

        if let Some(parent) = self.parents.remove(&layer) {
            if let Some(siblings) = self.members.get_mut(&parent) {
                siblings.retain(|id| *id != layer);
            }
        }
        self.remove_recursive(layer);
        debug!(map = %self.view, layer = %layer, "🗺️ Removed {}", kind);
        true
    }

    fn clear_group(&mut self, group: LayerId) {
        let Some(members) = self.members.get_mut(&group).map(std::mem::take) else {
            warn!(map = %self.view, group = %group, "⚠️ Cannot clear unknown layer group");
            return;
        };

        let count = members.len();
        for member in members {
            self.parents.remove(&member);
            self.remove_recursive(member);
        }
        debug!(map = %self.view, group = %group, "🗺️ Cleared {} layer(s) from group", count);
    }

    fn set_panel(&mut self, element: &str, content: String) {
        info!(map = %self.view, element, "📝 {}", content);
        self.panels.insert(element.to_string(), content);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
