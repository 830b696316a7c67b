use crate::actions::action::Action;
use crate::domain::MapView;
use crate::map::LayerId;

#[derive(Debug)]
pub enum Event {
    Ui(Box<dyn Action>),
    LayerExpired { view: MapView, layer: LayerId },
    Shutdown,
}
