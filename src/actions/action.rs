use crate::actions::action_registry::{ACTION_REGISTRY, known_actions, register_action};
use crate::domain::{GeoPoint, MapView};
use crate::scheduler::SchedulerCommand;
use crate::views::{ViewError, Workspace};
use action_macros::ui_action;
use serde::{Deserialize, Deserializer};
use std::any::Any;
use std::fmt::Debug;
use std::sync::PoisonError;
use tracing::instrument;

/// A named UI interaction. Executing it mutates the workspace and may hand deferred work to the
/// scheduler.
pub trait Action: Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError>;

    fn as_any(&self) -> &dyn Any;
}

impl<'de> Deserialize<'de> for Box<dyn Action> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| serde::de::Error::custom("missing field 'type'"))?;

        let factory = ACTION_REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .copied();
        match factory {
            Some(factory) => factory(&value).map_err(serde::de::Error::custom),
            None => Err(serde::de::Error::custom(format!(
                "unknown action type '{}', known types: {}",
                kind,
                known_actions().join(", ")
            ))),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("generateIsochrone")]
pub struct GenerateIsochrone {}

impl Action for GenerateIsochrone {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.isochrone();
        view.controller.generate(view.map, view.geometry);
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("setIsochroneCenter")]
pub struct SetIsochroneCenter {
    value: String,
}

impl Action for SetIsochroneCenter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.isochrone();
        view.controller.set_center(&self.value, view.map);
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("setIsochroneTime")]
pub struct SetIsochroneTime {
    minutes: u32,
}

impl Action for SetIsochroneTime {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.isochrone();
        view.controller.set_time(self.minutes, view.map);
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("setIsochroneSpeed")]
pub struct SetIsochroneSpeed {
    kmh: u32,
}

impl Action for SetIsochroneSpeed {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.isochrone();
        view.controller.set_speed(self.kmh, view.map);
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A click on the optimal location map.
#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("addPoint")]
pub struct AddPoint {
    lat: f64,
    lng: f64,
}

impl Action for AddPoint {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let point = GeoPoint::new(self.lng, self.lat)?;
        let view = workspace.optimal_location();
        view.controller.add_point(point, view.map);
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("findOptimal")]
pub struct FindOptimal {}

impl Action for FindOptimal {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.optimal_location();
        view.controller.find_optimal(view.map, view.geometry)?;
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("clearPoints")]
pub struct ClearPoints {}

impl Action for ClearPoints {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.optimal_location();
        view.controller.clear(view.map);
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[ui_action("runAnalysis")]
pub struct RunAnalysis {}

impl Action for RunAnalysis {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    #[instrument(fields(action = self.kind()), skip_all)]
    fn execute(&self, workspace: &mut Workspace) -> Result<Option<SchedulerCommand>, ViewError> {
        let view = workspace.spatial_analysis();
        let run = view.controller.run_analysis(view.map, view.geometry);
        Ok(Some(SchedulerCommand::RemoveLayerAfter {
            view: MapView::SpatialAnalysis,
            layer: run.highlight,
            delay: run.expires_after,
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
