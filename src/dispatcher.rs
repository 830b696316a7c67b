use crate::domain::events::Event;
use crate::scheduler::SchedulerCommand;
use crate::views::Workspace;
use thiserror::Error;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, instrument, warn};

#[derive(Error, Debug, PartialEq)]
pub enum DispatchError {
    #[error("scheduler channel closed")]
    SchedulerClosed,
}

/// Single owner of all view state. Events are handled one at a time, so controllers never see
/// concurrent mutation.
#[derive(Debug)]
pub struct Dispatcher {
    workspace: Workspace,
    rx: Receiver<Event>,
    scheduler_tx: Sender<SchedulerCommand>,
}

impl Dispatcher {
    pub fn new(workspace: Workspace, rx: Receiver<Event>, scheduler_tx: Sender<SchedulerCommand>) -> Self {
        Dispatcher {
            workspace,
            rx,
            scheduler_tx,
        }
    }

    #[cfg(test)]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            match event {
                Event::Ui(action) => match action.execute(&mut self.workspace) {
                    Ok(Some(command)) => {
                        if let Err(e) = self.schedule(command).await {
                            warn!(action = action.kind(), "⚠️ Dropping deferred work: {}", e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(action = action.kind(), "⚠️ Could not execute action '{}': {}", action.kind(), e);
                    }
                },
                Event::LayerExpired { view, layer } => {
                    if self.workspace.map_mut(view).remove_layer(layer) {
                        debug!(map = %view, layer = %layer, "🕗 Removed expired layer");
                    }
                }
                Event::Shutdown => {
                    info!("🔴 Shutting down dispatcher");
                    break;
                }
            }
        }
    }

    async fn schedule(&self, command: SchedulerCommand) -> Result<(), DispatchError> {
        self.scheduler_tx.send(command).await.map_err(|_| DispatchError::SchedulerClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use crate::domain::MapView;
    use crate::views::test_support::{memory_map, workspace};
    use pretty_assertions::assert_eq;
    use test_log::test;
    use tokio::sync::mpsc;

    fn action(json: &str) -> Event {
        Event::Ui(serde_json::from_str::<Box<dyn Action>>(json).unwrap())
    }

    #[test(tokio::test)]
    async fn forwards_deferred_work_to_the_scheduler() {
        let (tx, rx) = mpsc::channel(8);
        let (scheduler_tx, mut scheduler_rx) = mpsc::channel(8);
        let mut dispatcher = Dispatcher::new(workspace(), rx, scheduler_tx);

        tx.send(action(r#"{"type": "runAnalysis"}"#)).await.unwrap();
        tx.send(action(r#"{"type": "generateIsochrone"}"#)).await.unwrap();
        tx.send(Event::Shutdown).await.unwrap();
        dispatcher.listen().await;

        let Some(SchedulerCommand::RemoveLayerAfter { view, layer, .. }) = scheduler_rx.recv().await else {
            panic!("Expected a deferred removal");
        };
        assert_eq!(view, MapView::SpatialAnalysis);
        assert!(memory_map(dispatcher.workspace(), view).layer(layer).is_some());
        assert!(scheduler_rx.try_recv().is_err());
    }

    #[test(tokio::test)]
    async fn removes_expired_layers() {
        let (tx, rx) = mpsc::channel(8);
        let (scheduler_tx, mut scheduler_rx) = mpsc::channel(8);
        let mut dispatcher = Dispatcher::new(workspace(), rx, scheduler_tx);

        tx.send(action(r#"{"type": "runAnalysis"}"#)).await.unwrap();
        tx.send(Event::Shutdown).await.unwrap();
        dispatcher.listen().await;
        let Some(SchedulerCommand::RemoveLayerAfter { view, layer, .. }) = scheduler_rx.recv().await else {
            panic!("Expected a deferred removal");
        };

        let (tx, rx) = mpsc::channel(8);
        dispatcher.rx = rx;
        tx.send(Event::LayerExpired { view, layer }).await.unwrap();
        tx.send(Event::LayerExpired { view, layer }).await.unwrap();
        tx.send(Event::Shutdown).await.unwrap();
        dispatcher.listen().await;

        assert_eq!(memory_map(dispatcher.workspace(), view).layer(layer), None);
    }

    #[test(tokio::test)]
    async fn keeps_running_after_a_failed_action() {
        let (tx, rx) = mpsc::channel(8);
        let (scheduler_tx, _scheduler_rx) = mpsc::channel(8);
        let mut dispatcher = Dispatcher::new(workspace(), rx, scheduler_tx);

        tx.send(action(r#"{"type": "findOptimal"}"#)).await.unwrap();
        tx.send(action(r#"{"type": "addPoint", "lat": 27.7, "lng": 85.3}"#)).await.unwrap();
        tx.send(Event::Shutdown).await.unwrap();
        dispatcher.listen().await;

        assert_eq!(
            memory_map(dispatcher.workspace(), MapView::OptimalLocation).panel("optimal-result"),
            Some("<p class=\"error\">Please add at least 2 points to find optimal location.</p>")
        );
        assert_eq!(dispatcher.workspace.optimal_location().controller.points().len(), 1);
    }

    #[test(tokio::test)]
    async fn schedule_fails_once_the_scheduler_is_gone() {
        let (tx, rx) = mpsc::channel(8);
        let (scheduler_tx, scheduler_rx) = mpsc::channel(8);
        let mut dispatcher = Dispatcher::new(workspace(), rx, scheduler_tx);
        drop(scheduler_rx);

        tx.send(action(r#"{"type": "runAnalysis"}"#)).await.unwrap();
        tx.send(Event::Shutdown).await.unwrap();
        dispatcher.listen().await;

        let layer_count = memory_map(dispatcher.workspace(), MapView::SpatialAnalysis).layer_count();
        let view = dispatcher.workspace.spatial_analysis();
        let run = view.controller.run_analysis(view.map, view.geometry);
        let result = dispatcher
            .schedule(SchedulerCommand::RemoveLayerAfter {
                view: MapView::SpatialAnalysis,
                layer: run.highlight,
                delay: run.expires_after,
            })
            .await;

        assert_eq!(result, Err(DispatchError::SchedulerClosed));
        assert!(memory_map(dispatcher.workspace(), MapView::SpatialAnalysis).layer_count() > layer_count);
    }

    #[test(tokio::test)]
    async fn stops_when_every_sender_is_dropped() {
        let (tx, rx) = mpsc::channel(8);
        let (scheduler_tx, _scheduler_rx) = mpsc::channel(8);
        let mut dispatcher = Dispatcher::new(workspace(), rx, scheduler_tx);

        drop(tx);
        dispatcher.listen().await;
    }
}
