use crate::domain::MapView;
use crate::domain::events::Event;
use crate::map::LayerId;
use std::time::Duration;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, instrument, warn};

#[derive(Debug, PartialEq)]
pub enum SchedulerCommand {
    RemoveLayerAfter { view: MapView, layer: LayerId, delay: Duration },
}

/// Runs deferred work. Each command gets its own one-shot timer; nothing is deduplicated or
/// cancelled. Expiry is reported back as an [`Event`] so view state stays with the dispatcher.
#[instrument(skip_all)]
pub async fn scheduler(mut rx: Receiver<SchedulerCommand>, events_tx: Sender<Event>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            SchedulerCommand::RemoveLayerAfter { view, layer, delay } => {
                debug!("🕗 Scheduling removal of layer {} on {} after {:?}... OK", layer, view, delay);
                let events_tx = events_tx.clone();
                tokio::spawn(async move {
                    sleep_until(Instant::now() + delay).await;

                    debug!("🕗 Layer {} on {} expired", layer, view);
                    if events_tx.send(Event::LayerExpired { view, layer }).await.is_err() {
                        warn!("🕗 Dropping expiry of layer {}, dispatcher is gone", layer);
                    }
                });
            }
        }
    }
}
