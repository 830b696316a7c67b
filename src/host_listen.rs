use crate::actions::Action;
use crate::domain::events::Event;
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc::Sender;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, instrument, warn};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("could not read from host: {0}")]
    Io(#[from] std::io::Error),
    #[error("dispatcher stopped before the host finished")]
    DispatcherClosed,
}

/// Reads one JSON action per line and forwards it to the dispatcher. Blank lines are skipped and
/// malformed ones are logged and dropped. End of input shuts the dispatcher down.
#[instrument(skip_all)]
pub async fn listen<R>(reader: R, tx: Sender<Event>) -> Result<(), HostError>
where
    R: AsyncBufRead + Unpin,
{
    info!("👂 Listening for UI actions...");
    let mut lines = LinesStream::new(reader.lines());
    let mut received = 0;

    while let Some(line) = lines.next().await {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Box<dyn Action>>(line) {
            Ok(action) => {
                debug!(action = action.kind(), "🔹 Received action");
                received += 1;
                tx.send(Event::Ui(action)).await.map_err(|_| HostError::DispatcherClosed)?;
            }
            Err(e) => warn!(line, "⚠️ Skipping malformed action: {}", e),
        }
    }

    info!(received, "🔴 Host input ended");
    tx.send(Event::Shutdown).await.map_err(|_| HostError::DispatcherClosed)
}
