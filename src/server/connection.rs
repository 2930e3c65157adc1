use super::dispatcher::Dispatcher;
use crate::protocol::{Event, FrameError, FrameReader};
use futures::stream::StreamExt;
use tokio::io::{AsyncRead, BufReader};
use tracing::{error, info};

/// Read and dispatch events from one satellite connection until it ends
///
/// Returns the error that ended the connection.
pub async fn serve_connection<S>(stream: S, peer: &str, dispatcher: &Dispatcher) -> FrameError
where
    S: AsyncRead + Unpin,
{
    let frames = FrameReader::new(BufReader::new(stream)).into_stream();
    futures::pin_mut!(frames);

    while let Some(frame) = frames.next().await {
        let message = match frame {
            Ok(message) => message,
            Err(e) if e.is_fatal() => {
                match &e {
                    FrameError::Closed => info!("Client {} disconnected", peer),
                    _ => error!("Closing connection from {}: {}", peer, e),
                }
                return e;
            }
            Err(e) => {
                error!("Discarding event from {}: {}", peer, e);
                continue;
            }
        };

        match Event::try_from(message) {
            Ok(event) => {
                // Notification tasks are detached
                let _ = dispatcher.dispatch(event).await;
            }
            Err(e) => error!("Discarding event from {}: {}", peer, e),
        }
    }

    FrameError::Closed
}
