use super::connection::serve_connection;
use super::dispatcher::Dispatcher;
use crate::watchdog::Watchdog;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Pause after a failed accept so a persistent error does not spin
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// TCP server accepting satellite connections
pub struct Server {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    watchdog: Watchdog,
}

impl Server {
    pub async fn bind(addr: &str, dispatcher: Dispatcher, watchdog: Watchdog) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            dispatcher: Arc::new(dispatcher),
            watchdog,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the watchdog and accept connections forever
    pub async fn run(self) -> Result<()> {
        let Server {
            listener,
            dispatcher,
            watchdog,
        } = self;

        watchdog.spawn();

        loop {
            info!("Listening for new clients");

            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };

            info!("New client connected: {}", peer);

            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                let peer = peer.to_string();
                serve_connection(stream, &peer, &dispatcher).await;
            });
        }
    }
}
