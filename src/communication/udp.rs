// src/communication/udp.rs - Datagram transport loop
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::arm::Arm;
use crate::command::{CommandProcessor, Reply};
use crate::config::{Config, ConfigError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Receives command datagrams and answers each from its own task, so a slow
/// reply to one peer never holds up another.
pub struct UdpServer {
    socket: Arc<UdpSocket>,
    processor: CommandProcessor,
    max_datagram_size: usize,
}

impl UdpServer {
    /// Bind to the configured address and build a fresh arm for it.
    pub async fn bind(config: &Config) -> Result<Self, ServerError> {
        Self::bind_with_arm(config, Arm::new(config)).await
    }

    pub async fn bind_with_arm(config: &Config, arm: Arm) -> Result<Self, ServerError> {
        config.validate()?;
        let addr = config.server.bind_addr()?;
        let socket = UdpSocket::bind(addr).await?;
        tracing::info!(
            "Arm command server listening on udp://{} ({} joints)",
            socket.local_addr()?,
            arm.joint_count()
        );
        Ok(Self {
            socket: Arc::new(socket),
            processor: CommandProcessor::new(arm),
            max_datagram_size: config.server.max_datagram_size,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn arm(&self) -> &Arm {
        self.processor.arm()
    }

    /// Serve until `shutdown` is cancelled, then drain in-flight requests and
    /// stop all motion before the socket is released.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), ServerError> {
        let mut buf = vec![0u8; self.max_datagram_size];
        let mut requests = JoinSet::new();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Transport loop shutting down");
                    break;
                }
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok((len, peer)) => self.spawn_request(&mut requests, buf[..len].to_vec(), peer),
                    // e.g. ICMP port unreachable from a vanished client
                    Err(e) => tracing::warn!("UDP receive error: {}", e),
                },
                // Reap finished requests so the set stays small
                Some(_) = requests.join_next(), if !requests.is_empty() => {}
            }
        }
        if !requests.is_empty() {
            tracing::debug!("Waiting for {} in-flight requests", requests.len());
        }
        while requests.join_next().await.is_some() {}
        self.processor.arm().shutdown().await;
        Ok(())
    }

    fn spawn_request(&self, requests: &mut JoinSet<()>, data: Vec<u8>, peer: SocketAddr) {
        let socket = self.socket.clone();
        let processor = self.processor.clone();
        requests.spawn(async move {
            let reply = guard_reply(processor.process_datagram(&data, peer), peer).await;
            if let Err(e) = socket.send_to(reply.to_string().as_bytes(), peer).await {
                tracing::warn!("Failed to send reply to {}: {}", peer, e);
            }
        });
    }
}

/// Run one request handler, turning a panic into `ERROR: internal error`.
pub async fn guard_reply<F>(handler: F, peer: SocketAddr) -> Reply
where
    F: Future<Output = Reply>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(reply) => reply,
        Err(_) => {
            tracing::error!("Internal error while handling datagram from {}", peer);
            Reply::Error("internal error".to_string())
        }
    }
}

/// Bind and serve with a fresh arm until `shutdown` is cancelled.
pub async fn serve(config: &Config, shutdown: CancellationToken) -> Result<(), ServerError> {
    UdpServer::bind(config).await?.run(shutdown).await
}
