// src/communication/peers.rs - Advisory record of clients that sent CONNECT
use std::collections::HashSet;
use std::net::SocketAddr;
use tokio::sync::RwLock;

/// Peers that announced themselves. Never used to reject commands.
#[derive(Debug, Default)]
pub struct ConnectedPeers {
    peers: RwLock<HashSet<SocketAddr>>,
}

impl ConnectedPeers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the peer was not already connected.
    pub async fn add(&self, peer: SocketAddr) -> bool {
        self.peers.write().await.insert(peer)
    }

    /// Returns true if the peer was connected.
    pub async fn remove(&self, peer: &SocketAddr) -> bool {
        self.peers.write().await.remove(peer)
    }

    pub async fn contains(&self, peer: &SocketAddr) -> bool {
        self.peers.read().await.contains(peer)
    }

    pub async fn len(&self) -> usize {
        self.peers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.peers.read().await.is_empty()
    }
}
