// src/communication/mod.rs
pub mod client;
pub mod peers;
pub mod udp;

pub use client::{ArmClient, ClientError};
pub use peers::ConnectedPeers;
pub use udp::{serve, ServerError, UdpServer};
