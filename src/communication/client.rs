// src/communication/client.rs - Async UDP client for the arm command protocol
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::time::timeout;

use crate::command::SystemStatus;

/// How long to wait for a reply before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No reply within {0:?}")]
    Timeout(Duration),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("{command} rejected: {reply}")]
    Rejected { command: String, reply: String },
    #[error("Malformed reply: {0}")]
    MalformedReply(String),
}

/// One request, one reply. Replies lost on the wire surface as
/// [`ClientError::Timeout`]; nothing is retried.
pub struct ArmClient {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Duration,
}

impl ArmClient {
    pub async fn new(server: SocketAddr, timeout: Duration) -> Result<Self, ClientError> {
        let local: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        // Only accept datagrams from the server
        socket.connect(server).await?;
        Ok(Self { socket, server, timeout })
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Send a raw command line and return the trimmed reply.
    pub async fn send_command(&self, command: &str) -> Result<String, ClientError> {
        let line = if command.ends_with('\n') {
            command.to_string()
        } else {
            format!("{}\n", command)
        };
        tracing::debug!("UDP -> {}: {}", self.server, line.trim());
        self.socket.send(line.as_bytes()).await?;

        let mut buf = vec![0u8; 4096];
        let n = timeout(self.timeout, self.socket.recv(&mut buf))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))??;
        let reply = String::from_utf8(buf[..n].to_vec())?.trim().to_string();
        tracing::debug!("UDP <- {}: {}", self.server, reply);
        Ok(reply)
    }

    async fn expect_ok(&self, command: &str) -> Result<(), ClientError> {
        let reply = self.send_command(command).await?;
        if reply == "OK" {
            Ok(())
        } else {
            Err(ClientError::Rejected { command: command.to_string(), reply })
        }
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        self.expect_ok("CONNECT").await
    }

    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.expect_ok("DISCONNECT").await
    }

    pub async fn emergency_stop(&self) -> Result<(), ClientError> {
        self.expect_ok("EMERGENCY_STOP").await
    }

    pub async fn set_joint_angle(&self, joint: usize, angle_deg: f64, speed: f64) -> Result<(), ClientError> {
        self.expect_ok(&format!("SET_JOINT_ANGLE,{},{},{}", joint, angle_deg, speed)).await
    }

    pub async fn set_all_joint_angles(&self, angles_deg: &[f64], speed: f64) -> Result<(), ClientError> {
        let mut command = String::from("SET_ALL_JOINT_ANGLES");
        for angle in angles_deg {
            command.push_str(&format!(",{}", angle));
        }
        command.push_str(&format!(",{}", speed));
        self.expect_ok(&command).await
    }

    pub async fn joint_angles(&self) -> Result<Vec<f64>, ClientError> {
        let reply = self.send_command("GET_JOINT_ANGLES").await?;
        parse_angles(&reply)
    }

    pub async fn system_status(&self) -> Result<SystemStatus, ClientError> {
        let reply = self.send_command("GET_SYSTEM_STATUS").await?;
        serde_json::from_str(&reply).map_err(|e| ClientError::MalformedReply(format!("{}: {}", e, reply)))
    }
}

/// Parse a `GET_JOINT_ANGLES` reply.
pub fn parse_angles(reply: &str) -> Result<Vec<f64>, ClientError> {
    if reply.starts_with("ERROR") || reply == "NG" {
        return Err(ClientError::MalformedReply(reply.to_string()));
    }
    reply
        .split(',')
        .map(|field| {
            field
                .trim()
                .parse::<f64>()
                .map_err(|_| ClientError::MalformedReply(reply.to_string()))
        })
        .collect()
}
