//! # Server, Arm and Motion Configuration
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock six-joint arm listening on `127.0.0.1:4210`.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 4210
//!
//! [arm]
//! joints = 4
//! max_angle = 270.0
//!
//! [motion]
//! update_rate_hz = 50.0
//! ```

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration struct for the command server, the simulated arm and its motion engine.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub arm: ArmConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

/// Network binding of the datagram command server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Receive buffer size; longer datagrams are truncated by the OS.
    #[serde(default = "default_max_datagram_size")]
    pub max_datagram_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_datagram_size: default_max_datagram_size(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad server.host '{}': {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Shape of the simulated arm.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArmConfig {
    #[serde(default = "default_joints")]
    pub joints: usize,
    /// Servo travel in degrees; angles are clamped to `[0, max_angle]`.
    #[serde(default = "default_max_angle")]
    pub max_angle: f64,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            joints: default_joints(),
            max_angle: default_max_angle(),
        }
    }
}

/// Joint animation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default = "default_update_rate_hz")]
    pub update_rate_hz: f64,
    /// How long a new command waits for the motion it replaces to stop.
    #[serde(default = "default_supersede_timeout_ms")]
    pub supersede_timeout_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            update_rate_hz: default_update_rate_hz(),
            supersede_timeout_ms: default_supersede_timeout_ms(),
        }
    }
}

impl MotionConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.update_rate_hz)
    }

    pub fn supersede_timeout(&self) -> Duration {
        Duration::from_millis(self.supersede_timeout_ms)
    }
}

impl Config {
    /// Validate ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arm.joints == 0 {
            return Err(ConfigError::Invalid("arm.joints must be at least 1".to_string()));
        }
        if !self.arm.max_angle.is_finite() || self.arm.max_angle <= 0.0 {
            return Err(ConfigError::Invalid("arm.max_angle must be > 0".to_string()));
        }
        if !self.motion.update_rate_hz.is_finite() || self.motion.update_rate_hz <= 0.0 {
            return Err(ConfigError::Invalid("motion.update_rate_hz must be > 0".to_string()));
        }
        if self.server.max_datagram_size < 64 {
            return Err(ConfigError::Invalid("server.max_datagram_size must be at least 64".to_string()));
        }
        self.server.bind_addr()?;
        Ok(())
    }
}

// Default value functions
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 4210 }
fn default_max_datagram_size() -> usize { 1024 }
fn default_joints() -> usize { 6 }
fn default_max_angle() -> f64 { 180.0 }
fn default_update_rate_hz() -> f64 { 20.0 }
fn default_supersede_timeout_ms() -> u64 { 100 }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}
