//! Replies sent back to the client, one per datagram.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall arm state reported by `GET_SYSTEM_STATUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArmStatus {
    Ready,
    Moving,
}

/// JSON payload of `GET_SYSTEM_STATUS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: ArmStatus,
    pub joints: Vec<f64>,
    pub connected_clients: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Ng,
    Angles(Vec<f64>),
    Status(SystemStatus),
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("OK"),
            Reply::Ng => f.write_str("NG"),
            Reply::Angles(angles) => {
                for (i, angle) in angles.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{:.2}", angle)?;
                }
                Ok(())
            }
            Reply::Status(status) => {
                let json = serde_json::to_string(status).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Reply::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_replies() {
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(Reply::Ng.to_string(), "NG");
        assert_eq!(
            Reply::Error("Unknown command: FOO".to_string()).to_string(),
            "ERROR: Unknown command: FOO"
        );
    }

    #[test]
    fn test_angles_two_decimals() {
        let reply = Reply::Angles(vec![0.0, 89.912109375, 180.0, 12.345]);
        assert_eq!(reply.to_string(), "0.00,89.91,180.00,12.35");
        assert_eq!(Reply::Angles(vec![]).to_string(), "");
    }

    #[test]
    fn test_status_json() {
        let reply = Reply::Status(SystemStatus {
            status: ArmStatus::Ready,
            joints: vec![0.0, 45.5],
            connected_clients: 2,
        });
        let text = reply.to_string();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "READY");
        assert_eq!(value["joints"][1], 45.5);
        assert_eq!(value["connected_clients"], 2);

        let parsed: SystemStatus = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.status, ArmStatus::Ready);
        assert_eq!(
            serde_json::to_string(&ArmStatus::Moving).unwrap(),
            "\"MOVING\""
        );
    }
}
