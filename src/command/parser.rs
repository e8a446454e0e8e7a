// src/command/parser.rs - Text command grammar
//
// A command is one line of comma-separated ASCII fields. Field 0 is the
// command name, matched exactly and case-sensitively.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Connect,
    Disconnect,
    GetJointAngles,
    SetJointAngle { joint: usize, angle_deg: f64, speed: f64 },
    SetAllJointAngles { angles_deg: Vec<f64>, speed: f64 },
    EmergencyStop,
    GetSystemStatus,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Disconnect => "DISCONNECT",
            Command::GetJointAngles => "GET_JOINT_ANGLES",
            Command::SetJointAngle { .. } => "SET_JOINT_ANGLE",
            Command::SetAllJointAngles { .. } => "SET_ALL_JOINT_ANGLES",
            Command::EmergencyStop => "EMERGENCY_STOP",
            Command::GetSystemStatus => "GET_SYSTEM_STATUS",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("{command} expects {expected} arguments, got {got}")]
    ArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Invalid {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Joint {joint} out of range (arm has {count} joints)")]
    JointOutOfRange { joint: usize, count: usize },
}

impl CommandError {
    /// Only unknown commands are reported verbatim; everything else is a plain rejection.
    pub fn is_unknown(&self) -> bool {
        matches!(self, CommandError::Unknown(_))
    }
}

/// Parse one command line for an arm with `joint_count` joints.
///
/// Surrounding whitespace on the line and on each field is ignored.
/// Commands without arguments, and `SET_JOINT_ANGLE`, ignore trailing extra fields.
pub fn parse_command(line: &str, joint_count: usize) -> Result<Command, CommandError> {
    let mut fields = line.trim().split(',').map(str::trim);
    let name = fields.next().unwrap_or("");
    let args: Vec<&str> = fields.collect();

    match name {
        "CONNECT" => Ok(Command::Connect),
        "DISCONNECT" => Ok(Command::Disconnect),
        "GET_JOINT_ANGLES" => Ok(Command::GetJointAngles),
        "EMERGENCY_STOP" => Ok(Command::EmergencyStop),
        "GET_SYSTEM_STATUS" => Ok(Command::GetSystemStatus),
        "SET_JOINT_ANGLE" => {
            expect_min_args("SET_JOINT_ANGLE", &args, 3)?;
            let joint = parse_joint(args[0])?;
            let angle_deg = parse_number("angle", args[1])?;
            let speed = parse_number("speed", args[2])?;
            if joint >= joint_count {
                return Err(CommandError::JointOutOfRange { joint, count: joint_count });
            }
            Ok(Command::SetJointAngle { joint, angle_deg, speed })
        }
        "SET_ALL_JOINT_ANGLES" => {
            expect_args("SET_ALL_JOINT_ANGLES", &args, joint_count + 1)?;
            let angles_deg = args[..joint_count]
                .iter()
                .map(|value| parse_number("angle", value))
                .collect::<Result<Vec<_>, _>>()?;
            let speed = parse_number("speed", args[joint_count])?;
            Ok(Command::SetAllJointAngles { angles_deg, speed })
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::ArgumentCount { command, expected, got: args.len() });
    }
    Ok(())
}

fn expect_min_args(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() < expected {
        return Err(CommandError::ArgumentCount { command, expected, got: args.len() });
    }
    Ok(())
}

fn parse_joint(value: &str) -> Result<usize, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field: "joint",
        value: value.to_string(),
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, CommandError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(CommandError::InvalidNumber { field, value: value.to_string() }),
    }
}
