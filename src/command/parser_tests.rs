//! Tests for the command grammar

use super::parser::*;

#[test]
fn test_no_argument_commands() {
    assert_eq!(parse_command("CONNECT", 6), Ok(Command::Connect));
    assert_eq!(parse_command("DISCONNECT", 6), Ok(Command::Disconnect));
    assert_eq!(parse_command("GET_JOINT_ANGLES", 6), Ok(Command::GetJointAngles));
    assert_eq!(parse_command("EMERGENCY_STOP", 6), Ok(Command::EmergencyStop));
    assert_eq!(parse_command("GET_SYSTEM_STATUS", 6), Ok(Command::GetSystemStatus));
}

#[test]
fn test_trailing_newline_and_whitespace() {
    assert_eq!(parse_command("CONNECT\n", 6), Ok(Command::Connect));
    assert_eq!(parse_command("  GET_JOINT_ANGLES \r\n", 6), Ok(Command::GetJointAngles));
    assert_eq!(
        parse_command("SET_JOINT_ANGLE, 1, 45.5 ,30\n", 6),
        Ok(Command::SetJointAngle { joint: 1, angle_deg: 45.5, speed: 30.0 })
    );
}

#[test]
fn test_extra_fields_ignored_for_plain_commands() {
    assert_eq!(parse_command("CONNECT,hello", 6), Ok(Command::Connect));
}

#[test]
fn test_set_joint_angle() {
    assert_eq!(
        parse_command("SET_JOINT_ANGLE,0,90.0,30.0", 6),
        Ok(Command::SetJointAngle { joint: 0, angle_deg: 90.0, speed: 30.0 })
    );
    // Angles are not range checked by the parser
    assert_eq!(
        parse_command("SET_JOINT_ANGLE,5,-20,0", 6),
        Ok(Command::SetJointAngle { joint: 5, angle_deg: -20.0, speed: 0.0 })
    );
}

#[test]
fn test_set_joint_angle_out_of_range() {
    assert_eq!(
        parse_command("SET_JOINT_ANGLE,9,10.0,5.0", 6),
        Err(CommandError::JointOutOfRange { joint: 9, count: 6 })
    );
    assert_eq!(
        parse_command("SET_JOINT_ANGLE,6,10.0,5.0", 6),
        Err(CommandError::JointOutOfRange { joint: 6, count: 6 })
    );
    assert!(matches!(
        parse_command("SET_JOINT_ANGLE,-1,10.0,5.0", 6),
        Err(CommandError::InvalidNumber { field: "joint", .. })
    ));
}

#[test]
fn test_set_joint_angle_malformed() {
    assert!(matches!(
        parse_command("SET_JOINT_ANGLE,0,abc,5.0", 6),
        Err(CommandError::InvalidNumber { field: "angle", .. })
    ));
    assert!(matches!(
        parse_command("SET_JOINT_ANGLE,1.5,10,5", 6),
        Err(CommandError::InvalidNumber { field: "joint", .. })
    ));
    assert!(matches!(
        parse_command("SET_JOINT_ANGLE,0,nan,5", 6),
        Err(CommandError::InvalidNumber { .. })
    ));
    assert!(matches!(
        parse_command("SET_JOINT_ANGLE,0,10,inf", 6),
        Err(CommandError::InvalidNumber { field: "speed", .. })
    ));
    assert_eq!(
        parse_command("SET_JOINT_ANGLE,0,10", 6),
        Err(CommandError::ArgumentCount { command: "SET_JOINT_ANGLE", expected: 3, got: 2 })
    );
    assert!(parse_command("SET_JOINT_ANGLE", 6).is_err());
}

#[test]
fn test_set_joint_angle_ignores_trailing_fields() {
    assert_eq!(
        parse_command("SET_JOINT_ANGLE,0,10,5,1", 6),
        Ok(Command::SetJointAngle { joint: 0, angle_deg: 10.0, speed: 5.0 })
    );
    // Extras are not validated
    assert!(parse_command("SET_JOINT_ANGLE,2,45,30,junk,", 6).is_ok());
}

#[test]
fn test_set_all_joint_angles() {
    assert_eq!(
        parse_command("SET_ALL_JOINT_ANGLES,10,-10,20,-20,30,-30,40.0", 6),
        Ok(Command::SetAllJointAngles {
            angles_deg: vec![10.0, -10.0, 20.0, -20.0, 30.0, -30.0],
            speed: 40.0,
        })
    );
    assert_eq!(
        parse_command("SET_ALL_JOINT_ANGLES,1,2,3", 2),
        Ok(Command::SetAllJointAngles { angles_deg: vec![1.0, 2.0], speed: 3.0 })
    );
}

#[test]
fn test_set_all_joint_angles_wrong_count() {
    assert_eq!(
        parse_command("SET_ALL_JOINT_ANGLES,10,20,30,40", 6),
        Err(CommandError::ArgumentCount { command: "SET_ALL_JOINT_ANGLES", expected: 7, got: 4 })
    );
    assert!(parse_command("SET_ALL_JOINT_ANGLES,1,2,3,4,5,6,7,8", 6).is_err());
    assert!(parse_command("SET_ALL_JOINT_ANGLES", 6).is_err());
}

#[test]
fn test_set_all_joint_angles_malformed() {
    assert!(matches!(
        parse_command("SET_ALL_JOINT_ANGLES,1,2,x,4,5,6,7", 6),
        Err(CommandError::InvalidNumber { field: "angle", .. })
    ));
    assert!(matches!(
        parse_command("SET_ALL_JOINT_ANGLES,1,2,3,4,5,6,fast", 6),
        Err(CommandError::InvalidNumber { field: "speed", .. })
    ));
}

#[test]
fn test_unknown_commands() {
    let err = parse_command("FOO,1,2", 6).unwrap_err();
    assert!(err.is_unknown());
    assert_eq!(err.to_string(), "Unknown command: FOO");
    // Names are case-sensitive
    assert_eq!(parse_command("connect", 6), Err(CommandError::Unknown("connect".to_string())));
    assert_eq!(parse_command("", 6), Err(CommandError::Unknown(String::new())));
}

#[test]
fn test_command_names() {
    let cmd = parse_command("SET_ALL_JOINT_ANGLES,1,2", 1).unwrap();
    assert_eq!(cmd.name(), "SET_ALL_JOINT_ANGLES");
    assert_eq!(Command::EmergencyStop.name(), "EMERGENCY_STOP");
}
