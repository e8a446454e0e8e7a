// src/hardware/pulse.rs - Servo pulse-width codec
//
// The servo driver runs a 50 Hz frame split into 4096 ticks, so one pulse
// unit is 20 ms / 4096. A pulse of 0.5 ms maps to 0 degrees and 2.5 ms to
// `max_angle`.

/// Length of one pulse unit in milliseconds (20 ms / 4096).
pub const PULSE_STEP_MSEC: f64 = 0.0048828125;
/// Pulse width commanding 0 degrees.
pub const MIN_PULSE_MSEC: f64 = 0.5;
/// Pulse width span covering `[0, max_angle]`.
pub const PULSE_SPAN_MSEC: f64 = 2.0;

/// Convert an angle to pulse units, clamping the angle to `[0, max_angle]`.
///
/// The result is truncated, not rounded, so it does not invert exactly.
pub fn angle_to_pulse(angle_deg: f64, max_angle: f64) -> u32 {
    let angle = clamp_angle(angle_deg, max_angle);
    let pulse_msec = angle * (PULSE_SPAN_MSEC / max_angle) + MIN_PULSE_MSEC;
    (pulse_msec / PULSE_STEP_MSEC).floor() as u32
}

/// Convert pulse units back to degrees, clamped to `[0, max_angle]`.
pub fn pulse_to_angle(pulse_units: u32, max_angle: f64) -> f64 {
    let pulse_msec = PULSE_STEP_MSEC * f64::from(pulse_units);
    let angle = ((pulse_msec - MIN_PULSE_MSEC) / PULSE_SPAN_MSEC) * max_angle;
    clamp_angle(angle, max_angle)
}

/// The angle a servo actually holds after being commanded to `angle_deg`,
/// together with the pulse that commands it.
pub fn quantize(angle_deg: f64, max_angle: f64) -> (f64, u32) {
    let pulse = angle_to_pulse(angle_deg, max_angle);
    (pulse_to_angle(pulse, max_angle), pulse)
}

/// Valid pulse range for a servo with the given travel.
pub fn pulse_range(max_angle: f64) -> (u32, u32) {
    (angle_to_pulse(0.0, max_angle), angle_to_pulse(max_angle, max_angle))
}

fn clamp_angle(angle: f64, max_angle: f64) -> f64 {
    // NaN falls into the first branch
    if !(angle > 0.0) {
        0.0
    } else if angle >= max_angle {
        max_angle
    } else {
        angle
    }
}
