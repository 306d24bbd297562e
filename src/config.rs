// Default tuning values and fixed policy constants for the brake loop.

/// Control loop rate in Hz.
pub const DEFAULT_UPDATE_RATE_HZ: u32 = 1000;

/// Maximum braking current magnitude the PID may command, in amps.
pub const DEFAULT_MAX_CURRENT: f32 = 20.0;

/// Below this rotor speed the loop coasts instead of braking.
pub const DEFAULT_RPM_THRESHOLD: f32 = 150.0;

pub const DEFAULT_TARGET_RPM: f32 = 1000.0;
pub const DEFAULT_KP: f32 = 0.005;
pub const DEFAULT_KI: f32 = 0.015;
pub const DEFAULT_KD: f32 = 0.0;

/// PID outputs smaller than this are too weak to produce reliable braking
/// torque; while the integral is winding down the loop substitutes a fixed
/// holding brake instead.
pub const COGGING_OUTPUT_THRESHOLD: f32 = 0.5;

/// Holding brake current magnitude used in the cogging regime, in amps.
pub const HOLDING_BRAKE_CURRENT: f32 = 0.4;
