use std::sync::Arc;

use crate::config::{COGGING_OUTPUT_THRESHOLD, HOLDING_BRAKE_CURRENT};
use crate::control::pid::Pid;
use crate::ipc::shared_state::{BrakeStatus, SharedConfig};
use crate::motor::driver::MotorDriver;

/// Control policy applied on the current tick. Re-derived fresh every tick
/// from speed and filter state; never stored as a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Controller disabled or not yet ticked while enabled.
    Idle = 0,
    /// Speed below the threshold: coast at zero duty, filter reinitialized.
    LowSpeed = 1,
    /// PID output too small for reliable torque while winding down: fixed
    /// holding brake.
    Cogging = 2,
    /// Direct PID-derived current set-point opposing rotation.
    Braking = 3,
}

impl Regime {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            1 => Regime::LowSpeed,
            2 => Regime::Cogging,
            3 => Regime::Braking,
            _ => Regime::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Regime::Idle => "idle",
            Regime::LowSpeed => "low-speed",
            Regime::Cogging => "cogging",
            Regime::Braking => "braking",
        }
    }
}

/// Per-tick brake control computation. Owns the PID filter exclusively; the
/// periodic task in `threaded_impl` drives `tick()` at the configured rate.
pub struct BrakeLoop<D: MotorDriver> {
    driver: Arc<D>,
    config: Arc<SharedConfig>,
    status: Arc<BrakeStatus>,
    pid: Pid,
}

impl<D: MotorDriver> BrakeLoop<D> {
    pub fn new(driver: Arc<D>, config: Arc<SharedConfig>, status: Arc<BrakeStatus>) -> Self {
        let pid = fresh_pid(&config);
        Self {
            driver,
            config,
            status,
            pid,
        }
    }

    /// One control tick. Does nothing while disabled: the driver is not
    /// touched, the filter is not updated, exported status stays as-is.
    pub fn tick(&mut self) {
        if !self.status.is_enabled() {
            return;
        }

        let rpm_signed = self.driver.read_rpm();
        let rpm = rpm_signed.abs();
        let error = rpm - self.config.target_rpm.load();

        let (regime, command) = if rpm < self.config.rpm_threshold.load() {
            // Coast. The filter is rebuilt from the live tuning parameters so
            // the next active-braking entry starts with a zero integral.
            self.pid = fresh_pid(&self.config);
            self.driver.set_duty(0.0);
            (Regime::LowSpeed, 0.0)
        } else {
            // Positive error means too fast: the filter asks for braking
            // current, sign-matched to oppose the direction of rotation.
            let output = self.pid.update(error);
            let command = -rpm_signed.signum() * output;

            if command.abs() < COGGING_OUTPUT_THRESHOLD && self.pid.integral() > 0.0 {
                // Wind-down with an output too weak to brake reliably: hold
                // with a small fixed brake current instead of chattering.
                self.driver.set_brake_current(HOLDING_BRAKE_CURRENT);
                (Regime::Cogging, HOLDING_BRAKE_CURRENT)
            } else {
                self.driver.set_current(command);
                (Regime::Braking, command)
            }
        };

        // Error is scaled for display only; nothing feeds it back.
        self.status.error_scaled.store(error / 1000.0);
        self.status.command.store(command);
        self.status.integral.store(self.pid.integral());
        self.status.set_regime(regime);
    }
}

fn fresh_pid(config: &SharedConfig) -> Pid {
    Pid::new(
        config.tick_period_secs(),
        config.max_current.load(),
        0.0,
        config.kp.load(),
        config.ki.load(),
        config.kd.load(),
    )
}
