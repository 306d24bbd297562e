use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::driver::{MotorDriver, Watchdog};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    ZeroDuty,
    Current(f32),
    BrakeCurrent(f32),
}

struct MotorModel {
    rpm: f32,
    last_command: Option<MotorCommand>,
    last_update: Instant,
    rng: StdRng,
}

/// First-order motor model for the demo binary and benches: commanded current
/// is applied as a torque opposing or assisting rotation, speed reads carry
/// seeded measurement noise.
pub struct SimulatedMotor {
    model: Mutex<MotorModel>,
    current_limit_milli: AtomicU64,
    rpm_per_amp_sec: f32,
    noise_amplitude: f32,
}

impl SimulatedMotor {
    pub fn new(initial_rpm: f32, seed: u64) -> Self {
        Self {
            model: Mutex::new(MotorModel {
                rpm: initial_rpm,
                last_command: None,
                last_update: Instant::now(),
                rng: StdRng::seed_from_u64(seed),
            }),
            current_limit_milli: AtomicU64::new(0),
            rpm_per_amp_sec: 600.0,
            noise_amplitude: 2.0,
        }
    }

    fn advance(model: &mut MotorModel, rpm_per_amp_sec: f32) {
        let dt = model.last_update.elapsed().as_secs_f32();
        model.last_update = Instant::now();

        match model.last_command {
            Some(MotorCommand::Current(amps)) => {
                model.rpm += amps * rpm_per_amp_sec * dt;
            }
            Some(MotorCommand::BrakeCurrent(amps)) => {
                // Braking torque always opposes rotation.
                let delta = amps.abs() * rpm_per_amp_sec * dt;
                model.rpm -= model.rpm.signum() * delta.min(model.rpm.abs());
            }
            Some(MotorCommand::ZeroDuty) | None => {
                // Coasting: mild friction decay.
                model.rpm *= (1.0 - 0.05 * dt).max(0.0);
            }
        }
    }

    pub fn last_command(&self) -> Option<MotorCommand> {
        self.model.lock().last_command
    }

    pub fn current_limit(&self) -> f32 {
        self.current_limit_milli.load(Ordering::Relaxed) as f32 / 1000.0
    }
}

impl MotorDriver for SimulatedMotor {
    fn read_rpm(&self) -> f32 {
        let mut model = self.model.lock();
        Self::advance(&mut model, self.rpm_per_amp_sec);
        let noise = model.rng.gen_range(-self.noise_amplitude..self.noise_amplitude);
        model.rpm + noise
    }

    fn set_duty(&self, duty: f32) {
        let mut model = self.model.lock();
        Self::advance(&mut model, self.rpm_per_amp_sec);
        if duty == 0.0 {
            model.last_command = Some(MotorCommand::ZeroDuty);
        }
    }

    fn set_current(&self, current: f32) {
        let mut model = self.model.lock();
        Self::advance(&mut model, self.rpm_per_amp_sec);
        model.last_command = Some(MotorCommand::Current(current));
    }

    fn set_brake_current(&self, current: f32) {
        let mut model = self.model.lock();
        Self::advance(&mut model, self.rpm_per_amp_sec);
        model.last_command = Some(MotorCommand::BrakeCurrent(current));
    }

    fn set_current_limit(&self, limit: f32) {
        self.current_limit_milli
            .store((limit * 1000.0) as u64, Ordering::Relaxed);
    }
}

/// Watchdog stand-in that just counts feeds; tests and the demo read the
/// counter to confirm the loop stays alive.
pub struct SoftWatchdog {
    feeds: AtomicU64,
}

impl SoftWatchdog {
    pub fn new() -> Self {
        Self {
            feeds: AtomicU64::new(0),
        }
    }

    pub fn feeds(&self) -> u64 {
        self.feeds.load(Ordering::Relaxed)
    }
}

impl Watchdog for SoftWatchdog {
    fn reset(&self) {
        self.feeds.fetch_add(1, Ordering::Relaxed);
    }
}
