//! Regime-selection tests for the brake control loop, driven tick by tick
//! through a scripted motor driver.

use std::sync::Arc;

use parking_lot::Mutex;

use brake_controller::{AtomicF32, BrakeLoop, BrakeStatus, MotorDriver, Regime, SharedConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cmd {
    ZeroDuty,
    Current(f32),
    BrakeCurrent(f32),
    CurrentLimit(f32),
}

/// Driver mock: speed is set by the test, every command is recorded.
struct ScriptedDriver {
    rpm: AtomicF32,
    commands: Mutex<Vec<Cmd>>,
}

impl ScriptedDriver {
    fn new(rpm: f32) -> Arc<Self> {
        Arc::new(Self {
            rpm: AtomicF32::new(rpm),
            commands: Mutex::new(Vec::new()),
        })
    }

    fn set_rpm(&self, rpm: f32) {
        self.rpm.store(rpm);
    }

    fn last_command(&self) -> Option<Cmd> {
        self.commands.lock().last().copied()
    }

    fn command_count(&self) -> usize {
        self.commands.lock().len()
    }
}

impl MotorDriver for ScriptedDriver {
    fn read_rpm(&self) -> f32 {
        self.rpm.load()
    }

    fn set_duty(&self, _duty: f32) {
        self.commands.lock().push(Cmd::ZeroDuty);
    }

    fn set_current(&self, current: f32) {
        self.commands.lock().push(Cmd::Current(current));
    }

    fn set_brake_current(&self, current: f32) {
        self.commands.lock().push(Cmd::BrakeCurrent(current));
    }

    fn set_current_limit(&self, limit: f32) {
        self.commands.lock().push(Cmd::CurrentLimit(limit));
    }
}

/// Enabled controller over a scripted driver, gains taken from `config` at
/// construction (defaults unless the test stored its own values first).
fn enabled_loop(
    driver: Arc<ScriptedDriver>,
    config: Arc<SharedConfig>,
) -> (BrakeLoop<ScriptedDriver>, Arc<BrakeStatus>) {
    let status = BrakeStatus::new();
    status.enabled.store(true, std::sync::atomic::Ordering::Relaxed);
    let brake = BrakeLoop::new(driver, config, status.clone());
    (brake, status)
}

// ============================================================================
// LOW-SPEED REGIME
// ============================================================================

#[test]
fn below_threshold_commands_zero_duty() {
    let driver = ScriptedDriver::new(100.0);
    let (mut brake, status) = enabled_loop(driver.clone(), SharedConfig::new());

    brake.tick();

    assert_eq!(
        driver.last_command(),
        Some(Cmd::ZeroDuty),
        "below the speed threshold the loop must coast, not brake"
    );
    assert_eq!(status.regime(), Regime::LowSpeed);
    assert_eq!(status.command.load(), 0.0);
    assert_eq!(status.integral.load(), 0.0, "filter reinitialized with zero integral");
}

#[test]
fn reentry_after_low_speed_starts_with_fresh_integral() {
    let driver = ScriptedDriver::new(2000.0);
    let (mut brake, status) = enabled_loop(driver.clone(), SharedConfig::new());

    // Two active ticks accumulate integral: error 1000 at 1 ms per tick.
    brake.tick();
    brake.tick();
    assert!(
        (status.integral.load() - 2.0).abs() < 1e-3,
        "expected ~2.0 after two active ticks, got {}",
        status.integral.load()
    );

    // Dip below the threshold, then speed back up.
    driver.set_rpm(100.0);
    brake.tick();
    assert_eq!(status.regime(), Regime::LowSpeed);

    driver.set_rpm(2000.0);
    brake.tick();
    assert!(
        (status.integral.load() - 1.0).abs() < 1e-3,
        "integral must restart from zero after a low-speed pass, got {}",
        status.integral.load()
    );
}

// ============================================================================
// ACTIVE BRAKING
// ============================================================================

#[test]
fn braking_command_opposes_forward_rotation() {
    let driver = ScriptedDriver::new(2000.0);
    let (mut brake, status) = enabled_loop(driver.clone(), SharedConfig::new());

    brake.tick();

    assert_eq!(status.regime(), Regime::Braking);
    match driver.last_command() {
        Some(Cmd::Current(c)) => {
            assert!(c < 0.0, "positive rpm must get a negative current, got {}", c)
        }
        other => panic!("expected a current set-point, got {:?}", other),
    }
}

#[test]
fn braking_command_opposes_reverse_rotation() {
    let driver = ScriptedDriver::new(-2000.0);
    let (mut brake, _status) = enabled_loop(driver.clone(), SharedConfig::new());

    brake.tick();

    match driver.last_command() {
        Some(Cmd::Current(c)) => {
            assert!(c > 0.0, "negative rpm must get a positive current, got {}", c)
        }
        other => panic!("expected a current set-point, got {:?}", other),
    }
}

#[test]
fn published_error_is_display_scaled() {
    let driver = ScriptedDriver::new(2000.0);
    let (mut brake, status) = enabled_loop(driver.clone(), SharedConfig::new());

    brake.tick();

    // error = |2000| - 1000, published divided by 1000.
    assert!((status.error_scaled.load() - 1.0).abs() < 1e-6);
}

// ============================================================================
// COGGING SUB-REGIME
// ============================================================================

#[test]
fn small_output_while_winding_down_uses_holding_brake() {
    let config = SharedConfig::new();
    config.set_gains(0.0001, 0.001, 0.0);
    let driver = ScriptedDriver::new(1010.0);
    let (mut brake, status) = enabled_loop(driver.clone(), config);

    brake.tick();

    assert_eq!(status.regime(), Regime::Cogging);
    assert_eq!(
        driver.last_command(),
        Some(Cmd::BrakeCurrent(0.4)),
        "tiny PID output with positive integral must fall back to the holding brake"
    );
    assert_eq!(status.command.load(), 0.4, "published command is the applied one");
}

#[test]
fn small_output_with_negative_integral_stays_direct() {
    let config = SharedConfig::new();
    config.set_gains(0.0001, 0.001, 0.0);
    // Below target but above threshold: error is negative, integral winds up
    // negative, so this is not a wind-down and cogging must not trigger.
    let driver = ScriptedDriver::new(500.0);
    let (mut brake, status) = enabled_loop(driver.clone(), config);

    brake.tick();

    assert_eq!(status.regime(), Regime::Braking);
    assert!(
        matches!(driver.last_command(), Some(Cmd::Current(_))),
        "negative integral must keep the direct current command"
    );
    assert!(status.integral.load() < 0.0);
}

// ============================================================================
// DISABLED STATE
// ============================================================================

#[test]
fn disabled_loop_never_touches_driver_or_filter() {
    let driver = ScriptedDriver::new(2000.0);
    let config = SharedConfig::new();
    let status = BrakeStatus::new();
    let mut brake = BrakeLoop::new(driver.clone(), config, status.clone());

    for _ in 0..10 {
        brake.tick();
    }

    assert_eq!(driver.command_count(), 0, "disabled ticks must not command the motor");
    assert_eq!(status.regime(), Regime::Idle);
    assert_eq!(status.integral.load(), 0.0);
}

#[test]
fn reenabling_resumes_on_next_tick() {
    let driver = ScriptedDriver::new(2000.0);
    let config = SharedConfig::new();
    let status = BrakeStatus::new();
    let mut brake = BrakeLoop::new(driver.clone(), config, status.clone());

    brake.tick();
    assert_eq!(driver.command_count(), 0);

    status.enabled.store(true, std::sync::atomic::Ordering::Relaxed);
    brake.tick();
    assert_eq!(driver.command_count(), 1, "first enabled tick must issue a command");
    assert_eq!(status.regime(), Regime::Braking);
}

// ============================================================================
// PACKED STATUS
// ============================================================================

#[test]
fn packed_status_encodes_flags_and_regime() {
    let driver = ScriptedDriver::new(2000.0);
    let (mut brake, status) = enabled_loop(driver.clone(), SharedConfig::new());

    brake.tick();

    let packed = status.packed();
    assert_eq!(packed & 1, 1, "bit 0 = enabled");
    assert_eq!(packed & 2, 0, "bit 1 = running (no thread in this test)");
    assert_eq!(packed >> 4, Regime::Braking as u8, "regime tag in bits 4..6");
}
