use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

use crate::config;
use crate::control::brake::Regime;

// f32 stored as its bit pattern so tuning fields stay lock-free. Relaxed
// ordering is enough: each field is an independent scalar and the loop only
// needs to observe a write within one tick.
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Tuning parameters shared between the control thread (reader, every tick)
/// and the terminal interface (writer, rarely). Per-field atomics instead of
/// a mutex keeps the real-time path free of priority-inversion risk; a tick
/// observing a partially-updated set of fields is acceptable.
pub struct SharedConfig {
    pub target_rpm: AtomicF32,
    pub kp: AtomicF32,
    pub ki: AtomicF32,
    pub kd: AtomicF32,
    pub max_current: AtomicF32,
    pub rpm_threshold: AtomicF32,
    pub update_rate_hz: AtomicU32,
}

impl SharedConfig {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            target_rpm: AtomicF32::new(config::DEFAULT_TARGET_RPM),
            kp: AtomicF32::new(config::DEFAULT_KP),
            ki: AtomicF32::new(config::DEFAULT_KI),
            kd: AtomicF32::new(config::DEFAULT_KD),
            max_current: AtomicF32::new(config::DEFAULT_MAX_CURRENT),
            rpm_threshold: AtomicF32::new(config::DEFAULT_RPM_THRESHOLD),
            update_rate_hz: AtomicU32::new(config::DEFAULT_UPDATE_RATE_HZ),
        })
    }

    pub fn set_gains(&self, kp: f32, ki: f32, kd: f32) {
        self.kp.store(kp);
        self.ki.store(ki);
        self.kd.store(kd);
    }

    pub fn tick_period_secs(&self) -> f32 {
        1.0 / self.update_rate_hz.load(Ordering::Relaxed).max(1) as f32
    }
}

/// Live state exported by the control loop. Written once per tick by the loop,
/// read from any other thread. Fields are independently atomic; consumers
/// tolerate torn cross-field snapshots.
pub struct BrakeStatus {
    pub enabled: AtomicBool,
    pub running: AtomicBool,
    pub shutdown: AtomicBool,
    regime: AtomicU8,
    pub error_scaled: AtomicF32,
    pub command: AtomicF32,
    pub integral: AtomicF32,
}

impl BrakeStatus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            enabled: AtomicBool::new(false),
            running: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            regime: AtomicU8::new(Regime::Idle as u8),
            error_scaled: AtomicF32::new(0.0),
            command: AtomicF32::new(0.0),
            integral: AtomicF32::new(0.0),
        })
    }

    pub fn set_regime(&self, regime: Regime) {
        self.regime.store(regime as u8, Ordering::Relaxed);
    }

    pub fn regime(&self) -> Regime {
        Regime::from_tag(self.regime.load(Ordering::Relaxed))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Packed status byte for lightweight polling:
    /// bit 0 = enabled, bit 1 = running, bits 4..6 = regime tag.
    pub fn packed(&self) -> u8 {
        let mut s = 0u8;
        if self.is_enabled() {
            s |= 1;
        }
        if self.is_running() {
            s |= 2;
        }
        s | (self.regime.load(Ordering::Relaxed) << 4)
    }
}
