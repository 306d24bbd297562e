//! Line-oriented diagnostic/tuning interface. Thin by design: it only reads
//! exported status and writes tuning parameters, never participating in the
//! control computation itself.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::ipc::shared_state::{BrakeStatus, SharedConfig};
use crate::motor::driver::MotorDriver;

pub struct BrakeTerminal<D: MotorDriver> {
    config: Arc<SharedConfig>,
    status: Arc<BrakeStatus>,
    driver: Arc<D>,
}

impl<D: MotorDriver> BrakeTerminal<D> {
    pub fn new(config: Arc<SharedConfig>, status: Arc<BrakeStatus>, driver: Arc<D>) -> Self {
        Self {
            config,
            status,
            driver,
        }
    }

    /// Handle one command line. No arguments prints the status block;
    /// sub-verbs mutate one setting each. Malformed numeric arguments are
    /// discarded silently and the prior value stays in effect.
    pub fn handle(&self, line: &str) -> Vec<String> {
        let args: Vec<&str> = line.split_whitespace().collect();

        match args.as_slice() {
            [] => return self.status_block(),
            ["on"] => self.status.enabled.store(true, Ordering::Relaxed),
            ["off"] => self.status.enabled.store(false, Ordering::Relaxed),
            ["rpm", v] => {
                if let Ok(rpm) = v.parse::<f32>() {
                    self.config.target_rpm.store(rpm);
                }
            }
            ["lim", v] => {
                if let Ok(limit) = v.parse::<f32>() {
                    self.driver.set_current_limit(limit);
                }
            }
            ["kp", v] => {
                if let Ok(kp) = v.parse::<f32>() {
                    self.config.kp.store(kp);
                }
            }
            ["ki", v] => {
                if let Ok(ki) = v.parse::<f32>() {
                    self.config.ki.store(ki);
                }
            }
            ["kd", v] => {
                if let Ok(kd) = v.parse::<f32>() {
                    self.config.kd.store(kd);
                }
            }
            // Three independent writes in sequence; a malformed argument
            // leaves only that gain unchanged.
            ["pid", kp, ki, kd] => {
                if let Ok(kp) = kp.parse::<f32>() {
                    self.config.kp.store(kp);
                }
                if let Ok(ki) = ki.parse::<f32>() {
                    self.config.ki.store(ki);
                }
                if let Ok(kd) = kd.parse::<f32>() {
                    self.config.kd.store(kd);
                }
            }
            _ => {}
        }

        Vec::new()
    }

    fn status_block(&self) -> Vec<String> {
        let on_off = |flag: bool| if flag { "On" } else { "Off" };
        vec![
            "Brake Status".to_string(),
            format!("   Build version: {}", env!("CARGO_PKG_VERSION")),
            format!("   App running: {}", on_off(self.status.is_running())),
            format!("   Active: {}", on_off(self.status.is_enabled())),
            format!("   Target RPM: {:.1}", self.config.target_rpm.load()),
            format!("   Kp: {:.6}", self.config.kp.load()),
            format!("   Ki: {:.6}", self.config.ki.load()),
            format!("   Kd: {:.6}", self.config.kd.load()),
            String::new(),
        ]
    }
}
