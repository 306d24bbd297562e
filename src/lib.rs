pub mod benchmark;
pub mod config;
pub mod control;
pub mod ipc;
pub mod motor;
pub mod terminal;
pub mod threaded_impl;

pub use benchmark::metrics::{TickMetrics, TickReport};
pub use control::brake::{BrakeLoop, Regime};
pub use control::pid::Pid;
pub use ipc::shared_state::{AtomicF32, BrakeStatus, SharedConfig};
pub use motor::driver::{MotorDriver, Watchdog};
pub use motor::simulated::{MotorCommand, SimulatedMotor, SoftWatchdog};
pub use terminal::BrakeTerminal;
pub use threaded_impl::brake_thread::spawn_brake_thread;
