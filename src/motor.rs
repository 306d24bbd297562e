//! Motor-driver and watchdog collaborator traits, plus a simulated motor for
//! the demo binary and benches.

pub mod driver;
pub mod simulated;
