//! Periodic-task wrapper around the brake control loop.

pub mod brake_thread;
