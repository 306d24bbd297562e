//! Timing instrumentation for the control task.

pub mod metrics;
