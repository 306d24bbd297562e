//! Control core: PID filter and the per-tick brake loop with regime selection.

pub mod brake;
pub mod pid;
