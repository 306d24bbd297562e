//! Lock-free state shared between the control task and the terminal interface.

pub mod shared_state;
