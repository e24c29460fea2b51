//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - TTL Sweep: purges expired memory-tier entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
