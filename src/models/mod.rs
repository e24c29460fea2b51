//! Models Module
//!
//! Response DTOs for the service's HTTP surface.

pub mod responses;

pub use responses::*;
