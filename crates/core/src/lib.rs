//! Microgreens domain logic.
//!
//! This crate has no internal dependencies and no I/O. It holds the data
//! model, the date rules that drive a deployment through its phases, the
//! first-run seed data, and the read views consumed by the API layer.

pub mod digest;
pub mod error;
pub mod garden;
pub mod lifecycle;
pub mod phase;
pub mod seed;
pub mod time_of_day;
pub mod views;
