//! Microgreens garden service library.
//!
//! Exposes the lifecycle engine, scheduler, configuration, and HTTP layer so
//! integration tests and the binary entrypoint can both access them.

pub mod background;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod input;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
