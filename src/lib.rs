//! Green Star responsible-products compliance scoring for construction
//! material schedules, exposed as a library behind the `greenscore` CLI
//! and HTTP service.

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod scoring;
pub mod telemetry;
