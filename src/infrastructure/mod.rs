//! # Infrastructure Layer
//!
//! - [`config`]: layered settings
//! - [`persistence`]: quote request sources
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod persistence;
pub mod telemetry;
