//! # Application Layer
//!
//! Use-case orchestration over the domain engine.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
