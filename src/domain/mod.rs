//! # Domain Layer
//!
//! Quote requests, their offers, and the pure response-time analytics
//! computed over them. Nothing in here performs I/O.

pub mod entities;
pub mod services;
pub mod value_objects;
