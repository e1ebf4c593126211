//! Domain layer: configuration, error taxonomy, invocation descriptor.

pub mod config;
pub mod error;
pub mod invocation;
