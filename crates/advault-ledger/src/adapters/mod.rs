//! Adapters: concrete implementations of the outbound ports.

pub mod cli;

pub use cli::StellarCli;
