//! Ports: the seams between orchestration logic and the outside world.

pub mod outbound;

pub use outbound::{ToolOutput, ToolRunner};
