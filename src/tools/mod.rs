//! Nutrigoal Tools module
//!
//! MCP tool implementations for Nutrigoal.

pub mod goals;
pub mod progress;
pub mod status;
