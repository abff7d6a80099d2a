//! MCP module
//!
//! Exposes the Nutrigoal tools over the Model Context Protocol.

pub mod server;

pub use server::NutrigoalService;
