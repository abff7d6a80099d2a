//! Nutrigoal Library
//!
//! Daily nutrition goals derived from a user's onboarding profile, plus
//! tracking of confirmed meals against those goals.

pub mod build_info;
pub mod config;
pub mod goals;
pub mod mcp;
pub mod onboarding;
pub mod profile;
pub mod tools;

pub use goals::{compute_goals, GoalError, GoalSet};
pub use profile::Profile;
