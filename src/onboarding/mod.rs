//! Onboarding module
//!
//! Fetches onboarding answers from the profile service and turns them into
//! calculator profiles.

pub mod client;
pub mod payload;

pub use client::{
    OnboardingClient, OnboardingError, OnboardingResult, ProfileSource, DEFAULT_FAILURE_MESSAGE,
};
pub use payload::{parse_date_of_birth, OnboardingRecord, OnboardingResponse, UserRecord};
