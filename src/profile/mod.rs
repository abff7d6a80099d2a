//! User profile module
//!
//! Onboarding answers, the units they come in, and age resolution.

pub mod age;
pub mod model;
pub mod units;

pub use age::{resolve_age, AgeMethod, AgeSource, DEFAULT_AGE_YEARS};
pub use model::{ActivityLevel, Gender, HealthGoal, Profile};
pub use units::{HeightUnit, WeightUnit, CM_PER_INCH, LBS_PER_KG};
