//! Nutrigoal Status Tool
//!
//! Provides runtime status information about the Nutrigoal service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Goal calculation instructions for AI assistants
pub const GOAL_INSTRUCTIONS: &str = r#"
# Nutrigoal Goal Instructions

Nutrigoal turns a user's onboarding answers into daily calorie and macro
targets, then tracks confirmed meals against them.

## Loading Goals

- `fetch_goals` pulls the signed-in user's onboarding answers from the profile
  service and starts a fresh day. Pass `token` if the service needs a
  different bearer token than the configured one.
- `compute_goals` takes the answers directly. Set `start_day: true` to track
  meals against the result.

## Profile Fields

| Field | Values | Default |
|-------|--------|---------|
| height, height_unit | number; "cm" or "inches" | cm |
| weight, weight_unit | number; "kg" or "lbs" | kg |
| age | whole years, preferred over date_of_birth | - |
| date_of_birth | YYYY-MM-DD or RFC 3339 | - |
| gender | Male, Female, Other | Male |
| activity_level | Sedentary, Lightly Active, Moderately Active, Very Active | Sedentary |
| health_goal | Weight Loss, Weight Gain, Improve Fitness, Maintain | Maintain |

- Height and weight must be positive numbers; anything else is rejected.
- Unknown activity levels or goals are NOT errors: they fall back to the defaults.
- Without age or date of birth the age is taken as 30.
- "Other" uses the same BMR constant as Male.

## How Goals Are Derived

1. BMR (Mifflin-St Jeor) = 10 x kg + 6.25 x cm - 5 x age + (Female: -161, otherwise +5)
2. TDEE = BMR x activity factor (1.2 / 1.375 / 1.55 / 1.725)
3. Weight Loss -500 kcal, Weight Gain +500 kcal, Improve Fitness +250 kcal
4. Calories = max(1200, round(TDEE))
5. Protein = round(g/kg x kg): 2.0 Weight Loss, 1.8 Weight Gain, otherwise 1.6
6. Fat = round(25% of calories / 9)
7. Carbs = whatever calories remain after the rounded protein and fat, / 4
8. Fiber = round(14 g per 1000 kcal)

## Logging Meals

- `log_meal` adds a confirmed meal's calories, protein, carbs, fats and fiber.
  Missing fields count as zero. Negative values correct earlier entries but a
  total never drops below zero.
- `get_progress` shows current totals, goals and what remains.
- Loading goals again starts a new day and clears logged meals.
"#;

/// Runtime status of the Nutrigoal service
#[derive(Debug, Clone, Serialize)]
pub struct NutrigoalStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Profile service information
    pub api_base_url: Option<String>,
    pub age_method: &'static str,
    pub goals_loaded: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    api_base_url: Option<String>,
    age_method: &'static str,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(api_base_url: Option<String>, age_method: &'static str) -> Self {
        Self {
            start_time: Instant::now(),
            api_base_url,
            age_method,
        }
    }

    /// Get the current status
    pub fn get_status(&self, goals_loaded: bool) -> NutrigoalStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutrigoalStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            api_base_url: self.api_base_url.clone(),
            age_method: self.age_method,
            goals_loaded,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_configuration() {
        let tracker = StatusTracker::new(Some("https://api.example.com".to_string()), "epoch");
        let status = tracker.get_status(true);
        assert_eq!(status.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(status.age_method, "epoch");
        assert!(status.goals_loaded);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    }
}
