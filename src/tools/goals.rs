//! Goal MCP Tools
//!
//! Tools for computing daily nutrition goals from a profile, either supplied
//! directly or fetched from the onboarding service.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::goals::{GoalBreakdown, GoalCalculator, GoalError};
use crate::onboarding::ProfileSource;
use crate::profile::Profile;
use crate::tools::progress::ProgressTracker;

/// Response for compute_goals and fetch_goals
#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub gender: String,
    pub activity_level: String,
    pub health_goal: String,
    #[serde(flatten)]
    pub breakdown: GoalBreakdown,
    /// Whether today's progress was reset against these goals
    pub day_started: bool,
}

/// Error object for profiles the calculator rejects
#[derive(Debug, Serialize)]
pub struct InvalidProfileResponse {
    pub error: String,
    pub field: String,
}

impl From<GoalError> for InvalidProfileResponse {
    fn from(err: GoalError) -> Self {
        let field = match &err {
            GoalError::InvalidProfile { field, .. } => field.to_string(),
        };
        Self {
            error: err.to_string(),
            field,
        }
    }
}

fn describe(profile: &Profile, breakdown: GoalBreakdown, day_started: bool) -> GoalsResponse {
    GoalsResponse {
        gender: profile.gender.as_str().to_string(),
        activity_level: profile.activity_level.display_name().to_string(),
        health_goal: profile.health_goal.display_name().to_string(),
        breakdown,
        day_started,
    }
}

// ============================================================================
// Goal Tool Functions
// ============================================================================

/// Compute goals for a profile. With `start_day`, today's progress is reset
/// to track against the result.
pub fn compute_goals(
    calculator: &GoalCalculator,
    tracker: &ProgressTracker,
    profile: &Profile,
    start_day: bool,
) -> Result<Result<GoalsResponse, InvalidProfileResponse>, String> {
    let breakdown = match calculator.calculate(profile, Utc::now()) {
        Ok(b) => b,
        Err(e) => return Ok(Err(e.into())),
    };

    if start_day {
        tracker.start(&breakdown.goals)?;
    }

    Ok(Ok(describe(profile, breakdown, start_day)))
}

/// Fetch the onboarding profile, compute goals and start a fresh day
pub async fn fetch_goals(
    source: &dyn ProfileSource,
    calculator: &GoalCalculator,
    tracker: &ProgressTracker,
    token: Option<&str>,
) -> Result<Result<GoalsResponse, InvalidProfileResponse>, String> {
    let onboarding = source
        .fetch_onboarding(token)
        .await
        .map_err(|e| e.to_string())?;
    let profile = onboarding.to_profile();

    let breakdown = match calculator.calculate(&profile, Utc::now()) {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "Onboarding profile cannot produce goals");
            return Ok(Err(e.into()));
        }
    };

    tracker.start(&breakdown.goals)?;
    info!(calorie_goal = breakdown.goals.calorie_goal, "Loaded goals from onboarding");

    Ok(Ok(describe(&profile, breakdown, true)))
}
