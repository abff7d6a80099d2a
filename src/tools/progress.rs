//! Daily Progress Tools
//!
//! Tools for logging confirmed meals against the loaded goals.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::info;

use crate::goals::{DailyProgress, GoalSet, MealTotals, Remaining};

/// Shared progress for the current day. Empty until goals are loaded.
#[derive(Clone, Default)]
pub struct ProgressTracker {
    inner: Arc<Mutex<Option<DailyProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<DailyProgress>>, String> {
        self.inner
            .lock()
            .map_err(|_| "Progress state is unavailable".to_string())
    }

    /// Start a fresh day against new goals, discarding logged meals
    pub fn start(&self, goals: &GoalSet) -> Result<DailyProgress, String> {
        let progress = DailyProgress::new(goals);
        *self.lock()? = Some(progress.clone());
        Ok(progress)
    }

    /// Current progress, if goals are loaded
    pub fn snapshot(&self) -> Result<Option<DailyProgress>, String> {
        Ok(self.lock()?.clone())
    }

    pub fn has_goals(&self) -> Result<bool, String> {
        Ok(self.lock()?.is_some())
    }

    /// Add a meal, returning the updated progress or None if no goals are loaded
    pub fn apply_meal(&self, meal: &MealTotals) -> Result<Option<DailyProgress>, String> {
        let mut guard = self.lock()?;
        Ok(guard.as_mut().map(|progress| {
            progress.apply_meal(meal);
            progress.clone()
        }))
    }
}

/// Response for get_progress and log_meal
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: DailyProgress,
    pub remaining: Remaining,
    pub calories_percent_of_goal: f64,
}

impl From<DailyProgress> for ProgressResponse {
    fn from(progress: DailyProgress) -> Self {
        Self {
            remaining: progress.remaining(),
            calories_percent_of_goal: progress.calories.percent_of_goal(),
            progress,
        }
    }
}

/// Error returned when no goals have been loaded yet
#[derive(Debug, Serialize)]
pub struct NoGoalsResponse {
    pub error: String,
}

impl Default for NoGoalsResponse {
    fn default() -> Self {
        Self {
            error: "No goals loaded. Call fetch_goals or compute_goals with start_day=true first."
                .to_string(),
        }
    }
}

// ============================================================================
// Progress Tool Functions
// ============================================================================

/// Add a confirmed meal's totals to today's progress
pub fn log_meal(
    tracker: &ProgressTracker,
    meal: &MealTotals,
) -> Result<Result<ProgressResponse, NoGoalsResponse>, String> {
    match tracker.apply_meal(meal)? {
        Some(progress) => {
            info!(
                calories = progress.calories.current,
                goal = progress.calories.goal,
                "Logged meal"
            );
            Ok(Ok(progress.into()))
        }
        None => Ok(Err(NoGoalsResponse::default())),
    }
}

/// Get today's progress
pub fn get_progress(
    tracker: &ProgressTracker,
) -> Result<Result<ProgressResponse, NoGoalsResponse>, String> {
    Ok(tracker
        .snapshot()?
        .map(ProgressResponse::from)
        .ok_or_else(NoGoalsResponse::default))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals() -> GoalSet {
        GoalSet {
            calorie_goal: 2000,
            protein_goal_grams: 100,
            carbs_goal_grams: 250,
            fat_goal_grams: 56,
            fiber_goal_grams: 28,
        }
    }

    #[test]
    fn test_log_meal_without_goals() {
        let tracker = ProgressTracker::new();
        assert!(!tracker.has_goals().unwrap());
        let result = log_meal(&tracker, &MealTotals::default()).unwrap();
        assert!(result.is_err());
        assert!(get_progress(&tracker).unwrap().is_err());
    }

    #[test]
    fn test_log_meal_updates_shared_state() {
        let tracker = ProgressTracker::new();
        tracker.start(&goals()).unwrap();
        let clone = tracker.clone();

        let meal = MealTotals {
            calories: Some(500.0),
            protein: Some(25.0),
            ..Default::default()
        };
        let response = log_meal(&clone, &meal).unwrap().unwrap();
        assert_eq!(response.progress.calories.current, 500);
        assert_eq!(response.remaining.calories, 1500);
        assert!((response.calories_percent_of_goal - 25.0).abs() < 1e-9);

        let snapshot = get_progress(&tracker).unwrap().unwrap();
        assert_eq!(snapshot.progress.protein.current, 25);
    }

    #[test]
    fn test_start_resets_progress() {
        let tracker = ProgressTracker::new();
        tracker.start(&goals()).unwrap();
        tracker
            .apply_meal(&MealTotals {
                calories: Some(800.0),
                ..Default::default()
            })
            .unwrap();
        let progress = tracker.start(&goals()).unwrap();
        assert_eq!(progress.calories.current, 0);
        assert_eq!(tracker.snapshot().unwrap().unwrap().calories.current, 0);
    }

    #[test]
    fn test_poisoned_state_is_an_error() {
        let tracker = ProgressTracker::new();
        tracker.start(&goals()).unwrap();

        let inner = Arc::clone(&tracker.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("panic while holding progress");
        })
        .join();

        assert!(tracker.has_goals().is_err());
        assert!(tracker.snapshot().is_err());
        assert!(get_progress(&tracker).is_err());
    }
}
