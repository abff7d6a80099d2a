//! Nutrition goals module
//!
//! Derives daily calorie and macro targets from a profile and tracks intake
//! against them.

pub mod calculator;
pub mod progress;

pub use calculator::{
    compute_goals, GoalBreakdown, GoalCalculator, GoalError, GoalResult, GoalSet,
    MIN_CALORIE_GOAL,
};
pub use progress::{DailyProgress, MacroProgress, MealTotals, Remaining};
