//! Daily intake progress against goals
//!
//! Confirmed meals add to the running totals. Each total is kept as a whole
//! number and never drops below zero, so a negative correction can undo a
//! meal but not push the day into the red.

use serde::{Deserialize, Serialize};

use super::calculator::GoalSet;

/// Glasses of water per day shown alongside the nutrition goals
pub const WATER_GOAL_GLASSES: u32 = 8;
/// Daily step target
pub const STEPS_GOAL: u32 = 10_000;

/// Current amount consumed against a goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub current: u32,
    pub goal: u32,
}

impl MacroProgress {
    pub fn new(goal: u32) -> Self {
        Self { current: 0, goal }
    }

    /// Add a possibly negative amount, rounding and clamping at zero
    fn add(&mut self, amount: f64) {
        let total = (f64::from(self.current) + amount).round();
        self.current = total.max(0.0) as u32;
    }

    /// Amount left before the goal is reached
    pub fn remaining(&self) -> u32 {
        self.goal.saturating_sub(self.current)
    }

    /// Share of the goal consumed so far, in percent
    pub fn percent_of_goal(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.goal) * 100.0
    }
}

/// Nutrition totals of a confirmed meal. Missing fields count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTotals {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub fiber: Option<f64>,
}

fn amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Today's intake against the computed goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
    pub fiber: MacroProgress,
    pub water_goal_glasses: u32,
    pub steps_goal: u32,
}

/// Amounts left for each tracked nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

impl DailyProgress {
    /// Start a fresh day with nothing consumed
    pub fn new(goals: &GoalSet) -> Self {
        Self {
            calories: MacroProgress::new(goals.calorie_goal),
            protein: MacroProgress::new(goals.protein_goal_grams),
            carbs: MacroProgress::new(goals.carbs_goal_grams),
            fat: MacroProgress::new(goals.fat_goal_grams),
            fiber: MacroProgress::new(goals.fiber_goal_grams),
            water_goal_glasses: WATER_GOAL_GLASSES,
            steps_goal: STEPS_GOAL,
        }
    }

    /// Add a confirmed meal to the running totals
    pub fn apply_meal(&mut self, meal: &MealTotals) {
        self.calories.add(amount(meal.calories));
        self.protein.add(amount(meal.protein));
        self.carbs.add(amount(meal.carbs));
        self.fat.add(amount(meal.fats));
        self.fiber.add(amount(meal.fiber));
    }

    pub fn remaining(&self) -> Remaining {
        Remaining {
            calories: self.calories.remaining(),
            protein: self.protein.remaining(),
            carbs: self.carbs.remaining(),
            fat: self.fat.remaining(),
            fiber: self.fiber.remaining(),
        }
    }

    /// The goals this progress is tracked against
    pub fn goals(&self) -> GoalSet {
        GoalSet {
            calorie_goal: self.calories.goal,
            protein_goal_grams: self.protein.goal,
            carbs_goal_grams: self.carbs.goal,
            fat_goal_grams: self.fat.goal,
            fiber_goal_grams: self.fiber.goal,
        }
    }
}
