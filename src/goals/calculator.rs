//! Daily nutrition goal calculator
//!
//! Mifflin-St Jeor BMR scaled by activity level, shifted by the health goal,
//! then split into macro targets. Each macro is derived from the already
//! rounded values before it: carbs take whatever calories the rounded protein
//! and fat grams leave over. Deriving them independently gives different
//! numbers, so the order below is load-bearing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::profile::{resolve_age, AgeMethod, AgeSource, Profile};

/// Lowest calorie goal ever handed out
pub const MIN_CALORIE_GOAL: u32 = 1200;
/// Share of calories assigned to fat
pub const FAT_CALORIE_SHARE: f64 = 0.25;
/// Fiber grams per 1000 kcal
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: i64 = 4;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: i64 = 9;

/// Goal calculation error types
#[derive(Debug, Error, PartialEq)]
pub enum GoalError {
    #[error("Invalid profile: {field} must be a positive number, got {value}")]
    InvalidProfile { field: &'static str, value: f64 },
}

/// Result type for goal calculations
pub type GoalResult<T> = Result<T, GoalError>;

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSet {
    pub calorie_goal: u32,
    pub protein_goal_grams: u32,
    pub carbs_goal_grams: u32,
    pub fat_goal_grams: u32,
    pub fiber_goal_grams: u32,
}

/// A goal set together with the intermediate values that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalBreakdown {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: u32,
    pub age_source: AgeSource,
    pub bmr: f64,
    pub activity_factor: f64,
    /// TDEE after the health goal adjustment, before rounding
    pub tdee: f64,
    pub goals: GoalSet,
}

/// Calculator configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalCalculator {
    pub age_method: AgeMethod,
}

impl GoalCalculator {
    pub fn new(age_method: AgeMethod) -> Self {
        Self { age_method }
    }

    /// Compute goals for a profile as of `now`
    pub fn calculate(&self, profile: &Profile, now: DateTime<Utc>) -> GoalResult<GoalBreakdown> {
        let height_cm = positive("height", profile.height_cm())?;
        let weight_kg = positive("weight", profile.weight_kg())?;
        let (age_years, age_source) = resolve_age(profile, self.age_method, now);

        let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years)
            + profile.gender.bmr_constant();
        let activity_factor = profile.activity_level.factor();
        let tdee = bmr * activity_factor + profile.health_goal.calorie_adjustment();

        let calorie_goal = round_to_u32(tdee).max(MIN_CALORIE_GOAL);
        let protein_goal_grams = round_to_u32(profile.health_goal.protein_per_kg() * weight_kg);
        let fat_goal_grams = round_to_u32(FAT_CALORIE_SHARE * f64::from(calorie_goal) / 9.0);

        let spoken_for = i64::from(protein_goal_grams) * KCAL_PER_G_PROTEIN
            + i64::from(fat_goal_grams) * KCAL_PER_G_FAT;
        let carbs_goal_grams =
            round_to_u32((i64::from(calorie_goal) - spoken_for) as f64 / KCAL_PER_G_CARBS);

        let fiber_goal_grams =
            round_to_u32(f64::from(calorie_goal) / 1000.0 * FIBER_G_PER_1000_KCAL);

        let breakdown = GoalBreakdown {
            height_cm,
            weight_kg,
            age_years,
            age_source,
            bmr,
            activity_factor,
            tdee,
            goals: GoalSet {
                calorie_goal,
                protein_goal_grams,
                carbs_goal_grams,
                fat_goal_grams,
                fiber_goal_grams,
            },
        };

        debug!(
            bmr = breakdown.bmr,
            tdee = breakdown.tdee,
            age = breakdown.age_years,
            calorie_goal = calorie_goal,
            "Computed nutrition goals"
        );

        Ok(breakdown)
    }
}

/// Compute daily goals for a profile using the current time and default settings
pub fn compute_goals(profile: &Profile) -> GoalResult<GoalSet> {
    GoalCalculator::default()
        .calculate(profile, Utc::now())
        .map(|b| b.goals)
}

fn positive(field: &'static str, value: f64) -> GoalResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        warn!(field, value, "Rejecting profile");
        Err(GoalError::InvalidProfile { field, value })
    }
}

/// Round half away from zero, clamping negatives to zero
fn round_to_u32(value: f64) -> u32 {
    // `as` saturates: negatives become 0, overflow becomes u32::MAX
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ActivityLevel, Gender, HealthGoal, HeightUnit, WeightUnit};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn reference_profile() -> Profile {
        Profile {
            age_years: Some(30),
            gender: Gender::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            health_goal: HealthGoal::Maintain,
            ..Profile::metric(175.0, 70.0)
        }
    }

    fn calc(profile: &Profile) -> GoalBreakdown {
        GoalCalculator::default().calculate(profile, now()).unwrap()
    }

    #[test]
    fn test_reference_maintain() {
        let b = calc(&reference_profile());
        assert_eq!(b.bmr, 1648.75);
        assert!((b.tdee - 2555.5625).abs() < 1e-9);
        assert_eq!(
            b.goals,
            GoalSet {
                calorie_goal: 2556,
                protein_goal_grams: 112,
                carbs_goal_grams: 367,
                fat_goal_grams: 71,
                fiber_goal_grams: 36,
            }
        );
    }

    #[test]
    fn test_reference_weight_loss() {
        let profile = Profile {
            health_goal: HealthGoal::WeightLoss,
            ..reference_profile()
        };
        let goals = calc(&profile).goals;
        assert_eq!(goals.calorie_goal, 2056);
        assert_eq!(goals.protein_goal_grams, 140);
        assert_eq!(goals.fat_goal_grams, 57);
        assert_eq!(goals.carbs_goal_grams, 246);
        assert_eq!(goals.fiber_goal_grams, 29);
    }

    #[test]
    fn test_weight_gain_and_fitness_adjustments() {
        let gain = calc(&Profile {
            health_goal: HealthGoal::WeightGain,
            ..reference_profile()
        });
        assert_eq!(gain.goals.calorie_goal, 3056);
        assert_eq!(gain.goals.protein_goal_grams, 126);

        let fitness = calc(&Profile {
            health_goal: HealthGoal::ImproveFitness,
            ..reference_profile()
        });
        assert_eq!(fitness.goals.calorie_goal, 2806);
        assert_eq!(fitness.goals.protein_goal_grams, 112);
    }

    #[test]
    fn test_calorie_floor() {
        let profile = Profile {
            age_years: Some(25),
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            health_goal: HealthGoal::WeightLoss,
            ..Profile::metric(165.0, 60.0)
        };
        let b = calc(&profile);
        assert_eq!(b.bmr, 1345.25);
        assert_eq!(
            b.goals,
            GoalSet {
                calorie_goal: 1200,
                protein_goal_grams: 120,
                carbs_goal_grams: 106,
                fat_goal_grams: 33,
                fiber_goal_grams: 17,
            }
        );
    }

    #[test]
    fn test_carbs_clamped_at_zero() {
        let profile = Profile {
            age_years: Some(90),
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            health_goal: HealthGoal::WeightLoss,
            ..Profile::metric(100.0, 300.0)
        };
        let goals = calc(&profile).goals;
        assert_eq!(goals.calorie_goal, 3117);
        assert_eq!(goals.protein_goal_grams, 600);
        assert_eq!(goals.fat_goal_grams, 87);
        assert_eq!(goals.carbs_goal_grams, 0);
    }

    #[test]
    fn test_other_gender_matches_male() {
        let male = calc(&reference_profile());
        let other = calc(&Profile {
            gender: Gender::Other,
            ..reference_profile()
        });
        let female = calc(&Profile {
            gender: Gender::Female,
            ..reference_profile()
        });
        assert_eq!(other.goals, male.goals);
        assert_eq!(other.bmr, male.bmr);
        assert_eq!(male.bmr - female.bmr, 166.0);
    }

    #[test]
    fn test_imperial_matches_metric() {
        let metric = calc(&reference_profile());
        let imperial = calc(&Profile {
            height_value: 175.0 / 2.54,
            height_unit: HeightUnit::Inches,
            weight_value: 70.0 * 2.20462,
            weight_unit: WeightUnit::Lbs,
            ..reference_profile()
        });
        let diff = i64::from(metric.goals.calorie_goal) - i64::from(imperial.goals.calorie_goal);
        assert!(diff.abs() <= 1);
    }

    #[test]
    fn test_invalid_weight() {
        for weight in [-70.0, 0.0, f64::NAN, f64::INFINITY] {
            let profile = Profile {
                weight_value: weight,
                ..reference_profile()
            };
            let err = GoalCalculator::default().calculate(&profile, now()).unwrap_err();
            assert!(matches!(err, GoalError::InvalidProfile { field: "weight", .. }));
        }
    }

    #[test]
    fn test_invalid_height() {
        let profile = Profile {
            height_value: f64::NAN,
            height_unit: HeightUnit::Inches,
            ..reference_profile()
        };
        assert!(matches!(
            compute_goals(&profile),
            Err(GoalError::InvalidProfile { field: "height", .. })
        ));
    }

    #[test]
    fn test_default_age_and_activity() {
        let profile = Profile::metric(175.0, 70.0);
        let b = calc(&profile);
        assert_eq!(b.age_years, 30);
        assert_eq!(b.age_source, AgeSource::Default);
        assert_eq!(b.activity_factor, 1.2);
        // 1648.75 * 1.2 is exactly 1978.5 and rounds half up
        assert_eq!(b.goals.calorie_goal, 1979);
    }

    #[test]
    fn test_idempotent() {
        let profile = reference_profile();
        assert_eq!(compute_goals(&profile), compute_goals(&profile));
    }

    #[test]
    fn test_invariants_across_profiles() {
        let genders = [Gender::Male, Gender::Female, Gender::Other];
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
        ];
        let goals = [
            HealthGoal::WeightLoss,
            HealthGoal::WeightGain,
            HealthGoal::ImproveFitness,
            HealthGoal::Maintain,
        ];
        for weight in [35.0, 70.0, 140.0, 250.0] {
            for height in [120.0, 175.0, 210.0] {
                for age in [18, 45, 95] {
                    for gender in genders {
                        for activity_level in levels {
                            for health_goal in goals {
                                let profile = Profile {
                                    age_years: Some(age),
                                    gender,
                                    activity_level,
                                    health_goal,
                                    ..Profile::metric(height, weight)
                                };
                                let set = calc(&profile).goals;
                                assert!(set.calorie_goal >= MIN_CALORIE_GOAL);
                                let carbs_kcal = f64::from(set.carbs_goal_grams) * 4.0;
                                assert!(carbs_kcal <= f64::from(set.calorie_goal) + 2.0);
                            }
                        }
                    }
                }
            }
        }
    }
}
