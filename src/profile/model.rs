//! Profile model
//!
//! A user's biometric and preference answers from onboarding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::units::{HeightUnit, WeightUnit};

/// Lowercase and drop separators so "Lightly Active", "lightly_active" and
/// "lightlyActive" all compare equal.
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Gender as answered during onboarding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse from string, defaulting to Male
    pub fn from_str(s: &str) -> Self {
        match normalize_key(s).as_str() {
            "female" => Gender::Female,
            "other" => Gender::Other,
            _ => Gender::Male,
        }
    }

    /// Mifflin-St Jeor sex constant. Other shares the male constant.
    pub fn bmr_constant(&self) -> f64 {
        match self {
            Gender::Female => -161.0,
            Gender::Male | Gender::Other => 5.0,
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Parse from string, defaulting to Sedentary
    pub fn from_str(s: &str) -> Self {
        match normalize_key(s).as_str() {
            "lightlyactive" => ActivityLevel::LightlyActive,
            "moderatelyactive" => ActivityLevel::ModeratelyActive,
            "veryactive" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }
}

/// What the user wants to achieve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthGoal {
    WeightLoss,
    WeightGain,
    ImproveFitness,
    #[default]
    Maintain,
}

impl HealthGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGoal::WeightLoss => "weight_loss",
            HealthGoal::WeightGain => "weight_gain",
            HealthGoal::ImproveFitness => "improve_fitness",
            HealthGoal::Maintain => "maintain",
        }
    }

    /// Parse from string, defaulting to Maintain
    pub fn from_str(s: &str) -> Self {
        match normalize_key(s).as_str() {
            "weightloss" => HealthGoal::WeightLoss,
            "weightgain" => HealthGoal::WeightGain,
            "improvefitness" => HealthGoal::ImproveFitness,
            _ => HealthGoal::Maintain,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HealthGoal::WeightLoss => "Weight Loss",
            HealthGoal::WeightGain => "Weight Gain",
            HealthGoal::ImproveFitness => "Improve Fitness",
            HealthGoal::Maintain => "Maintain",
        }
    }

    /// Daily calorie adjustment on top of TDEE
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            HealthGoal::WeightLoss => -500.0,
            HealthGoal::WeightGain => 500.0,
            HealthGoal::ImproveFitness => 250.0,
            HealthGoal::Maintain => 0.0,
        }
    }

    /// Protein target in grams per kilogram of body weight
    pub fn protein_per_kg(&self) -> f64 {
        match self {
            HealthGoal::WeightLoss => 2.0,
            HealthGoal::WeightGain => 1.8,
            HealthGoal::ImproveFitness | HealthGoal::Maintain => 1.6,
        }
    }
}

/// Onboarding profile fed to the goal calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub height_value: f64,
    #[serde(default)]
    pub height_unit: HeightUnit,
    pub weight_value: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    /// Takes precedence over `date_of_birth` when set
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub health_goal: HealthGoal,
}

impl Profile {
    /// Metric profile with every optional answer left at its default
    pub fn metric(height_cm: f64, weight_kg: f64) -> Self {
        Self {
            height_value: height_cm,
            height_unit: HeightUnit::Cm,
            weight_value: weight_kg,
            weight_unit: WeightUnit::Kg,
            date_of_birth: None,
            age_years: None,
            gender: Gender::default(),
            activity_level: ActivityLevel::default(),
            health_goal: HealthGoal::default(),
        }
    }

    /// Height converted to centimeters
    pub fn height_cm(&self) -> f64 {
        self.height_unit.to_cm(self.height_value)
    }

    /// Weight converted to kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight_value)
    }
}
