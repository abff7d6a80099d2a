//! Body measurement units and conversion constants
//!
//! Onboarding answers carry height and weight in whichever unit the user
//! picked. The calculator works in centimeters and kilograms.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// Unit a height value is expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "inches",
        }
    }

    /// Parse from string. Anything that is not an inch spelling is centimeters.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => HeightUnit::Inches,
            _ => HeightUnit::Cm,
        }
    }

    /// Convert a value in this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Inches => value * CM_PER_INCH,
        }
    }
}

/// Unit a weight value is expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Parse from string. Anything that is not a pound spelling is kilograms.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lbs" | "lb" | "pounds" | "pound" => WeightUnit::Lbs,
            _ => WeightUnit::Kg,
        }
    }

    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value / LBS_PER_KG,
        }
    }
}
