//! Onboarding payload
//!
//! Shape of the `/onboarding/me` response and its conversion into a
//! [`Profile`]. The service is loose about types: numbers sometimes arrive as
//! strings and optional answers may be missing entirely.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::{ActivityLevel, Gender, HealthGoal, HeightUnit, Profile, WeightUnit};

/// A number that may have been sent as a JSON string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    /// Numeric value, or None if the text does not parse
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Number(n) => Some(*n),
            NumericValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Onboarding answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub height: Option<NumericValue>,
    pub height_unit: Option<String>,
    pub weight: Option<NumericValue>,
    pub weight_unit: Option<String>,
    pub dob: Option<String>,
    pub activity_level: Option<String>,
    pub health_goal: Option<String>,
}

/// Account fields that feed the calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub age: Option<NumericValue>,
    pub gender: Option<String>,
}

/// Body of `GET /onboarding/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingResponse {
    pub onboarding: OnboardingRecord,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl OnboardingResponse {
    /// Build a calculator profile. Missing or unparsable height and weight
    /// become NaN so the calculator rejects them; everything else defaults.
    pub fn to_profile(&self) -> Profile {
        let onboarding = &self.onboarding;
        let user = self.user.clone().unwrap_or_default();

        let number = |v: &Option<NumericValue>| v.as_ref().and_then(NumericValue::as_f64);

        let age_years = number(&user.age)
            .filter(|a| a.is_finite() && *a >= 1.0)
            .map(|a| a as u32);

        let date_of_birth = onboarding.dob.as_deref().and_then(|raw| {
            let parsed = parse_date_of_birth(raw);
            if parsed.is_none() {
                debug!(dob = raw, "Ignoring unparsable date of birth");
            }
            parsed
        });

        Profile {
            height_value: number(&onboarding.height).unwrap_or(f64::NAN),
            height_unit: onboarding
                .height_unit
                .as_deref()
                .map(HeightUnit::from_str)
                .unwrap_or_default(),
            weight_value: number(&onboarding.weight).unwrap_or(f64::NAN),
            weight_unit: onboarding
                .weight_unit
                .as_deref()
                .map(WeightUnit::from_str)
                .unwrap_or_default(),
            date_of_birth,
            age_years,
            gender: user.gender.as_deref().map(Gender::from_str).unwrap_or_default(),
            activity_level: onboarding
                .activity_level
                .as_deref()
                .map(ActivityLevel::from_str)
                .unwrap_or_default(),
            health_goal: onboarding
                .health_goal
                .as_deref()
                .map(HealthGoal::from_str)
                .unwrap_or_default(),
        }
    }
}

/// Parse a date of birth given as RFC 3339, a naive timestamp or a plain
/// `YYYY-MM-DD` date. Dates without a zone are taken as UTC.
pub fn parse_date_of_birth(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let response: OnboardingResponse = serde_json::from_value(json!({
            "onboarding": {
                "height": 69,
                "heightUnit": "inches",
                "weight": "165",
                "weightUnit": "lbs",
                "dob": "1990-05-01",
                "activityLevel": "Lightly Active",
                "healthGoal": "Weight Loss"
            },
            "user": { "age": 34, "gender": "Female" }
        }))
        .unwrap();

        let profile = response.to_profile();
        assert_eq!(profile.height_value, 69.0);
        assert_eq!(profile.height_unit, HeightUnit::Inches);
        assert_eq!(profile.weight_value, 165.0);
        assert_eq!(profile.weight_unit, WeightUnit::Lbs);
        assert_eq!(profile.age_years, Some(34));
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.activity_level, ActivityLevel::LightlyActive);
        assert_eq!(profile.health_goal, HealthGoal::WeightLoss);
        assert_eq!(
            profile.date_of_birth,
            Some(Utc.with_ymd_and_hms(1990, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_user_defaults() {
        let response: OnboardingResponse = serde_json::from_value(json!({
            "onboarding": { "height": 175, "heightUnit": "cm", "weight": 70, "weightUnit": "kg" }
        }))
        .unwrap();

        let profile = response.to_profile();
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.age_years, None);
        assert_eq!(profile.activity_level, ActivityLevel::Sedentary);
        assert_eq!(profile.health_goal, HealthGoal::Maintain);
    }

    #[test]
    fn test_missing_height_is_nan() {
        let response: OnboardingResponse = serde_json::from_value(json!({
            "onboarding": { "weight": 70, "heightUnit": "cm" },
            "user": null
        }))
        .unwrap();

        let profile = response.to_profile();
        assert!(profile.height_value.is_nan());
        assert!(crate::goals::compute_goals(&profile).is_err());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let response: OnboardingResponse = serde_json::from_value(json!({
            "onboarding": {
                "height": "tall",
                "weight": 70,
                "dob": "not a date",
                "activityLevel": "Couch",
                "healthGoal": "Be Happy"
            },
            "user": { "age": 0, "gender": "Other" }
        }))
        .unwrap();

        let profile = response.to_profile();
        assert!(profile.height_value.is_nan());
        assert_eq!(profile.date_of_birth, None);
        assert_eq!(profile.age_years, None);
        assert_eq!(profile.gender, Gender::Other);
        assert_eq!(profile.activity_level, ActivityLevel::Sedentary);
        assert_eq!(profile.health_goal, HealthGoal::Maintain);
    }

    #[test]
    fn test_unrecognized_labels_keep_default_goals() {
        let response: OnboardingResponse = serde_json::from_value(json!({
            "onboarding": { "height": 175, "weight": 70, "activityLevel": "Active" },
            "user": { "age": 30, "gender": "woman" }
        }))
        .unwrap();

        let profile = response.to_profile();
        assert_eq!(profile.activity_level, ActivityLevel::Sedentary);
        assert_eq!(profile.gender, Gender::Male);

        // (700 + 1093.75 - 150 + 5) * 1.2 = 1978.5
        let goals = crate::goals::compute_goals(&profile).unwrap();
        assert_eq!(goals.calorie_goal, 1979);
    }

    #[test]
    fn test_parse_date_of_birth_formats() {
        let expected = Utc.with_ymd_and_hms(1990, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date_of_birth("1990-05-01"), Some(expected));
        assert_eq!(parse_date_of_birth("1990-05-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date_of_birth("1990-05-01T00:00:00"), Some(expected));
        assert_eq!(parse_date_of_birth("01/05/1990"), None);
    }
}
