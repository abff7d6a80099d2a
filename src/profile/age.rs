//! Age resolution
//!
//! Picks the age used by the BMR formula from whatever the profile carries.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::model::Profile;

/// Age assumed when the profile carries neither an age nor a date of birth
pub const DEFAULT_AGE_YEARS: u32 = 30;

/// How an age is derived from a date of birth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeMethod {
    /// Elapsed time placed as an offset from the Unix epoch, then the
    /// distance of that instant's year from 1970. Matches the web dashboard
    /// but can be off by one around birthdays because leap days are counted
    /// from 1970 rather than from the birth year.
    #[default]
    EpochOffset,
    /// Whole years between the birth date and today's date
    Calendar,
}

impl AgeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeMethod::EpochOffset => "epoch",
            AgeMethod::Calendar => "calendar",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "epoch" | "epoch_offset" | "legacy" => Some(AgeMethod::EpochOffset),
            "calendar" | "exact" => Some(AgeMethod::Calendar),
            _ => None,
        }
    }

    /// Age in whole years at `now`, if one can be derived
    pub fn age_at(&self, dob: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
        match self {
            AgeMethod::EpochOffset => epoch_offset_age(dob, now),
            AgeMethod::Calendar => calendar_age(dob, now),
        }
    }
}

/// Where the resolved age came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeSource {
    Provided,
    DateOfBirth,
    Default,
}

/// Resolve the age for a profile. A stated or derived age of zero counts as
/// missing.
pub fn resolve_age(profile: &Profile, method: AgeMethod, now: DateTime<Utc>) -> (u32, AgeSource) {
    if let Some(age) = profile.age_years.filter(|a| *a > 0) {
        return (age, AgeSource::Provided);
    }

    profile
        .date_of_birth
        .and_then(|dob| method.age_at(dob, now))
        .filter(|a| *a > 0)
        .map(|a| (a, AgeSource::DateOfBirth))
        .unwrap_or((DEFAULT_AGE_YEARS, AgeSource::Default))
}

fn epoch_offset_age(dob: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
    let elapsed_ms = now.timestamp_millis().checked_sub(dob.timestamp_millis())?;
    let offset = DateTime::<Utc>::from_timestamp_millis(elapsed_ms)?;
    Some((offset.year() - 1970).unsigned_abs())
}

fn calendar_age(dob: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
    let born = dob.date_naive();
    let today = now.date_naive();
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
