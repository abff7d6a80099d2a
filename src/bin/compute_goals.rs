//! Compute goals from an onboarding payload
//! Usage: cargo run --bin compute_goals -- [payload.json]
//!
//! Reads the `/onboarding/me` JSON body from the given file, or from stdin
//! when no path is given, and prints the derived goals.

use std::io::Read;

use chrono::Utc;

use nutrigoal::config::Config;
use nutrigoal::goals::GoalCalculator;
use nutrigoal::onboarding::OnboardingResponse;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let payload: OnboardingResponse = serde_json::from_str(&raw)?;
    let profile = payload.to_profile();

    let breakdown = GoalCalculator::new(config.age_method).calculate(&profile, Utc::now())?;

    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
