//! Nutrigoal MCP Server Implementation
//!
//! Implements the MCP server with all Nutrigoal tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::goals::{GoalCalculator, MealTotals};
use crate::onboarding::{parse_date_of_birth, ProfileSource};
use crate::profile::{ActivityLevel, Gender, HealthGoal, HeightUnit, Profile, WeightUnit};
use crate::tools::goals;
use crate::tools::progress::{self, ProgressTracker};
use crate::tools::status::StatusTracker;

/// Nutrigoal MCP Service
#[derive(Clone)]
pub struct NutrigoalService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    calculator: GoalCalculator,
    source: Arc<dyn ProfileSource>,
    progress: ProgressTracker,
    tool_router: ToolRouter<NutrigoalService>,
}

impl NutrigoalService {
    pub fn new(config: &Config, source: Arc<dyn ProfileSource>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.api.base_url.clone(),
                config.age_method.as_str(),
            ))),
            calculator: GoalCalculator::new(config.age_method),
            source,
            progress: ProgressTracker::new(),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Goal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComputeGoalsParams {
    /// Height value
    pub height: f64,
    /// Height unit: "cm" or "inches" (default cm)
    pub height_unit: Option<String>,
    /// Weight value
    pub weight: f64,
    /// Weight unit: "kg" or "lbs" (default kg)
    pub weight_unit: Option<String>,
    /// Age in whole years (preferred over date_of_birth)
    pub age: Option<u32>,
    /// Date of birth, YYYY-MM-DD or RFC 3339
    pub date_of_birth: Option<String>,
    /// Male, Female or Other (default Male)
    pub gender: Option<String>,
    /// Sedentary, Lightly Active, Moderately Active or Very Active (default Sedentary)
    pub activity_level: Option<String>,
    /// Weight Loss, Weight Gain, Improve Fitness or Maintain (default Maintain)
    pub health_goal: Option<String>,
    /// Reset today's progress to track against these goals (default false)
    #[serde(default)]
    pub start_day: bool,
}

impl ComputeGoalsParams {
    fn to_profile(&self) -> Profile {
        Profile {
            height_value: self.height,
            height_unit: self.height_unit.as_deref().map(HeightUnit::from_str).unwrap_or_default(),
            weight_value: self.weight,
            weight_unit: self.weight_unit.as_deref().map(WeightUnit::from_str).unwrap_or_default(),
            date_of_birth: self.date_of_birth.as_deref().and_then(parse_date_of_birth),
            age_years: self.age,
            gender: self.gender.as_deref().map(Gender::from_str).unwrap_or_default(),
            activity_level: self
                .activity_level
                .as_deref()
                .map(ActivityLevel::from_str)
                .unwrap_or_default(),
            health_goal: self.health_goal.as_deref().map(HealthGoal::from_str).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FetchGoalsParams {
    /// Bearer token for the profile service (overrides the configured token)
    pub token: Option<String>,
}

// ============================================================================
// Progress Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// Calories in the meal (kcal)
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Fat in grams
    pub fats: Option<f64>,
    /// Fiber in grams
    pub fiber: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutrigoalService {
    // --- Status ---

    #[tool(description = "Get the current status of the Nutrigoal service including build info, profile service configuration, and process information")]
    async fn nutrigoal_status(&self) -> Result<CallToolResult, McpError> {
        let goals_loaded = self
            .progress
            .has_goals()
            .map_err(|e| McpError::internal_error(e, None))?;
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(goals_loaded);
        to_json(&status)
    }

    #[tool(description = "Get instructions for computing nutrition goals and logging meals. Call this when unsure which fields a profile needs or how goals are derived.")]
    fn goal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::GOAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(GOAL_INSTRUCTIONS)]))
    }

    // --- Goals ---

    #[tool(description = "Compute daily calorie, protein, carbs, fat and fiber goals from a profile. Returns the goals with BMR and TDEE. Set start_day=true to track meals against them.")]
    fn compute_goals(&self, Parameters(p): Parameters<ComputeGoalsParams>) -> Result<CallToolResult, McpError> {
        let profile = p.to_profile();
        let result = goals::compute_goals(&self.calculator, &self.progress, &profile, p.start_day)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(response) => to_json(&response),
            Err(invalid) => to_json(&invalid),
        }
    }

    #[tool(description = "Fetch the user's onboarding profile from the profile service, compute daily goals and start a fresh day of meal tracking")]
    async fn fetch_goals(&self, Parameters(p): Parameters<FetchGoalsParams>) -> Result<CallToolResult, McpError> {
        let result = goals::fetch_goals(
            self.source.as_ref(),
            &self.calculator,
            &self.progress,
            p.token.as_deref(),
        )
        .await;

        match result {
            Ok(Ok(response)) => to_json(&response),
            Ok(Err(invalid)) => to_json(&invalid),
            // Fetch failures are reported to the caller rather than as protocol errors
            Err(message) => to_json(&ErrorResponse { error: message }),
        }
    }

    // --- Progress ---

    #[tool(description = "Add a confirmed meal's calories, protein, carbs, fats and fiber to today's progress. Missing values count as zero.")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let meal = MealTotals {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fats: p.fats,
            fiber: p.fiber,
        };
        let result = progress::log_meal(&self.progress, &meal)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(response) => to_json(&response),
            Err(no_goals) => to_json(&no_goals),
        }
    }

    #[tool(description = "Get today's intake against the loaded goals, including remaining amounts")]
    fn get_progress(&self) -> Result<CallToolResult, McpError> {
        let result = progress::get_progress(&self.progress)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Ok(response) => to_json(&response),
            Err(no_goals) => to_json(&no_goals),
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutrigoalService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrigoal".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrigoal".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrigoal - Daily nutrition goals from onboarding answers. \
                 Call goal_instructions for field meanings and defaults. \
                 Goals: fetch_goals (from the profile service) or compute_goals (from explicit answers). \
                 Progress: log_meal, get_progress. \
                 Status: nutrigoal_status."
                    .into(),
            ),
        }
    }
}
