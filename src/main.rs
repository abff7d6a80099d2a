//! Nutrigoal
//!
//! An MCP server for daily nutrition goals.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrigoal::build_info;
use nutrigoal::config::Config;
use nutrigoal::mcp::NutrigoalService;
use nutrigoal::onboarding::OnboardingClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrigoal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env()?;
    match &config.api.base_url {
        Some(url) => eprintln!("Profile service: {}", url),
        None => eprintln!("Profile service not configured; fetch_goals is unavailable"),
    }
    eprintln!("Age method: {}", config.age_method.as_str());

    let source = Arc::new(OnboardingClient::new(&config.api)?);
    let service = NutrigoalService::new(&config, source);

    eprintln!("Starting MCP server on stdio...");

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
