//! Domain Scout HTTP server
//!
//! Serves `/check` and `/ai-suggestions` over the registry and LLM
//! collaborators configured through the environment.

use anyhow::{Context, Result};
use domain_scout::server::{build_app, AppState};
use domain_scout::AppConfig;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    domain_scout::init().context("Failed to initialize")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domain_scout=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = domain_scout::VERSION, "Starting domain-scout");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let app = build_app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Print help information
fn print_help() {
    println!("domain-scout {}", domain_scout::VERSION);
    println!();
    println!("USAGE:");
    println!("    domain-scout");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /check?domain=<name>           Availability and expiration countdown");
    println!("    GET /ai-suggestions?domain=<name>  Available alternative names");
    println!("    GET /health                        Liveness probe");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    HOST                   Bind address (default: 0.0.0.0)");
    println!("    PORT                   Bind port (default: 10000)");
    println!("    LOOKUP_TIMEOUT_SECS    Registry lookup timeout (default: 10)");
    println!("    SUGGESTION_COUNT       Suggestions per request (default: 5)");
    println!("    CANDIDATE_BATCH        Names requested from the LLM (default: 10)");
    println!("    MAX_FALLBACK_ATTEMPTS  Fallback names tried per request (default: 25)");
    println!("    OPENAI_API_KEY         OpenAI API key");
    println!("    OPENAI_BASE_URL        OpenAI-compatible base URL");
    println!("    OPENAI_MODEL           OpenAI model (default: gpt-4.1-mini)");
    println!("    ANTHROPIC_API_KEY      Anthropic API key");
    println!("    ANTHROPIC_MODEL        Anthropic model (default: claude-sonnet-4-0)");
    println!("    RUST_LOG               Log filter (default: domain_scout=info,tower_http=info)");
}
