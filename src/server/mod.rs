//! HTTP surface: `/check`, `/ai-suggestions` and `/health`

pub mod routes;

use crate::config::AppConfig;
use crate::domain::{AvailabilityEvaluator, RegistryClient};
use crate::error::{DomainScoutError, Result};
use crate::llm::NameGenerator;
use crate::suggest::SuggestionResolver;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<AvailabilityEvaluator>,
    pub resolver: Arc<SuggestionResolver>,
}

impl AppState {
    /// Wire the registry client, evaluator, providers and resolver
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let registry = RegistryClient::with_config(config.check.clone());
        if !registry.is_configured() {
            return Err(DomainScoutError::config(
                "No registry lookup method enabled; /check and suggestions cannot be verified",
            ));
        }
        let registry = Arc::new(registry);
        let evaluator = Arc::new(AvailabilityEvaluator::new(registry));

        let mut resolver = SuggestionResolver::new(evaluator.clone(), config.suggest.clone());

        if config.llm.is_empty() {
            tracing::warn!("No LLM provider configured; suggestions will come from the fallback generator only");
        } else {
            let generator = NameGenerator::new();
            for llm in &config.llm {
                generator.add_provider(llm)?;
                tracing::info!(provider = %llm.provider, model = %llm.model, "LLM provider configured");
            }
            generator.set_default_provider(&config.llm[0].provider);
            resolver = resolver.with_source(Arc::new(generator));
        }

        Ok(Self {
            evaluator,
            resolver: Arc::new(resolver),
        })
    }
}

/// Build the application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/check", get(routes::check_handler))
        .route("/ai-suggestions", get(routes::suggestions_handler))
        .route("/health", get(routes::health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
