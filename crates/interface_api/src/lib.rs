//! HTTP API Layer
//!
//! This crate provides the REST API for the lending core using Axum. It exposes
//! the funding calculator and the borrower validators over JSON.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for funding and borrower validation
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Response bodies
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{connect_store, create_router};
//!
//! let store = connect_store(&config).await?;
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use tracing::info;

use domain_funding::{FundingService, FundingStore, InMemoryFundingStore};
use infra_db::{create_pool, run_migrations, DatabaseConfig, DatabaseError, PostgresFundingStore};

use crate::config::{ApiConfig, StorageBackend};
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{borrower, funding, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub funding: FundingService,
    pub config: ApiConfig,
}

/// Opens the funding store selected by the configuration
///
/// For PostgreSQL this creates the pool and, when enabled, applies the
/// embedded migrations.
pub async fn connect_store(config: &ApiConfig) -> Result<Arc<dyn FundingStore>, DatabaseError> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory funding store");
            Ok(Arc::new(InMemoryFundingStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = create_pool(
                DatabaseConfig::new(config.database_url.clone())
                    .connections(config.database_min_connections, config.database_max_connections)
                    .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs)),
            )
            .await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PostgresFundingStore::new(pool)))
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Funding store used by every funding route
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn FundingStore>, config: ApiConfig) -> Router {
    let state = AppState {
        funding: FundingService::new(store),
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let application_routes = Router::new()
        .route("/:id/funding-calculation", post(funding::calculate_funding))
        .route("/:id/funding-calculation-history", get(funding::funding_history))
        .route("/:id/funding-result", get(funding::funding_result))
        .route("/:id/extend-loan", post(funding::extend_loan))
        .route("/:id/loan-metrics", get(funding::loan_metrics))
        .route("/:id/eligibility", post(funding::borrower_eligibility));

    let borrower_routes = Router::new()
        .route("/validate/company", post(borrower::validate_company))
        .route("/validate/individual", post(borrower::validate_individual))
        .route("/validate/abn", post(borrower::check_abn))
        .route("/validate/acn", post(borrower::check_acn))
        .route("/financial-summary", post(borrower::financial_summary));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/applications", application_routes)
        .nest("/borrowers", borrower_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
