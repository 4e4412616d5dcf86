use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{companies, jobs, public};
use crate::middleware::{authenticate_jwt, ensure_admin};
use crate::services::{CompanyService, JobService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn companies(&self) -> CompanyService {
        CompanyService::new(self.pool.clone())
    }

    pub fn jobs(&self) -> JobService {
        JobService::new(self.pool.clone())
    }
}

/// Build the full application router
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(public_routes())
        .merge(admin_routes())
        .fallback(public::not_found)
        .layer(from_fn(authenticate_jwt))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    let router = match cors_layer(config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(companies::list))
        .route("/companies/:handle", get(companies::get))
        .route("/jobs", get(jobs::list))
        .route("/jobs/:id", get(jobs::get))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(companies::create))
        .route(
            "/companies/:handle",
            patch(companies::update).delete(companies::remove),
        )
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", patch(jobs::update).delete(jobs::remove))
        .route_layer(from_fn(ensure_admin))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let security = &config.security;
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_disabled_yields_no_layer() {
        let mut config = AppConfig::development();
        config.security.enable_cors = false;
        assert!(cors_layer(&config).is_none());
    }

    #[test]
    fn cors_enabled_yields_layer() {
        let mut config = AppConfig::development();
        config.security.enable_cors = true;
        config.security.cors_origins = vec!["http://localhost:3000".into(), "*".into()];
        assert!(cors_layer(&config).is_some());
    }
}
