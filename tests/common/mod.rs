#![allow(dead_code)]

use anyhow::{Context, Result};
use sqlx::PgPool;

use jobly_api::app::{self, AppState};
use jobly_api::auth::{generate_jwt, Claims};
use jobly_api::config::config;
use jobly_api::database::DatabaseManager;

pub struct TestApp {
    pub base_url: String,
    pub pool: PgPool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start the server in-process on an ephemeral port.
///
/// Returns `None` when DATABASE_URL is not set so suites that need Postgres
/// pass trivially on machines without one.
pub async fn spawn_app() -> Result<Option<TestApp>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping database-backed test");
        return Ok(None);
    }

    let pool = DatabaseManager::connect(config()).await?;
    DatabaseManager::migrate(&pool).await?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    let router = app::router(AppState::new(pool.clone()), config());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(Some(TestApp {
        base_url: format!("http://{}", addr),
        pool,
        client: reqwest::Client::new(),
    }))
}

pub fn admin_token() -> String {
    generate_jwt(&Claims::new("admin", true)).expect("admin token")
}

pub fn user_token() -> String {
    generate_jwt(&Claims::new("user", false)).expect("user token")
}

/// Short lowercase suffix so concurrent runs never collide on handles
pub fn unique(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..8])
}
