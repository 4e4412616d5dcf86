use std::future::Future;
use std::time::{Duration, Instant};

use crate::config;

/// Await a statement, logging it and flagging it when slow
pub async fn timed<T, F>(sql: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let started = Instant::now();
    let out = fut.await;
    log_query(sql, started.elapsed());
    out
}

fn log_query(sql: &str, elapsed: Duration) {
    let db = &config::config().database;
    let threshold = Duration::from_millis(db.slow_query_threshold_ms);

    if elapsed >= threshold {
        tracing::warn!("Slow query ({} ms): {}", elapsed.as_millis(), sql);
    } else if db.enable_query_logging {
        tracing::debug!("Query ({} ms): {}", elapsed.as_millis(), sql);
    }
}
