//! 数据库连接池管理
//! 提供 PostgreSQL 连接池创建、迁移执行和健康检查

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

/// 数据库层错误
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect(config.url.expose_secret())
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// 执行数据库迁移
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// 数据库健康状态
#[derive(Debug)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency_ms: u64,
}

/// 数据库健康检查（执行 SELECT 1 并测量延迟）
pub async fn health_check(pool: &PgPool) -> HealthStatus {
    let start = std::time::Instant::now();
    let result = sqlx::query("SELECT 1").fetch_one(pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            latency_ms,
        },
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            HealthStatus {
                healthy: false,
                latency_ms,
            }
        }
    }
}

/// 记录连接池指标
pub fn record_pool_metrics(pool: &PgPool) {
    metrics::gauge!("db_pool_connections_total").set(pool.size() as f64);
    metrics::gauge!("db_pool_connections_idle").set(pool.num_idle() as f64);
}
