//! 健康检查接口处理器

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::db;
use crate::middleware::AppState;

/// 服务启动时间（unix 秒）
static APP_START_TIME: OnceLock<u64> = OnceLock::new();

/// 记录服务启动时间，应在 main 中尽早调用
pub fn set_start_time() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let _ = APP_START_TIME.set(now);
}

fn get_uptime_secs() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    APP_START_TIME
        .get()
        .map(|start| uptime_since(now, *start))
        .unwrap_or(0)
}

/// 系统时钟回拨到启动时间之前时返回 0，不做下溢减法
fn uptime_since(now: u64, start: u64) -> u64 {
    now.saturating_sub(start)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /health - 存活检查（不访问任何依赖）
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: get_uptime_secs(),
    })
}

#[derive(Debug, Serialize)]
pub struct ReadinessCheck {
    pub name: &'static str,
    pub healthy: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<ReadinessCheck>,
}

/// GET /ready - 就绪检查（验证数据库可达）
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = db::health_check(&state.db).await;
    db::record_pool_metrics(&state.db);

    let response = ReadinessResponse {
        ready: db_status.healthy,
        checks: vec![ReadinessCheck {
            name: "database",
            healthy: db_status.healthy,
            latency_ms: db_status.latency_ms,
        }],
    };

    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
