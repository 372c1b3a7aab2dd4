//! 应用状态与通用中间件
//! 请求追踪（trace_id / request_id）、指标采集、带校验的 JSON 提取器

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{FromRequest, Request},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use crate::auth::JwtService;
use crate::error::AppError;
use crate::services::{AuthService, TodoService};

/// 应用共享状态（通过依赖注入传递，不使用全局变量）
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
    pub todo_service: Arc<TodoService>,
}

/// 从请求头提取 trace_id，不存在则生成新的
pub fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= 64)
        .map(|value| value.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// 请求追踪中间件
///
/// 为每个请求建立包含 trace_id / request_id 的日志 span，记录请求
/// 计数和耗时指标，并将两个 ID 写回响应头。
pub async fn request_tracking_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let trace_id = extract_or_generate_trace_id(request.headers());
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "http_request",
        %method,
        %path,
        trace_id = %trace_id,
        request_id = %request_id,
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    metrics::counter!("http_requests_total", "method" => method.to_string(), "status" => status.to_string())
        .increment(1);
    metrics::histogram!("http_request_duration_seconds").record(latency.as_secs_f64());

    span.in_scope(|| {
        tracing::info!(
            status,
            latency_ms = latency.as_millis() as u64,
            "Request completed"
        );
    });

    // 写回追踪 ID，便于客户端关联日志
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert("x-trace-id", value);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// 带校验的 JSON 提取器
///
/// 请求体反序列化失败或字段校验失败时统一返回 400，而不是
/// axum 默认的 422。
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;

        Ok(ValidatedJson(value))
    }
}
