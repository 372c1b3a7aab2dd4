//! 认证接口处理器
//! 注册和登录

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::error::AppError;
use crate::middleware::{AppState, ValidatedJson};
use crate::models::{LoginRequest, RegisterRequest};

/// POST /register - 注册新用户
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /login - 登录并获取令牌
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;
    Ok(Json(response))
}
