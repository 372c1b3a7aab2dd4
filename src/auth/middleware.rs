//! 认证中间件
//! 提取并校验 Bearer 令牌，将认证上下文注入请求扩展

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::JwtService;
use crate::error::AppError;

/// 认证上下文（由 require_auth 中间件注入）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从请求头提取 Bearer 令牌
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// 认证中间件：校验令牌并注入 AuthContext
///
/// 缺失、格式错误、过期或签名无效的令牌统一返回 401。
pub async fn require_auth(
    State(jwt_service): State<Arc<JwtService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let claims = jwt_service.validate_token(token)?;

    request.extensions_mut().insert(AuthContext {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}
