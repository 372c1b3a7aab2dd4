//! 路由配置
//! 公开路由（健康检查、注册、登录）与受保护路由（待办事项）分组组装

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};

use crate::auth::require_auth;
use crate::handlers::{auth, health, todo};
use crate::middleware::{request_tracking_middleware, AppState};

/// 构建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开路由：健康检查
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check));

    // 公开路由：认证
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // 受保护路由：待办事项（需要有效令牌）
    let todo_routes = Router::new()
        .route("/todos", get(todo::list_todos).post(todo::create_todo))
        .route(
            "/todos/{id}",
            put(todo::update_todo).delete(todo::delete_todo),
        )
        .layer(from_fn_with_state(state.jwt_service.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(todo_routes)
        .layer(from_fn(request_tracking_middleware))
        .with_state(state)
}
