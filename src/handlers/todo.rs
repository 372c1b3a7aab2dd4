//! 待办事项接口处理器
//! 所有接口都需要认证，操作范围限定为当前用户

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::auth::AuthContext;
use crate::error::AppError;
use crate::middleware::{AppState, ValidatedJson};
use crate::models::{CreateTodoRequest, ListTodosQuery, UpdateTodoRequest};

/// POST /todos - 创建待办事项
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    ValidatedJson(req): ValidatedJson<CreateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let todo = state.todo_service.create(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos - 分页查询当前用户的待办事项
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Query(query): Query<ListTodosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.todo_service.list(auth.user_id, query).await?;
    Ok(Json(response))
}

/// PUT /todos/{id} - 部分更新待办事项
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let todo = state
        .todo_service
        .update(auth.user_id, todo_id, req)
        .await?;
    Ok(Json(todo))
}

/// DELETE /todos/{id} - 删除待办事项
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(todo_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.todo_service.delete(auth.user_id, todo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
