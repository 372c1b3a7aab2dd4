//! 待办事项服务
//! 待办事项增删改查的业务逻辑，所有操作按 user_id 隔离

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{
    CreateTodoRequest, ListTodosQuery, TodoListResponse, TodoResponse, TodoSort,
    UpdateTodoRequest,
};
use crate::repository::TodoRepository;

/// 单页最大条数
const MAX_PAGE_LIMIT: i64 = 100;

pub struct TodoService {
    todo_repo: TodoRepository,
}

impl TodoService {
    pub fn new(db: PgPool) -> Self {
        Self {
            todo_repo: TodoRepository::new(db),
        }
    }

    /// 创建待办事项，归属当前用户
    pub async fn create(
        &self,
        user_id: i64,
        req: CreateTodoRequest,
    ) -> Result<TodoResponse, AppError> {
        let todo = self
            .todo_repo
            .create(user_id, &req.title, req.description.as_deref())
            .await?;

        tracing::info!(user_id, todo_id = todo.id, "Todo created");

        Ok(todo.into())
    }

    /// 分页查询当前用户的待办事项
    pub async fn list(
        &self,
        user_id: i64,
        query: ListTodosQuery,
    ) -> Result<TodoListResponse, AppError> {
        // 1. 校验分页参数
        if query.page < 1 {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }
        if query.limit < 1 || query.limit > MAX_PAGE_LIMIT {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }

        // 2. 解析状态过滤
        let done = match query.status.as_deref() {
            None => None,
            Some("done") => Some(true),
            Some("not_done") => Some(false),
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "invalid status filter: {} (expected done or not_done)",
                    other
                )))
            }
        };

        // 3. 解析排序表达式（白名单之外一律拒绝）
        let sort = match query.sort.as_deref() {
            None => TodoSort::default(),
            Some(expr) => TodoSort::parse(expr).ok_or_else(|| {
                AppError::Validation(format!("invalid sort expression: {}", expr))
            })?,
        };

        // 4. 查询总数和当前页（偏移量用 checked 运算，超大页号直接拒绝而不是溢出）
        let offset = query
            .page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(query.limit))
            .ok_or_else(|| AppError::Validation("page is out of range".to_string()))?;
        let total = self.todo_repo.count_for_user(user_id, done).await?;
        let todos = self
            .todo_repo
            .list_for_user(user_id, done, sort, query.limit, offset)
            .await?;

        Ok(TodoListResponse {
            data: todos.into_iter().map(TodoResponse::from).collect(),
            page: query.page,
            limit: query.limit,
            total,
        })
    }

    /// 部分更新当前用户拥有的待办事项
    ///
    /// 目标不存在与不属于该用户返回相同的 403，避免泄露他人资源
    /// 是否存在。
    pub async fn update(
        &self,
        user_id: i64,
        todo_id: i64,
        req: UpdateTodoRequest,
    ) -> Result<TodoResponse, AppError> {
        let todo = self
            .todo_repo
            .update_owned(user_id, todo_id, &req)
            .await?
            .ok_or(AppError::Forbidden)?;

        tracing::info!(user_id, todo_id, "Todo updated");

        Ok(todo.into())
    }

    /// 软删除当前用户拥有的待办事项
    pub async fn delete(&self, user_id: i64, todo_id: i64) -> Result<(), AppError> {
        let deleted = self.todo_repo.soft_delete_owned(user_id, todo_id).await?;

        if !deleted {
            return Err(AppError::Forbidden);
        }

        tracing::info!(user_id, todo_id, "Todo deleted");

        Ok(())
    }
}
