//! 待办事项仓储层
//! 封装 todos 表的所有数据库访问，所有查询都带 user_id 归属条件

use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::models::{Todo, TodoSort, UpdateTodoRequest};

#[derive(Clone)]
pub struct TodoRepository {
    db: PgPool,
}

impl TodoRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建待办事项
    pub async fn create(
        &self,
        user_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(todo)
    }

    /// 分页查询当前用户的待办事项
    ///
    /// 排序字段和方向来自白名单枚举，因此 ORDER BY 的字符串拼接
    /// 不可能注入任意 SQL。
    pub async fn list_for_user(
        &self,
        user_id: i64,
        done: Option<bool>,
        sort: TodoSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Todo>, AppError> {
        let query = format!(
            r#"
            SELECT * FROM todos
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($2::boolean IS NULL OR done = $2)
            ORDER BY {} {}
            LIMIT $3 OFFSET $4
            "#,
            sort.field.as_sql(),
            sort.direction.as_sql(),
        );

        let todos = sqlx::query_as::<_, Todo>(&query)
            .bind(user_id)
            .bind(done)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(todos)
    }

    /// 统计当前用户的待办事项总数（与 list_for_user 使用相同过滤条件）
    pub async fn count_for_user(
        &self,
        user_id: i64,
        done: Option<bool>,
    ) -> Result<i64, AppError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) FROM todos
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($2::boolean IS NULL OR done = $2)
            "#,
        )
        .bind(user_id)
        .bind(done)
        .fetch_one(&self.db)
        .await?;

        Ok(row.get::<i64, _>(0))
    }

    /// 部分更新当前用户拥有的待办事项
    ///
    /// 未提供的字段通过 COALESCE 保持原值。目标不存在或不属于该
    /// 用户时返回 None。
    pub async fn update_owned(
        &self,
        user_id: i64,
        todo_id: i64,
        update: &UpdateTodoRequest,
    ) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                done = COALESCE($5, done),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(todo_id)
        .bind(user_id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.done)
        .fetch_optional(&self.db)
        .await?;

        Ok(todo)
    }

    /// 软删除当前用户拥有的待办事项
    ///
    /// 返回 true 表示删除成功；false 表示目标不存在或不属于该用户。
    pub async fn soft_delete_owned(&self, user_id: i64, todo_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(todo_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
