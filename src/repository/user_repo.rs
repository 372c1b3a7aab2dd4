//! 用户仓储层
//! 封装 users 表的所有数据库访问

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

#[derive(Clone)]
pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 按邮箱查找用户（忽略软删除的行）
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 按 ID 查找用户
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 创建用户
    ///
    /// 邮箱唯一性由数据库唯一索引保证；并发注册时冲突的一方会收到
    /// 唯一约束违反，映射为 Conflict。
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AppError::Conflict("email already registered".to_string())
            } else {
                AppError::Database(err)
            }
        })?;

        Ok(user)
    }
}
