//! 认证服务
//! 用户注册与登录的业务逻辑

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtService, PasswordHasher};
use crate::error::AppError;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::repository::UserRepository;

pub struct AuthService {
    user_repo: UserRepository,
    password_hasher: PasswordHasher,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>) -> Result<Self, AppError> {
        Ok(Self {
            user_repo: UserRepository::new(db),
            password_hasher: PasswordHasher::new()?,
            jwt_service,
        })
    }

    /// 注册新用户并签发令牌
    pub async fn register(&self, req: RegisterRequest) -> Result<TokenResponse, AppError> {
        // 1. 预检查邮箱是否已被占用（友好报错；并发下最终由唯一索引兜底）
        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        // 2. 哈希密码（明文密码绝不落库、绝不写日志）
        let password_hash = self.password_hasher.hash_password(&req.password)?;

        // 3. 创建用户（并发竞争时唯一索引违反映射为 Conflict）
        let user = self
            .user_repo
            .create(&req.name, &req.email, &password_hash)
            .await?;

        // 4. 签发令牌
        let token = self.jwt_service.generate_token(user.id)?;

        tracing::info!(user_id = user.id, "User registered");

        Ok(TokenResponse { token })
    }

    /// 校验凭证并签发令牌
    ///
    /// 邮箱不存在与密码错误返回相同的 401，避免账号枚举。
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, AppError> {
        // 1. 查找用户
        let user = self
            .user_repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        // 2. 校验密码
        self.password_hasher
            .verify_password(&req.password, &user.password_hash)?;

        // 3. 签发令牌
        let token = self.jwt_service.generate_token(user.id)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(TokenResponse { token })
    }
}
