//! 认证模块
//! JWT 令牌签发/校验、密码哈希、认证中间件

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, require_auth, AuthContext};
pub use password::PasswordHasher;
