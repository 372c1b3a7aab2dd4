//! 业务服务模块

pub mod auth_service;
pub mod todo_service;

pub use auth_service::AuthService;
pub use todo_service::TodoService;
