//! 仓储模块
//! 数据库访问层，每张表一个仓储

pub mod todo_repo;
pub mod user_repo;

pub use todo_repo::TodoRepository;
pub use user_repo::UserRepository;
