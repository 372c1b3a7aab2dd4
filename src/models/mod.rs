//! 数据模型模块

pub mod todo;
pub mod user;

pub use todo::{
    CreateTodoRequest, ListTodosQuery, Todo, TodoListResponse, TodoResponse, TodoSort,
    UpdateTodoRequest,
};
pub use user::{LoginRequest, RegisterRequest, TokenResponse, User};
