//! Todo item model, request/response types, and list query parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Todo row. Soft-deleted rows keep their data but carry `deleted_at`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 500, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
}

/// Partial update: absent fields keep their current value.
///
/// Unknown fields are rejected so a typo like `"titel"` fails loudly
/// instead of silently updating nothing.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 500, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            done: todo.done,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Paginated list envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub data: Vec<TodoResponse>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// "done" or "not_done"; absent means both.
    pub status: Option<String>,
    /// "field" or "field asc|desc"; defaults to "created_at desc".
    pub sort: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Columns the list endpoint may sort by. Interpolating anything outside
/// this whitelist into ORDER BY is impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Done,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "done" => Some(Self::Done),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Done => "done",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Validated sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TodoSort {
    /// Parse "field" or "field direction" (case-insensitive, whitespace
    /// separated). Returns `None` for anything outside the whitelist.
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        let mut parts = lowered.split_whitespace();

        let field = SortField::parse(parts.next()?)?;
        let direction = match parts.next() {
            Some(dir) => SortDirection::parse(dir)?,
            None => SortDirection::Asc,
        };

        // Trailing tokens make the whole expression invalid.
        if parts.next().is_some() {
            return None;
        }

        Some(Self { field, direction })
    }
}

impl Default for TodoSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse_field_only() {
        let sort = TodoSort::parse("title").unwrap();
        assert_eq!(sort.field, SortField::Title);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_parse_field_and_direction() {
        let sort = TodoSort::parse("created_at desc").unwrap();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort = TodoSort::parse("done asc").unwrap();
        assert_eq!(sort.field, SortField::Done);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_parse_case_and_whitespace() {
        let sort = TodoSort::parse("  Title   DESC  ").unwrap();
        assert_eq!(sort.field, SortField::Title);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_sort_parse_rejects_unknown_field() {
        assert!(TodoSort::parse("password_hash").is_none());
        assert!(TodoSort::parse("id; DROP TABLE todos").is_none());
        assert!(TodoSort::parse("created_at desc extra").is_none());
        assert!(TodoSort::parse("").is_none());
        assert!(TodoSort::parse("title sideways").is_none());
    }

    #[test]
    fn test_sort_default() {
        let sort = TodoSort::default();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let result: Result<UpdateTodoRequest, _> =
            serde_json::from_str(r#"{"titel": "typo"}"#);
        assert!(result.is_err());

        let result: Result<UpdateTodoRequest, _> =
            serde_json::from_str(r#"{"title": "ok", "done": true}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_update_request_accepts_empty_body() {
        let empty: UpdateTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.title.is_none());
        assert!(empty.description.is_none());
        assert!(empty.done.is_none());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListTodosQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.status.is_none());
        assert!(query.sort.is_none());
    }
}
