//! 仓储层集成测试
//! 直接针对仓储验证唯一约束映射、软删除和归属过滤（需要数据库）

mod common;

use serial_test::serial;

use todo_service::error::AppError;
use todo_service::models::{TodoSort, UpdateTodoRequest};
use todo_service::repository::{TodoRepository, UserRepository};

use common::setup_test_db;

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_create_and_find_user() {
    let pool = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let created = repo
        .create("Alice", "alice@example.com", "$argon2id$hash")
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.email, "alice@example.com");

    let found = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(found.unwrap().id, created.id);

    let missing = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_duplicate_email_maps_to_conflict() {
    let pool = setup_test_db().await;
    let repo = UserRepository::new(pool);

    repo.create("Alice", "alice@example.com", "$argon2id$hash")
        .await
        .unwrap();

    let result = repo
        .create("Impostor", "alice@example.com", "$argon2id$other")
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_soft_delete_hides_todo() {
    let pool = setup_test_db().await;
    let users = UserRepository::new(pool.clone());
    let todos = TodoRepository::new(pool);

    let user = users
        .create("Alice", "alice@example.com", "$argon2id$hash")
        .await
        .unwrap();

    let todo = todos.create(user.id, "Task", None).await.unwrap();
    assert_eq!(todos.count_for_user(user.id, None).await.unwrap(), 1);

    let deleted = todos.soft_delete_owned(user.id, todo.id).await.unwrap();
    assert!(deleted);

    // 软删除后从列表和计数中消失
    assert_eq!(todos.count_for_user(user.id, None).await.unwrap(), 0);
    let listed = todos
        .list_for_user(user.id, None, TodoSort::default(), 10, 0)
        .await
        .unwrap();
    assert!(listed.is_empty());

    // 重复删除无效
    let deleted_again = todos.soft_delete_owned(user.id, todo.id).await.unwrap();
    assert!(!deleted_again);
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_update_owned_requires_ownership() {
    let pool = setup_test_db().await;
    let users = UserRepository::new(pool.clone());
    let todos = TodoRepository::new(pool);

    let alice = users
        .create("Alice", "alice@example.com", "$argon2id$hash")
        .await
        .unwrap();
    let bob = users
        .create("Bob", "bob@example.com", "$argon2id$hash")
        .await
        .unwrap();

    let todo = todos.create(alice.id, "Alice task", None).await.unwrap();

    let update = UpdateTodoRequest {
        title: Some("Hijacked".to_string()),
        description: None,
        done: None,
    };

    // 他人和不存在的 ID 都返回 None
    let result = todos.update_owned(bob.id, todo.id, &update).await.unwrap();
    assert!(result.is_none());

    let result = todos.update_owned(alice.id, 99999, &update).await.unwrap();
    assert!(result.is_none());

    // 所有者可以更新
    let result = todos
        .update_owned(alice.id, todo.id, &update)
        .await
        .unwrap();
    assert_eq!(result.unwrap().title, "Hijacked");
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_partial_update_keeps_description() {
    let pool = setup_test_db().await;
    let users = UserRepository::new(pool.clone());
    let todos = TodoRepository::new(pool);

    let user = users
        .create("Alice", "alice@example.com", "$argon2id$hash")
        .await
        .unwrap();

    let todo = todos
        .create(user.id, "Task", Some("keep this note"))
        .await
        .unwrap();

    let update = UpdateTodoRequest {
        title: Some("Renamed".to_string()),
        description: None,
        done: None,
    };
    let updated = todos
        .update_owned(user.id, todo.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("keep this note"));
    assert!(updated.updated_at >= todo.updated_at);
}

#[tokio::test]
#[serial]
#[ignore] // 需要数据库
async fn test_count_matches_filtered_list() {
    let pool = setup_test_db().await;
    let users = UserRepository::new(pool.clone());
    let todos = TodoRepository::new(pool);

    let user = users
        .create("Alice", "alice@example.com", "$argon2id$hash")
        .await
        .unwrap();

    for i in 0..3 {
        todos
            .create(user.id, &format!("Task {}", i), None)
            .await
            .unwrap();
    }
    let done_todo = todos.create(user.id, "Done task", None).await.unwrap();
    let update = UpdateTodoRequest {
        title: None,
        description: None,
        done: Some(true),
    };
    todos
        .update_owned(user.id, done_todo.id, &update)
        .await
        .unwrap();

    assert_eq!(todos.count_for_user(user.id, None).await.unwrap(), 4);
    assert_eq!(todos.count_for_user(user.id, Some(true)).await.unwrap(), 1);
    assert_eq!(todos.count_for_user(user.id, Some(false)).await.unwrap(), 3);

    let done_list = todos
        .list_for_user(user.id, Some(true), TodoSort::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(done_list.len(), 1);
    assert_eq!(done_list[0].title, "Done task");
}
