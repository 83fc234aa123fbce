//! `PostgreSQL` integration tests for task storage and lifecycle flows.

use crate::postgres::helpers::{TaskTestContext, context};
use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).single().expect("valid timestamp")
}

fn draft(title: &str, created_at: DateTime<Utc>, status: TaskStatus) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(0),
        title: title.to_owned(),
        description: format!("{title} details"),
        status,
        created_at,
        completed_at: Some(created_at),
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_then_find_round_trips_columns(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };
    let task = draft("Buy milk", base_time(), TaskStatus::New);

    let id = ctx.repository.store(&task).await.expect("store");
    let found = ctx.repository.find_by_id(id).await.expect("find");

    assert_eq!(found.id(), Some(id));
    assert_eq!(found.title(), "Buy milk");
    assert_eq!(found.description(), "Buy milk details");
    assert_eq!(found.status(), TaskStatus::New);
    assert_eq!(found.created_at(), base_time());
    assert_eq!(found.completed_at(), None, "store must not write completed_at");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_assigns_increasing_identifiers(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };

    let first = ctx
        .repository
        .store(&draft("first", base_time(), TaskStatus::New))
        .await
        .expect("store first");
    let second = ctx
        .repository
        .store(&draft("second", base_time(), TaskStatus::New))
        .await
        .expect("store second");

    assert!(second > first);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_newest_first_and_filtered(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };
    let repository = &ctx.repository;
    let old_open = repository
        .store(&draft("old open", base_time(), TaskStatus::New))
        .await
        .expect("store");
    let done = repository
        .store(&draft(
            "done",
            base_time() + Duration::minutes(1),
            TaskStatus::Completed,
        ))
        .await
        .expect("store");
    let new_open = repository
        .store(&draft(
            "new open",
            base_time() + Duration::minutes(2),
            TaskStatus::New,
        ))
        .await
        .expect("store");

    let ids = |tasks: Vec<Task>| tasks.iter().filter_map(Task::id).collect::<Vec<_>>();
    let all = repository.list_all().await.expect("list all");
    let open = repository.list_new().await.expect("list new");
    let completed = repository.list_completed().await.expect("list completed");

    assert_eq!(ids(all), [new_open, done, old_open]);
    assert_eq!(ids(open), [new_open, old_open]);
    assert_eq!(ids(completed), [done]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_table_lists_nothing(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };

    assert!(ctx.repository.list_all().await.expect("list all").is_empty());
    assert!(ctx.repository.list_new().await.expect("list new").is_empty());
    assert!(
        ctx.repository
            .list_completed()
            .await
            .expect("list completed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_overwrites_mutable_columns(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };
    let id = ctx
        .repository
        .store(&draft("Draft", base_time(), TaskStatus::New))
        .await
        .expect("store");
    let mut task = ctx.repository.find_by_id(id).await.expect("find");
    task.set_title("Final");
    task.set_description("Ready to ship");
    task.complete(&DefaultClock);

    ctx.repository.update(&task).await.expect("update");
    let reloaded = ctx.repository.find_by_id(id).await.expect("reload");

    assert_eq!(reloaded.title(), "Final");
    assert_eq!(reloaded.description(), "Ready to ship");
    assert_eq!(reloaded.status(), TaskStatus::Completed);
    assert_eq!(reloaded.created_at(), base_time());
    let written = task.completed_at().expect("completion time");
    let read_back = reloaded.completed_at().expect("stored completion time");
    // TIMESTAMPTZ keeps microseconds.
    assert!((written - read_back).abs() < Duration::milliseconds(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_rows_report_not_found(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };
    let missing = TaskId::new(9_999);
    let ghost = Task::from_persisted(PersistedTaskData {
        id: missing,
        title: "ghost".to_owned(),
        description: String::new(),
        status: TaskStatus::New,
        created_at: base_time(),
        completed_at: None,
    });

    assert!(matches!(
        ctx.repository.find_by_id(missing).await,
        Err(TaskRepositoryError::NotFound(id)) if id == missing
    ));
    assert!(
        ctx.repository
            .update(&ghost)
            .await
            .is_err_and(|err| err.is_not_found())
    );
    assert!(
        ctx.repository
            .delete(missing)
            .await
            .is_err_and(|err| err.is_not_found())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_flow_against_postgres(
    #[future] context: Option<TaskTestContext>,
) {
    let Some(ctx) = context.await else {
        return;
    };
    let service = &ctx.service;

    let created = service
        .create(CreateTaskRequest::new("Buy milk", "2 liters"))
        .await
        .expect("create");
    let id = created.id().expect("created task has an id");
    let completed = service.complete(id).await.expect("complete");
    let reopened = service
        .update(UpdateTaskRequest::new(id).with_status("new"))
        .await
        .expect("reopen");
    service.delete(id).await.expect("delete");

    assert_eq!(completed.status(), TaskStatus::Completed);
    assert!(completed.completed_at().is_some());
    assert_eq!(reopened.status(), TaskStatus::New);
    assert_eq!(reopened.completed_at(), None);
    assert!(service.list_all().await.expect("list all").is_empty());
}
