//! Concurrent writers against shared in-memory services.

use super::helpers::{
    LockstepRepository, MemoryTaskService, MemoryUserService, task_service, user_service,
};
use mockable::DefaultClock;
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use workboard::collection::services::ErrorKind;
use workboard::task::{
    domain::{Task, TaskStatus},
    services::{CreateTaskRequest, TaskService, UpdateTaskRequest},
};
use workboard::user::{
    domain::User,
    services::{CreateUserRequest, UpdateUserRequest, UserService},
};

const WRITERS: usize = 32;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_concurrent_create_claims_an_email(
    user_service: MemoryUserService,
) -> Result<(), eyre::Report> {
    let mut writers = JoinSet::new();
    for index in 0..WRITERS {
        let service = user_service.clone();
        writers.spawn(async move {
            service
                .create(CreateUserRequest::new(format!("writer {index}"), "race@x.com"))
                .await
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(joined) = writers.join_next().await {
        match joined? {
            Ok(_) => created += 1,
            Err(err) if err.kind() == ErrorKind::Conflict => conflicts += 1,
            Err(err) => return Err(err.into()),
        }
    }

    eyre::ensure!(created == 1, "expected exactly one winner, got {created}");
    eyre::ensure!(conflicts == WRITERS - 1, "expected {} conflicts", WRITERS - 1);
    let stats = user_service.get_stats().await?;
    eyre::ensure!(stats.total == 1, "expected one stored user");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_concurrent_update_claims_an_email(
    user_service: MemoryUserService,
) -> Result<(), eyre::Report> {
    let mut ids = Vec::with_capacity(WRITERS);
    for index in 0..WRITERS {
        let user = user_service
            .create(CreateUserRequest::new(
                format!("user {index}"),
                format!("user{index}@x.com"),
            ))
            .await?;
        ids.push(user.id());
    }

    let mut writers = JoinSet::new();
    for id in ids {
        let service = user_service.clone();
        writers.spawn(async move {
            service
                .update(id, UpdateUserRequest::new().with_email("claimed@x.com"))
                .await
        });
    }

    let mut winners = 0;
    while let Some(joined) = writers.join_next().await {
        if joined?.is_ok() {
            winners += 1;
        }
    }

    eyre::ensure!(winners == 1, "expected exactly one winner, got {winners}");
    let holders = user_service
        .find_all()
        .await?
        .into_iter()
        .filter(|user| user.email().as_str() == "claimed@x.com")
        .count();
    eyre::ensure!(holders == 1, "expected one holder, found {holders}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_yield_unique_ids(
    task_service: MemoryTaskService,
) -> Result<(), eyre::Report> {
    let mut writers = JoinSet::new();
    for index in 0..WRITERS {
        let service = task_service.clone();
        writers.spawn(async move {
            service
                .create(CreateTaskRequest::new(format!("task {index}")))
                .await
        });
    }

    let mut ids = HashSet::new();
    while let Some(joined) = writers.join_next().await {
        ids.insert(joined??.id());
    }

    eyre::ensure!(ids.len() == WRITERS, "expected {WRITERS} distinct ids");
    let stats = task_service.get_stats().await?;
    eyre::ensure!(stats.total == u64::try_from(WRITERS)?, "stats should count every task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_task_updates_keep_every_field() -> Result<(), eyre::Report> {
    let service = TaskService::new(
        Arc::new(LockstepRepository::<Task>::new(2)),
        Arc::new(DefaultClock),
    );
    let id = service.create(CreateTaskRequest::new("original")).await?.id();

    let renamer = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .update(id, UpdateTaskRequest::new().with_title("new title"))
                .await
        })
    };
    let finisher = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .update(id, UpdateTaskRequest::new().with_status("completed"))
                .await
        })
    };
    renamer.await??;
    finisher.await??;

    let stored = service.find_one(id).await?;
    eyre::ensure!(stored.title() == "new title", "title lost: {}", stored.title());
    eyre::ensure!(
        stored.status() == TaskStatus::Completed,
        "status lost: {:?}",
        stored.status()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_user_updates_keep_name_and_released_email() -> Result<(), eyre::Report> {
    let service = UserService::new(
        Arc::new(LockstepRepository::<User>::new(2)),
        Arc::new(DefaultClock),
    );
    let id = service
        .create(CreateUserRequest::new("Ada", "ada@old.com"))
        .await?
        .id();

    let renamer = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .update(id, UpdateUserRequest::new().with_name("Ada Lovelace"))
                .await
        })
    };
    let mover = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .update(id, UpdateUserRequest::new().with_email("ada@new.com"))
                .await
        })
    };
    renamer.await??;
    mover.await??;

    let stored = service.find_one(id).await?;
    eyre::ensure!(stored.name() == "Ada Lovelace", "name lost: {}", stored.name());
    eyre::ensure!(
        stored.email().as_str() == "ada@new.com",
        "email reverted to {}",
        stored.email().as_str()
    );
    service
        .create(CreateUserRequest::new("Newcomer", "ada@old.com"))
        .await?;
    Ok(())
}
