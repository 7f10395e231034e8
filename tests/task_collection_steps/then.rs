//! Then steps for task collection BDD scenarios.

use super::world::{TaskCollectionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use workboard::collection::{domain::Choice, services::ErrorKind};
use workboard::task::domain::Task;

fn current_task(world: &TaskCollectionWorld) -> Result<&Task, eyre::Report> {
    world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing current task"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskCollectionWorld, status: String) -> Result<(), eyre::Report> {
    let task = current_task(world)?;
    eyre::ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status().as_str()
    );
    Ok(())
}

#[then(r#"the task priority is "{priority}""#)]
fn task_priority_is(world: &TaskCollectionWorld, priority: String) -> Result<(), eyre::Report> {
    let task = current_task(world)?;
    eyre::ensure!(
        task.priority().as_str() == priority,
        "expected priority {priority}, found {}",
        task.priority().as_str()
    );
    Ok(())
}

#[then(
    "the task statistics are {total:u64} total, {pending:u64} pending, {in_progress:u64} in progress, {completed:u64} completed"
)]
fn task_statistics_are(
    world: &TaskCollectionWorld,
    total: u64,
    pending: u64,
    in_progress: u64,
    completed: u64,
) -> Result<(), eyre::Report> {
    let stats = run_async(world.service.get_stats()).wrap_err("compute task statistics")?;
    eyre::ensure!(
        (stats.total, stats.pending, stats.in_progress, stats.completed)
            == (total, pending, in_progress, completed),
        "unexpected task statistics {stats:?}"
    );
    Ok(())
}

fn expect_error_kind(world: &TaskCollectionWorld, expected: ErrorKind) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    eyre::ensure!(
        err.kind() == expected,
        "expected {expected:?} error, got {err:?}"
    );
    Ok(())
}

#[then("the operation fails with a validation error")]
fn fails_with_validation_error(world: &TaskCollectionWorld) -> Result<(), eyre::Report> {
    expect_error_kind(world, ErrorKind::Validation)
}

#[then("the operation fails with a not found error")]
fn fails_with_not_found_error(world: &TaskCollectionWorld) -> Result<(), eyre::Report> {
    expect_error_kind(world, ErrorKind::NotFound)
}

#[then("the task collection is empty")]
fn task_collection_is_empty(world: &TaskCollectionWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.find_all()).wrap_err("list tasks")?;
    eyre::ensure!(tasks.is_empty(), "expected no tasks, found {}", tasks.len());
    Ok(())
}

#[then("{count:usize} tasks are listed")]
fn tasks_are_listed(world: &TaskCollectionWorld, count: usize) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.listed_tasks.len() == count,
        "expected {count} tasks, found {}",
        world.listed_tasks.len()
    );
    Ok(())
}
