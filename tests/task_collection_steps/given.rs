//! Given steps for task collection BDD scenarios.

use super::world::{TaskCollectionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workboard::task::services::CreateTaskRequest;

#[given("an empty task collection")]
fn empty_task_collection(world: &mut TaskCollectionWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.find_all()).wrap_err("list tasks")?;
    eyre::ensure!(tasks.is_empty(), "expected no tasks, found {}", tasks.len());
    Ok(())
}

#[given(r#"a task titled "{title}" with status "{status}""#)]
fn task_with_status(
    world: &mut TaskCollectionWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title).with_status(status);
    let created = run_async(world.service.create(request)).wrap_err("create task")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" assigned to "{user_id}""#)]
fn task_assigned_to(
    world: &mut TaskCollectionWorld,
    title: String,
    user_id: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title).with_user_id(user_id);
    let created = run_async(world.service.create(request)).wrap_err("create assigned task")?;
    world.current_task = Some(created);
    Ok(())
}
