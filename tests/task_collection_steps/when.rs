//! When steps for task collection BDD scenarios.

use super::world::{TaskCollectionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use workboard::task::{
    domain::TaskId,
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[when(r#"a task titled "{title}" is created"#)]
fn create_task(world: &mut TaskCollectionWorld, title: String) {
    let result = run_async(world.service.create(CreateTaskRequest::new(title)));
    world.record(result);
}

#[when(r#"a task titled "{title}" is created with priority "{priority}""#)]
fn create_task_with_priority(world: &mut TaskCollectionWorld, title: String, priority: String) {
    let request = CreateTaskRequest::new(title).with_priority(priority);
    let result = run_async(world.service.create(request));
    world.record(result);
}

#[when(r#"the task status is changed to "{status}""#)]
fn change_task_status(world: &mut TaskCollectionWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world
        .current_task
        .as_ref()
        .map(workboard::task::domain::Task::id)
        .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))?;
    let result = run_async(
        world
            .service
            .update(task_id, UpdateTaskRequest::new().with_status(status)),
    );
    world.record(result);
    Ok(())
}

#[when("an unknown task is looked up")]
fn look_up_unknown_task(world: &mut TaskCollectionWorld) {
    let result = run_async(world.service.find_one(TaskId::new()));
    world.record(result);
}

#[when("an unknown task is removed")]
fn remove_unknown_task(world: &mut TaskCollectionWorld) {
    let result = run_async(world.service.remove(TaskId::new()));
    world.last_error = result.err();
}

#[when(r#"the tasks for user "{user_id}" are listed"#)]
fn list_tasks_for_user(world: &mut TaskCollectionWorld, user_id: String) -> Result<(), eyre::Report> {
    world.listed_tasks =
        run_async(world.service.find_by_user_id(&user_id)).wrap_err("list tasks for user")?;
    Ok(())
}
