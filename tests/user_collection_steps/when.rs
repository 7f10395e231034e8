//! When steps for user collection BDD scenarios.

use super::world::{UserCollectionWorld, run_async};
use rstest_bdd_macros::when;
use workboard::user::services::{CreateUserRequest, UpdateUserRequest};

#[when(r#"a user named "{name}" with email "{email}" is created"#)]
fn create_user(world: &mut UserCollectionWorld, name: String, email: String) {
    let result = run_async(world.service.create(CreateUserRequest::new(name, email)));
    world.record(result);
}

#[when(r#"user "{name}" changes email to "{email}""#)]
fn change_email(
    world: &mut UserCollectionWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let user_id = world
        .users_by_name
        .get(&name)
        .map(workboard::user::domain::User::id)
        .ok_or_else(|| eyre::eyre!("no user named {name} in scenario world"))?;
    let result = run_async(
        world
            .service
            .update(user_id, UpdateUserRequest::new().with_email(email)),
    );
    world.record(result);
    Ok(())
}
