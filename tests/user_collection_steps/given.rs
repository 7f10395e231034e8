//! Given steps for user collection BDD scenarios.

use super::world::{UserCollectionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workboard::user::services::CreateUserRequest;

#[given("an empty user collection")]
fn empty_user_collection(world: &mut UserCollectionWorld) -> Result<(), eyre::Report> {
    let users = run_async(world.service.find_all()).wrap_err("list users")?;
    eyre::ensure!(users.is_empty(), "expected no users, found {}", users.len());
    Ok(())
}

#[given(r#"a user named "{name}" with email "{email}""#)]
fn existing_user(
    world: &mut UserCollectionWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateUserRequest::new(name, email)))
        .wrap_err("create user in scenario setup")?;
    world.record(Ok(created));
    Ok(())
}
