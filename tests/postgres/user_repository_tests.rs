//! User persistence tests against `PostgreSQL`.

use crate::postgres::helpers::{pg_context, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use workboard::collection::services::{CollectionServiceError, ErrorKind};
use workboard::user::services::{CreateUserRequest, UpdateUserRequest};

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn duplicate_email_on_insert_is_a_conflict(shared_test_cluster: &'static TestCluster) {
    let context = pg_context(shared_test_cluster).expect("context setup");
    let rt = test_runtime().expect("runtime");

    rt.block_on(context.users.create(CreateUserRequest::new("A", "a@x.com")))
        .expect("create first user");
    let err = rt
        .block_on(context.users.create(CreateUserRequest::new("B", "a@x.com")))
        .expect_err("duplicate email should conflict");

    assert!(matches!(
        err,
        CollectionServiceError::Conflict { kind: "user", field: "email", ref value } if value == "a@x.com"
    ));
    let stats = rt.block_on(context.users.get_stats()).expect("stats");
    assert_eq!(stats.total, 1);
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn duplicate_email_on_update_is_a_conflict(shared_test_cluster: &'static TestCluster) {
    let context = pg_context(shared_test_cluster).expect("context setup");
    let rt = test_runtime().expect("runtime");

    rt.block_on(context.users.create(CreateUserRequest::new("A", "a@x.com")))
        .expect("create first user");
    let bob = rt
        .block_on(context.users.create(CreateUserRequest::new("B", "b@x.com")))
        .expect("create second user");

    let err = rt
        .block_on(
            context
                .users
                .update(bob.id(), UpdateUserRequest::new().with_email("a@x.com")),
        )
        .expect_err("taken email should conflict");
    let fetched = rt
        .block_on(context.users.find_one(bob.id()))
        .expect("find user");

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(fetched.email().as_str(), "b@x.com");
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn user_round_trips_with_defaults(shared_test_cluster: &'static TestCluster) {
    let context = pg_context(shared_test_cluster).expect("context setup");
    let rt = test_runtime().expect("runtime");

    let created = rt
        .block_on(
            context.users.create(
                CreateUserRequest::new("Ada", "ada@example.com")
                    .with_avatar("https://example.com/ada.png"),
            ),
        )
        .expect("create user");
    let fetched = rt
        .block_on(context.users.find_one(created.id()))
        .expect("find user");

    assert_eq!(fetched, created);
    assert_eq!(fetched.role(), "user");
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn removed_email_can_be_claimed_again(shared_test_cluster: &'static TestCluster) {
    let context = pg_context(shared_test_cluster).expect("context setup");
    let rt = test_runtime().expect("runtime");

    let ada = rt
        .block_on(context.users.create(CreateUserRequest::new("Ada", "a@x.com")))
        .expect("create user");
    rt.block_on(context.users.remove(ada.id())).expect("remove user");

    rt.block_on(context.users.create(CreateUserRequest::new("Ada 2", "a@x.com")))
        .expect("freed email should be reusable");
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn long_name_and_role_are_stored_in_full(shared_test_cluster: &'static TestCluster) {
    let context = pg_context(shared_test_cluster).expect("context setup");
    let rt = test_runtime().expect("runtime");
    let name = "n".repeat(1_000);
    let role = "r".repeat(500);

    let created = rt
        .block_on(
            context
                .users
                .create(CreateUserRequest::new(name.clone(), "long@x.com").with_role(role.clone())),
        )
        .expect("long values should be accepted");
    let fetched = rt
        .block_on(context.users.find_one(created.id()))
        .expect("find user");

    assert_eq!(fetched.name(), name);
    assert_eq!(fetched.role(), role);
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn overlapping_name_and_email_updates_are_both_kept(shared_test_cluster: &'static TestCluster) {
    let context = pg_context(shared_test_cluster).expect("context setup");
    let rt = test_runtime().expect("runtime");
    let id = rt
        .block_on(context.users.create(CreateUserRequest::new("Ada", "ada@old.com")))
        .expect("create user")
        .id();

    let (renamed, moved) = rt.block_on(async {
        tokio::join!(
            context
                .users
                .update(id, UpdateUserRequest::new().with_name("Ada Lovelace")),
            context
                .users
                .update(id, UpdateUserRequest::new().with_email("ada@new.com")),
        )
    });
    renamed.expect("name update");
    moved.expect("email update");
    let stored = rt
        .block_on(context.users.find_one(id))
        .expect("find user");

    assert_eq!(stored.name(), "Ada Lovelace");
    assert_eq!(stored.email().as_str(), "ada@new.com");
    rt.block_on(context.users.create(CreateUserRequest::new("Newcomer", "ada@old.com")))
        .expect("released email should be reusable");
}
