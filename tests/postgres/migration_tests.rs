//! Schema migration tests.

use crate::postgres::helpers::TemporaryDatabase;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use workboard::collection::adapters::postgres::apply_migrations;

#[derive(diesel::QueryableByName)]
struct IndexRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    indexname: String,
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn migrations_can_be_reapplied(shared_test_cluster: &'static TestCluster) {
    let database = TemporaryDatabase::create(shared_test_cluster).expect("database setup");
    let mut conn = PgConnection::establish(database.url()).expect("connect");

    apply_migrations(&mut conn).expect("second application should be a no-op");
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
fn email_uniqueness_index_exists(shared_test_cluster: &'static TestCluster) {
    let database = TemporaryDatabase::create(shared_test_cluster).expect("database setup");
    let mut conn = PgConnection::establish(database.url()).expect("connect");

    let indexes = diesel::sql_query(
        "SELECT indexname::text AS indexname FROM pg_indexes WHERE tablename = 'users'",
    )
    .load::<IndexRow>(&mut conn)
    .expect("list indexes");

    assert!(
        indexes
            .iter()
            .any(|row| row.indexname == "idx_users_email_unique")
    );
}
