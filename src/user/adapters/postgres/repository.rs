//! `PostgreSQL` repository implementation for user storage.
//!
//! Email uniqueness rests on the `idx_users_email_unique` index; a unique
//! violation on that index is reported as a duplicate key rather than a
//! generic persistence failure.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::collection::{
    adapters::postgres::{
        CollectionPgPool, count_to_u64, fold_status_counts, run_blocking, violates_constraint,
    },
    domain::{Choice, StatusCounts, parse_choice},
    ports::{CollectionRepository, RepositoryError, RepositoryResult},
};
use crate::user::domain::{
    EmailAddress, PersistedUserData, User, UserChanges, UserFilter, UserId, UserStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const EMAIL_UNIQUE_INDEX: &str = "idx_users_email_unique";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: CollectionPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CollectionPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository<User> for PostgresUserRepository {
    async fn insert(&self, user: &User) -> RepositoryResult<()> {
        let user_id = user.id();
        let new_row = to_new_row(user);
        let email = new_row.email.clone();

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if violates_constraint(info.as_ref(), EMAIL_UNIQUE_INDEX) =>
                    {
                        RepositoryError::DuplicateKey {
                            field: "email",
                            value: email,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateId(user_id.to_string())
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_all(&self, filter: &UserFilter) -> RepositoryResult<Vec<User>> {
        let filter = filter.clone();
        run_blocking(&self.pool, move |connection| {
            let rows = filtered_users(&filter)
                .select(UserRow::as_select())
                .order((users::created_at.asc(), users::id.asc()))
                .load::<UserRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> RepositoryResult<User> {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, RepositoryError, _>(|tx_conn| {
                let row = users::table
                    .filter(users::id.eq(id.into_inner()))
                    .select(UserRow::as_select())
                    .for_update()
                    .first::<UserRow>(tx_conn)
                    .optional()?
                    .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

                let mut user = row_to_user(row)?;
                user.apply(changes, now);
                write_user(tx_conn, to_new_row(&user))?;
                Ok(user)
            })
        })
        .await
    }

    async fn delete(&self, id: UserId) -> RepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn count_where(&self, filter: &UserFilter) -> RepositoryResult<u64> {
        let filter = filter.clone();
        run_blocking(&self.pool, move |connection| {
            let count = filtered_users(&filter)
                .count()
                .get_result::<i64>(connection)
                .map_err(RepositoryError::persistence)?;
            count_to_u64(count)
        })
        .await
    }

    async fn status_counts(&self) -> RepositoryResult<StatusCounts<UserStatus>> {
        run_blocking(&self.pool, move |connection| {
            let rows = users::table
                .group_by(users::status)
                .select((users::status, count_star()))
                .load::<(String, i64)>(connection)
                .map_err(RepositoryError::persistence)?;
            fold_status_counts(rows)
        })
        .await
    }
}

/// Overwrites the mutable columns of a locked user row.
///
/// A unique violation on the email index means another user took the
/// address; the caller's transaction rolls back.
fn write_user(connection: &mut PgConnection, row: NewUserRow) -> RepositoryResult<()> {
    let NewUserRow {
        id,
        name,
        email,
        avatar,
        status,
        role,
        updated_at,
        ..
    } = row;

    diesel::update(users::table.filter(users::id.eq(id)))
        .set((
            users::name.eq(name),
            users::email.eq(&email),
            users::avatar.eq(avatar),
            users::status.eq(status),
            users::role.eq(role),
            users::updated_at.eq(updated_at),
        ))
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if violates_constraint(info.as_ref(), EMAIL_UNIQUE_INDEX) =>
            {
                RepositoryError::DuplicateKey {
                    field: "email",
                    value: email.clone(),
                }
            }
            _ => RepositoryError::persistence(err),
        })?;
    Ok(())
}

fn filtered_users(filter: &UserFilter) -> users::BoxedQuery<'_, Pg> {
    let mut query = users::table.into_boxed();
    if let Some(status) = filter.status() {
        query = query.filter(users::status.eq(status.as_str()));
    }
    query
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        name: user.name().to_owned(),
        email: user.email().as_str().to_owned(),
        avatar: user.avatar().map(str::to_owned),
        status: user.status().as_str().to_owned(),
        role: user.role().to_owned(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> RepositoryResult<User> {
    let UserRow {
        id,
        name,
        email,
        avatar,
        status,
        role,
        created_at,
        updated_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        name,
        email: EmailAddress::new(email).map_err(RepositoryError::invalid_persisted_data)?,
        avatar,
        status: parse_choice("status", &status).map_err(RepositoryError::invalid_persisted_data)?,
        role,
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}
