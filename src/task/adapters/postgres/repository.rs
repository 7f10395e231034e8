//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::collection::{
    adapters::postgres::{CollectionPgPool, count_to_u64, fold_status_counts, run_blocking},
    domain::{Choice, StatusCounts, parse_choice},
    ports::{CollectionRepository, RepositoryError, RepositoryResult},
};
use crate::task::domain::{
    PersistedTaskData, Task, TaskChanges, TaskFilter, TaskId, TaskStatus, UserRef,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: CollectionPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CollectionPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository<Task> for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateId(task_id.to_string())
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_all(&self, filter: &TaskFilter) -> RepositoryResult<Vec<Task>> {
        let filter = filter.clone();
        run_blocking(&self.pool, move |connection| {
            let rows = filtered_tasks(&filter)
                .select(TaskRow::as_select())
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        changes: TaskChanges,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Task> {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, RepositoryError, _>(|tx_conn| {
                let row = tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(tx_conn)
                    .optional()?
                    .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

                let mut task = row_to_task(row)?;
                task.apply(changes, now);
                write_task(tx_conn, &to_new_row(&task))?;
                Ok(task)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn count_where(&self, filter: &TaskFilter) -> RepositoryResult<u64> {
        let filter = filter.clone();
        run_blocking(&self.pool, move |connection| {
            let count = filtered_tasks(&filter)
                .count()
                .get_result::<i64>(connection)
                .map_err(RepositoryError::persistence)?;
            count_to_u64(count)
        })
        .await
    }

    async fn status_counts(&self) -> RepositoryResult<StatusCounts<TaskStatus>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .group_by(tasks::status)
                .select((tasks::status, count_star()))
                .load::<(String, i64)>(connection)
                .map_err(RepositoryError::persistence)?;
            fold_status_counts(rows)
        })
        .await
    }
}

/// Overwrites the mutable columns of a locked task row.
fn write_task(connection: &mut PgConnection, row: &NewTaskRow) -> RepositoryResult<()> {
    diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
        .set((
            tasks::title.eq(&row.title),
            tasks::description.eq(&row.description),
            tasks::status.eq(&row.status),
            tasks::priority.eq(&row.priority),
            tasks::user_id.eq(&row.user_id),
            tasks::updated_at.eq(row.updated_at),
        ))
        .execute(connection)
        .map_err(RepositoryError::persistence)?;
    Ok(())
}

/// Builds a boxed query applying every populated filter criterion.
fn filtered_tasks(filter: &TaskFilter) -> tasks::BoxedQuery<'_, Pg> {
    let mut query = tasks::table.into_boxed();
    if let Some(user_id) = filter.user_id() {
        query = query.filter(tasks::user_id.eq(user_id.as_str()));
    }
    if let Some(status) = filter.status() {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    query
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        user_id: task.user_id().map(|user_id| user_id.as_str().to_owned()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        priority,
        user_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status: parse_choice("status", &status).map_err(RepositoryError::invalid_persisted_data)?,
        priority: parse_choice("priority", &priority)
            .map_err(RepositoryError::invalid_persisted_data)?,
        user_id: user_id.map(UserRef::new),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
