//! Operational entry point for workboard deployments.
//!
//! Usage:
//!
//! ```text
//! workboard_admin <command>
//! ```
//!
//! `command` is one of:
//!
//! - `migrate`: apply the schema migrations to the configured database.
//! - `task-stats`: print task statistics as JSON.
//! - `user-stats`: print user statistics as JSON.
//!
//! Settings come from `WORKBOARD_*` environment variables; see
//! [`workboard::config::ServiceSettings`].

use mockable::DefaultClock;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use workboard::collection::adapters::postgres::{CollectionPgPool, build_pool, migrate};
use workboard::config::ServiceSettings;
use workboard::task::{adapters::postgres::PostgresTaskRepository, services::TaskService};
use workboard::telemetry::init_tracing;
use workboard::user::{adapters::postgres::PostgresUserRepository, services::UserService};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum AdminError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Migrate,
    TaskStats,
    UserStats,
}

impl Command {
    fn parse(arg: &str) -> Result<Self, AdminError> {
        match arg {
            "migrate" => Ok(Self::Migrate),
            "task-stats" => Ok(Self::TaskStats),
            "user-stats" => Ok(Self::UserStats),
            other => Err(AdminError::InvalidArgs(format!(
                "unknown command '{other}'; expected migrate, task-stats, or user-stats"
            ))),
        }
    }
}

fn main() -> Result<(), BoxError> {
    let command = parse_args(std::env::args().skip(1))?;
    let settings = ServiceSettings::from_env()?;
    init_tracing(settings.log_filter())?;

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AdminError::RuntimeInit)?;
    runtime.block_on(run(command, &settings))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, AdminError> {
    let command = args
        .next()
        .ok_or_else(|| AdminError::InvalidArgs("missing command".to_owned()))?;
    if let Some(extra) = args.next() {
        return Err(AdminError::InvalidArgs(format!(
            "unexpected argument '{extra}'"
        )));
    }
    Command::parse(&command)
}

async fn run(command: Command, settings: &ServiceSettings) -> Result<(), BoxError> {
    let pool = build_pool(settings.database_url(), settings.pool_max_size())?;
    match command {
        Command::Migrate => {
            migrate(&pool).await?;
            tracing::info!("migrations applied");
            Ok(())
        }
        Command::TaskStats => print_json(&task_stats(pool).await?),
        Command::UserStats => print_json(&user_stats(pool).await?),
    }
}

async fn task_stats(pool: CollectionPgPool) -> Result<workboard::task::domain::TaskStats, BoxError> {
    let service = TaskService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    Ok(service.get_stats().await?)
}

async fn user_stats(pool: CollectionPgPool) -> Result<workboard::user::domain::UserStats, BoxError> {
    let service = UserService::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    Ok(service.get_stats().await?)
}

fn print_json(value: &impl Serialize) -> Result<(), BoxError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
