pub mod auth;
pub mod catalog;
pub mod comments;
pub mod logs;
pub mod projects;
pub mod recurrence;
pub mod tasks;
pub mod users;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

#[derive(Debug, Parser)]
#[command(name = "tarefas", version, about = "Terminal client for the Tarefas task board")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in, sign out and session management.
    #[command(subcommand)]
    Auth(auth::AuthCommand),

    /// Manage projects.
    #[command(subcommand)]
    Project(projects::ProjectCommand),

    /// Manage tasks.
    #[command(subcommand)]
    Task(tasks::TaskCommand),

    /// Manage board statuses.
    #[command(subcommand)]
    Status(catalog::StatusCommand),

    /// Manage task priorities.
    #[command(subcommand)]
    Priority(catalog::PriorityCommand),

    /// Manage users.
    #[command(subcommand)]
    User(users::UserCommand),

    /// Manage task comments.
    #[command(subcommand)]
    Comment(comments::CommentCommand),

    /// Inspect and trigger recurring tasks.
    #[command(subcommand)]
    Recurrence(recurrence::RecurrenceCommand),

    /// Backend error logs and diagnostics.
    #[command(subcommand)]
    Logs(logs::LogsCommand),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = SessionStore::new(cli.config.session_file.clone());
    let mut session = store
        .load()
        .with_context(|| format!("failed to load session file {}", store.path().display()))?;
    cli.config.log_startup_warnings(&session);

    let client = ApiClient::new(&cli.config, &session)?;

    match cli.command {
        Command::Auth(command) => auth::run(command, &client, &store, &mut session).await,
        Command::Project(command) => projects::run(command, &client).await,
        Command::Task(command) => tasks::run(command, &client).await,
        Command::Status(command) => catalog::run_status(command, &client).await,
        Command::Priority(command) => catalog::run_priority(command, &client).await,
        Command::User(command) => users::run(command, &client, &session).await,
        Command::Comment(command) => comments::run(command, &client).await,
        Command::Recurrence(command) => recurrence::run(command, &client).await,
        Command::Logs(command) => logs::run(command, &client, &cli.config).await,
    }
}

/// Shared input checks. The web client re-implemented these per component
/// with visible drift; here they live in one place.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_some_field(provided: bool) -> ClientResult<()> {
    if !provided {
        return Err(ClientError::InvalidInput(
            "at least one field must be provided".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_recurrence_times(times: &[String]) -> ClientResult<()> {
    for time in times {
        if !crate::recurrence::is_valid_time(time) {
            return Err(ClientError::InvalidInput(format!(
                "recurrence time '{time}' must use the HH:MM format"
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_recurrence_days(days: &[u8]) -> ClientResult<()> {
    for day in days {
        if *day > 6 {
            return Err(ClientError::InvalidInput(format!(
                "recurrence day {day} must be between 0 (Sunday) and 6 (Saturday)"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        require_non_empty, require_some_field, validate_recurrence_days, validate_recurrence_times,
    };

    #[test]
    fn blank_values_are_rejected() {
        assert!(require_non_empty("name", "board").is_ok());
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "").is_err());
    }

    #[test]
    fn updates_need_at_least_one_field() {
        assert!(require_some_field(true).is_ok());
        let error = require_some_field(false).expect_err("empty update should be rejected");
        assert!(error.to_string().contains("at least one field"));
    }

    #[test]
    fn recurrence_times_are_validated() {
        assert!(validate_recurrence_times(&["08:00".to_string(), "23:59".to_string()]).is_ok());
        assert!(validate_recurrence_times(&["8am".to_string()]).is_err());
    }

    #[test]
    fn recurrence_days_are_validated() {
        assert!(validate_recurrence_days(&[0, 3, 6]).is_ok());
        assert!(validate_recurrence_days(&[7]).is_err());
    }
}
