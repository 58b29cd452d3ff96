use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::client::ApiClient;
use crate::commands::{
    require_non_empty, require_some_field, validate_recurrence_days, validate_recurrence_times,
};
use crate::error::ClientResult;
use crate::models::{CreateTaskRequest, RecurrenceType, Task, UpdateTaskRequest};
use crate::output;
use crate::recurrence;

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List tasks, optionally narrowed by project, status, assignee or state.
    List {
        /// Restrict to one project (uses the per-project endpoint).
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        status: Option<i64>,
        #[arg(long)]
        assignee: Option<i64>,
        /// Only tasks not yet completed.
        #[arg(long)]
        pending: bool,
    },

    /// Show one task, including its recurrence schedule.
    Get { id: i64 },

    Create {
        #[arg(long)]
        project: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Parent task id, for subtasks.
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long)]
        status: Option<i64>,
        #[arg(long)]
        priority: Option<i64>,
        #[arg(long)]
        assignee: Option<i64>,
        /// RFC 3339 timestamp, e.g. 2026-09-01T12:00:00Z.
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
        /// daily, weekly or monthly; makes the task recurring.
        #[arg(long)]
        recurrence: Option<RecurrenceType>,
        /// Execution time in HH:MM, repeatable.
        #[arg(long = "time")]
        times: Vec<String>,
        /// Weekday ordinal 0 (Sunday) to 6 (Saturday), repeatable.
        #[arg(long = "day")]
        days: Vec<u8>,
    },

    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<i64>,
        #[arg(long)]
        priority: Option<i64>,
        #[arg(long)]
        assignee: Option<i64>,
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
        #[arg(long)]
        recurrence: Option<RecurrenceType>,
        #[arg(long = "time")]
        times: Vec<String>,
        #[arg(long = "day")]
        days: Vec<u8>,
    },

    Delete { id: i64 },

    /// Flip the task between completed and pending.
    Toggle { id: i64 },

    /// Move the task to a new position within its listing.
    Move { id: i64, position: i64 },
}

pub async fn run(command: TaskCommand, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        TaskCommand::List {
            project,
            status,
            assignee,
            pending,
        } => {
            let tasks = match project {
                Some(project_id) => client.project_tasks(project_id).await?,
                None => client.list_tasks().await?,
            };

            let filtered: Vec<&Task> = tasks
                .iter()
                .filter(|task| status.is_none_or(|wanted| task.status_id == wanted))
                .filter(|task| assignee.is_none_or(|wanted| task.assigned_to_id == Some(wanted)))
                .filter(|task| !pending || !task.is_completed)
                .collect();

            print_task_table(&filtered);
        }
        TaskCommand::Get { id } => {
            let task = client.get_task(id).await?;
            print_task(&task);
        }
        TaskCommand::Create {
            project,
            title,
            description,
            parent,
            status,
            priority,
            assignee,
            deadline,
            recurrence,
            times,
            days,
        } => {
            require_non_empty("title", &title)?;
            validate_recurrence_input(recurrence, &times, &days)?;

            let payload = CreateTaskRequest {
                project_id: project,
                title,
                description,
                parent_task_id: parent,
                status_id: status,
                priority_id: priority,
                assigned_to_id: assignee,
                deadline,
                is_recurring: recurrence.map(|_| true),
                recurrence_type: recurrence,
                recurrence_times: non_empty(times),
                recurrence_days: non_empty(days),
            };

            let task = client.create_task(&payload).await?;
            println!("created task {} ({})", task.id, task.title);
        }
        TaskCommand::Update {
            id,
            title,
            description,
            status,
            priority,
            assignee,
            deadline,
            recurrence,
            times,
            days,
        } => {
            require_some_field(
                title.is_some()
                    || description.is_some()
                    || status.is_some()
                    || priority.is_some()
                    || assignee.is_some()
                    || deadline.is_some()
                    || recurrence.is_some()
                    || !times.is_empty()
                    || !days.is_empty(),
            )?;
            if let Some(title) = title.as_deref() {
                require_non_empty("title", title)?;
            }
            validate_recurrence_input(recurrence, &times, &days)?;

            let payload = UpdateTaskRequest {
                title,
                description,
                status_id: status,
                priority_id: priority,
                assigned_to_id: assignee,
                deadline,
                is_recurring: recurrence.map(|_| true),
                recurrence_type: recurrence,
                recurrence_times: non_empty(times),
                recurrence_days: non_empty(days),
            };

            let task = client.update_task(id, &payload).await?;
            println!("updated task {} ({})", task.id, task.title);
        }
        TaskCommand::Delete { id } => {
            client.delete_task(id).await?;
            println!("deleted task {id}");
        }
        TaskCommand::Toggle { id } => {
            let task = client.toggle_task_completion(id).await?;
            let state = if task.is_completed { "completed" } else { "pending" };
            println!("task {} is now {state}", task.id);
        }
        TaskCommand::Move { id, position } => {
            let task = client.set_task_position(id, position).await?;
            println!("task {} moved to position {}", task.id, task.position);
        }
    }

    Ok(())
}

fn validate_recurrence_input(
    recurrence: Option<RecurrenceType>,
    times: &[String],
    days: &[u8],
) -> ClientResult<()> {
    validate_recurrence_times(times)?;
    validate_recurrence_days(days)?;

    if recurrence.is_none() && (!times.is_empty() || !days.is_empty()) {
        return Err(crate::error::ClientError::InvalidInput(
            "--time and --day require --recurrence".to_string(),
        ));
    }

    Ok(())
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn print_task_table(tasks: &[&Task]) {
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            vec![
                task.id.to_string(),
                task.title.clone(),
                task.project_id.to_string(),
                task.status_id.to_string(),
                output::format_optional(task.assigned_to_id),
                output::yes_no(task.is_completed).to_string(),
                output::format_timestamp(task.deadline),
            ]
        })
        .collect();
    output::print_table(
        &["id", "title", "project", "status", "assignee", "done", "deadline"],
        &rows,
    );
}

fn print_task(task: &Task) {
    println!("task {}: {}", task.id, task.title);
    if !task.description.is_empty() {
        println!("  description: {}", task.description);
    }
    println!("  project: {}", task.project_id);
    if let Some(parent) = task.parent_task_id {
        println!("  parent task: {parent}");
    }
    println!("  status: {}", task.status_id);
    println!("  priority: {}", task.priority_id);
    println!("  assignee: {}", output::format_optional(task.assigned_to_id));
    println!("  deadline: {}", output::format_timestamp(task.deadline));
    println!("  position: {}", task.position);
    println!("  completed: {}", output::yes_no(task.is_completed));
    println!("  recurrence: {}", recurrence::schedule_description(task));
    if task.is_recurring {
        println!(
            "  last executed: {}",
            output::format_timestamp(task.last_executed_at)
        );
        println!(
            "  next execution: {}",
            output::format_timestamp(task.next_execution_at)
        );
    }

    if !task.attachments.is_empty() {
        println!("  attachments:");
        for attachment in &task.attachments {
            println!("    {} ({})", attachment.file_name, attachment.id);
        }
    }
    if !task.dependencies.is_empty() {
        println!("  depends on:");
        for dependency in &task.dependencies {
            println!("    task {}", dependency.depends_on_task_id);
        }
    }
    if !task.history.is_empty() {
        println!("  history:");
        for entry in &task.history {
            println!(
                "    {} {} by user {}{}",
                output::format_timestamp(entry.created_at),
                entry.action,
                entry.user_id,
                entry
                    .detail
                    .as_deref()
                    .map(|detail| format!(" ({detail})"))
                    .unwrap_or_default()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{non_empty, validate_recurrence_input};
    use crate::models::RecurrenceType;

    #[test]
    fn times_and_days_require_a_recurrence_type() {
        let error = validate_recurrence_input(None, &["08:00".to_string()], &[])
            .expect_err("times without recurrence should be rejected");
        assert!(error.to_string().contains("--recurrence"));

        assert!(validate_recurrence_input(
            Some(RecurrenceType::Weekly),
            &["08:00".to_string()],
            &[0, 3],
        )
        .is_ok());
    }

    #[test]
    fn malformed_times_and_days_are_rejected() {
        assert!(
            validate_recurrence_input(Some(RecurrenceType::Daily), &["8am".to_string()], &[])
                .is_err()
        );
        assert!(validate_recurrence_input(Some(RecurrenceType::Weekly), &[], &[7]).is_err());
    }

    #[test]
    fn empty_flag_lists_collapse_to_none() {
        assert_eq!(non_empty(Vec::<u8>::new()), None);
        assert_eq!(non_empty(vec![1u8]), Some(vec![1u8]));
    }
}
