use chrono::Utc;
use clap::Subcommand;

use crate::client::ApiClient;
use crate::models::Task;
use crate::output;
use crate::recurrence::{classify_task, schedule_description};

#[derive(Debug, Subcommand)]
pub enum RecurrenceCommand {
    /// Recurring tasks currently due, with their traffic-light state.
    Due,

    /// Ask the backend to execute one recurring task now.
    Execute { id: i64 },

    /// Ask the backend to execute every due recurring task.
    ExecuteAll,

    /// When the backend will run the task next.
    NextExecution { id: i64 },
}

pub async fn run(command: RecurrenceCommand, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        RecurrenceCommand::Due => {
            let tasks = client.due_recurring_tasks().await?;
            print_due_table(&tasks);
        }
        RecurrenceCommand::Execute { id } => {
            let task = client.execute_recurring_task(id).await?;
            println!(
                "executed task {} ({}), next execution {}",
                task.id,
                task.title,
                output::format_timestamp(task.next_execution_at)
            );
        }
        RecurrenceCommand::ExecuteAll => {
            let tasks = client.execute_all_recurring_tasks().await?;
            if tasks.is_empty() {
                println!("nothing was due");
            } else {
                println!("executed {} task(s):", tasks.len());
                for task in &tasks {
                    println!("  {} ({})", task.title, task.id);
                }
            }
        }
        RecurrenceCommand::NextExecution { id } => {
            let next = client.next_execution(id).await?;
            println!("{}", output::format_timestamp(next.next_execution_at));
        }
    }

    Ok(())
}

fn print_due_table(tasks: &[Task]) {
    let now = Utc::now();
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            let status = classify_task(task, now);
            vec![
                task.id.to_string(),
                task.title.clone(),
                schedule_description(task),
                output::format_timestamp(task.next_execution_at),
                status.map(|s| s.label().to_string()).unwrap_or_else(|| "-".to_string()),
                status
                    .map(|s| s.traffic_light().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    output::print_table(
        &["id", "title", "schedule", "next execution", "state", "light"],
        &rows,
    );
}
