use std::sync::OnceLock;

use clap::Subcommand;
use regex::Regex;

use crate::client::ApiClient;
use crate::commands::{require_non_empty, require_some_field};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    CreatePriorityRequest, CreateStatusRequest, UpdatePriorityRequest, UpdateStatusRequest,
};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum StatusCommand {
    /// List board statuses in their configured order.
    List,

    Create {
        #[arg(long)]
        name: String,
        /// Hex color, e.g. #4BB47B.
        #[arg(long)]
        color: String,
        /// Tasks in a final-state status count as done columns.
        #[arg(long = "final")]
        is_final: bool,
        #[arg(long)]
        order: Option<i64>,
    },

    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long = "final")]
        is_final: Option<bool>,
        #[arg(long)]
        order: Option<i64>,
    },

    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum PriorityCommand {
    /// List priorities by weight.
    List,

    Create {
        #[arg(long)]
        name: String,
        /// Ordinal weight; higher sorts first.
        #[arg(long)]
        weight: i64,
    },

    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        weight: Option<i64>,
    },

    Delete { id: i64 },
}

pub async fn run_status(command: StatusCommand, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        StatusCommand::List => {
            let mut statuses = client.list_statuses().await?;
            statuses.sort_by_key(|status| status.order);

            let rows: Vec<Vec<String>> = statuses
                .iter()
                .map(|status| {
                    vec![
                        status.id.to_string(),
                        status.name.clone(),
                        status.color_code.clone(),
                        output::yes_no(status.is_final_state).to_string(),
                        status.order.to_string(),
                    ]
                })
                .collect();
            output::print_table(&["id", "name", "color", "final", "order"], &rows);
        }
        StatusCommand::Create {
            name,
            color,
            is_final,
            order,
        } => {
            require_non_empty("name", &name)?;
            validate_color_code(&color)?;

            let status = client
                .create_status(&CreateStatusRequest {
                    name,
                    color_code: color,
                    is_final_state: Some(is_final),
                    order,
                })
                .await?;
            println!("created status {} ({})", status.id, status.name);
        }
        StatusCommand::Update {
            id,
            name,
            color,
            is_final,
            order,
        } => {
            require_some_field(
                name.is_some() || color.is_some() || is_final.is_some() || order.is_some(),
            )?;
            if let Some(color) = color.as_deref() {
                validate_color_code(color)?;
            }

            let status = client
                .update_status(
                    id,
                    &UpdateStatusRequest {
                        name,
                        color_code: color,
                        is_final_state: is_final,
                        order,
                    },
                )
                .await?;
            println!("updated status {} ({})", status.id, status.name);
        }
        StatusCommand::Delete { id } => {
            client.delete_status(id).await?;
            println!("deleted status {id}");
        }
    }

    Ok(())
}

pub async fn run_priority(command: PriorityCommand, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        PriorityCommand::List => {
            let mut priorities = client.list_priorities().await?;
            priorities.sort_by_key(|priority| std::cmp::Reverse(priority.weight));

            let rows: Vec<Vec<String>> = priorities
                .iter()
                .map(|priority| {
                    vec![
                        priority.id.to_string(),
                        priority.name.clone(),
                        priority.weight.to_string(),
                    ]
                })
                .collect();
            output::print_table(&["id", "name", "weight"], &rows);
        }
        PriorityCommand::Create { name, weight } => {
            require_non_empty("name", &name)?;
            let priority = client
                .create_priority(&CreatePriorityRequest { name, weight })
                .await?;
            println!("created priority {} ({})", priority.id, priority.name);
        }
        PriorityCommand::Update { id, name, weight } => {
            require_some_field(name.is_some() || weight.is_some())?;
            let priority = client
                .update_priority(id, &UpdatePriorityRequest { name, weight })
                .await?;
            println!("updated priority {} ({})", priority.id, priority.name);
        }
        PriorityCommand::Delete { id } => {
            client.delete_priority(id).await?;
            println!("deleted priority {id}");
        }
    }

    Ok(())
}

fn validate_color_code(value: &str) -> ClientResult<()> {
    static COLOR_FORMAT: OnceLock<Regex> = OnceLock::new();
    let pattern = COLOR_FORMAT.get_or_init(|| {
        Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern should compile")
    });

    if !pattern.is_match(value) {
        return Err(ClientError::InvalidInput(format!(
            "color '{value}' must be a hex code like #4BB47B"
        )));
    }
    Ok(())
}
