use std::collections::HashMap;

use clap::Subcommand;

use crate::client::ApiClient;
use crate::commands::{require_non_empty, require_some_field};
use crate::error::{ClientError, ClientResult};
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest};
use crate::output;

/// Project descriptions shorter than this were rejected by the web forms.
const MIN_DESCRIPTION_LEN: usize = 10;

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List all projects.
    List,

    /// Show one project.
    Get { id: i64 },

    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Free-form working agreements shown on the project page.
        #[arg(long)]
        rules: Option<String>,
    },

    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        rules: Option<String>,
        /// Activate or deactivate the project.
        #[arg(long)]
        active: Option<bool>,
    },

    Delete { id: i64 },

    /// Completion statistics computed from the project's tasks.
    Stats { id: i64 },
}

pub async fn run(command: ProjectCommand, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        ProjectCommand::List => {
            let projects = client.list_projects().await?;
            print_project_table(&projects);
        }
        ProjectCommand::Get { id } => {
            let project = client.get_project(id).await?;
            print_project(&project);
        }
        ProjectCommand::Create {
            name,
            description,
            rules,
        } => {
            validate_project_input(&name, &description)?;
            let project = client
                .create_project(&CreateProjectRequest {
                    name,
                    description,
                    rules,
                })
                .await?;
            println!("created project {} ({})", project.id, project.name);
        }
        ProjectCommand::Update {
            id,
            name,
            description,
            rules,
            active,
        } => {
            require_some_field(
                name.is_some() || description.is_some() || rules.is_some() || active.is_some(),
            )?;
            if let Some(name) = name.as_deref() {
                require_non_empty("name", name)?;
            }
            if let Some(description) = description.as_deref() {
                validate_description(description)?;
            }

            let project = client
                .update_project(
                    id,
                    &UpdateProjectRequest {
                        name,
                        description,
                        rules,
                        status: active,
                    },
                )
                .await?;
            println!("updated project {} ({})", project.id, project.name);
        }
        ProjectCommand::Delete { id } => {
            client.delete_project(id).await?;
            println!("deleted project {id}");
        }
        ProjectCommand::Stats { id } => {
            print_project_stats(client, id).await?;
        }
    }

    Ok(())
}

fn validate_project_input(name: &str, description: &str) -> ClientResult<()> {
    require_non_empty("name", name)?;
    validate_description(description)
}

fn validate_description(description: &str) -> ClientResult<()> {
    if description.trim().len() < MIN_DESCRIPTION_LEN {
        return Err(ClientError::InvalidInput(format!(
            "description must be at least {MIN_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

fn print_project_table(projects: &[Project]) {
    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|project| {
            vec![
                project.id.to_string(),
                project.name.clone(),
                output::yes_no(project.status).to_string(),
                output::format_timestamp(project.updated_at),
            ]
        })
        .collect();
    output::print_table(&["id", "name", "active", "updated"], &rows);
}

fn print_project(project: &Project) {
    println!("project {}: {}", project.id, project.name);
    println!("  description: {}", project.description);
    if let Some(rules) = project.rules.as_deref() {
        println!("  rules: {rules}");
    }
    println!("  active: {}", output::yes_no(project.status));
    println!("  created by: {}", project.created_by_id);
    println!("  created: {}", output::format_timestamp(project.created_at));
    println!("  updated: {}", output::format_timestamp(project.updated_at));
}

async fn print_project_stats(client: &ApiClient, id: i64) -> anyhow::Result<()> {
    let project = client.get_project(id).await?;
    let tasks = client.project_tasks(id).await?;
    let statuses = client.list_statuses().await?;

    let completed = tasks.iter().filter(|task| task.is_completed).count();
    let total = tasks.len();

    println!("project {}: {}", project.id, project.name);
    println!(
        "  {} of {} tasks completed ({}%)",
        completed,
        total,
        output::completion_percentage(completed, total)
    );

    let status_names: HashMap<i64, &str> = statuses
        .iter()
        .map(|status| (status.id, status.name.as_str()))
        .collect();
    let mut per_status: HashMap<i64, usize> = HashMap::new();
    for task in &tasks {
        *per_status.entry(task.status_id).or_default() += 1;
    }

    let mut breakdown: Vec<(i64, usize)> = per_status.into_iter().collect();
    breakdown.sort_by_key(|(status_id, _)| *status_id);
    for (status_id, count) in breakdown {
        let name = status_names
            .get(&status_id)
            .copied()
            .unwrap_or("unknown status");
        println!("  {name}: {count}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_description, validate_project_input};

    #[test]
    fn short_descriptions_are_rejected() {
        assert!(validate_description("too short").is_err());
        assert!(validate_description("long enough description").is_ok());
    }

    #[test]
    fn whitespace_padding_does_not_satisfy_the_minimum() {
        assert!(validate_description("a        \t\t\t        ").is_err());
    }

    #[test]
    fn project_input_requires_name_and_description() {
        assert!(validate_project_input("", "long enough description").is_err());
        assert!(validate_project_input("Board", "long enough description").is_ok());
    }
}
