use clap::Subcommand;

use crate::client::ApiClient;
use crate::config::Config;
use crate::output;
use crate::watch;

#[derive(Debug, Subcommand)]
pub enum LogsCommand {
    /// List backend error logs.
    Errors,

    /// Run the backend diagnostic check once.
    Check,

    /// Keep polling error logs and the diagnostic check until ctrl-c.
    Watch,
}

pub async fn run(command: LogsCommand, client: &ApiClient, config: &Config) -> anyhow::Result<()> {
    match command {
        LogsCommand::Errors => {
            let logs = client.error_logs().await?;
            let rows: Vec<Vec<String>> = logs
                .iter()
                .map(|log| {
                    vec![
                        log.id.to_string(),
                        output::format_timestamp(log.created_at),
                        log.source.clone().unwrap_or_else(|| "backend".to_string()),
                        log.message.clone(),
                    ]
                })
                .collect();
            output::print_table(&["id", "when", "source", "message"], &rows);
        }
        LogsCommand::Check => {
            let check = client.system_check().await?;
            match check.message {
                Some(message) => println!("{}: {message}", check.status),
                None => println!("{}", check.status),
            }
        }
        LogsCommand::Watch => {
            watch::run(client.clone(), config).await?;
        }
    }

    Ok(())
}
