use std::time::Duration;

use anyhow::Context;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;
use crate::config::Config;
use crate::models::ErrorLog;
use crate::output;

/// Runs the two polling viewers until ctrl-c: backend error logs on the
/// 5-minute cadence and the diagnostic check on the 3-minute one. A failed
/// poll logs a warning and leaves previously printed data stale until the
/// next tick; there is no retry or backoff beyond the interval itself.
pub async fn run(client: ApiClient, config: &Config) -> anyhow::Result<()> {
    let error_logs = tokio::spawn(poll_error_logs(
        client.clone(),
        Duration::from_secs(config.error_log_poll_secs),
    ));
    let system_check = tokio::spawn(poll_system_check(
        client,
        Duration::from_secs(config.system_check_poll_secs),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for ctrl-c")?;
    tracing::info!("stopping watch loops");
    error_logs.abort();
    system_check.abort();

    Ok(())
}

async fn poll_error_logs(client: ApiClient, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_seen_id: Option<i64> = None;

    loop {
        interval.tick().await;

        let logs = match client.error_logs().await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(error = %error, "error log poll failed, keeping previous data");
                continue;
            }
        };

        let fresh = fresh_logs(&logs, last_seen_id);
        last_seen_id = advance_cursor(&logs, last_seen_id);

        if fresh.is_empty() {
            tracing::debug!("no new error logs");
            continue;
        }

        for log in fresh {
            println!(
                "{} [{}] {}",
                output::format_timestamp(log.created_at),
                log.source.as_deref().unwrap_or("backend"),
                log.message
            );
        }
    }
}

async fn poll_system_check(client: ApiClient, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match client.system_check().await {
            Ok(check) => {
                let detail = check
                    .message
                    .map(|message| format!(" ({message})"))
                    .unwrap_or_default();
                println!("system check: {}{detail}", check.status);
            }
            Err(error) => {
                tracing::warn!(error = %error, "system check poll failed, keeping previous data");
            }
        }
    }
}

/// Entries not yet printed. The first poll prints everything the backend
/// returns, later polls only ids above the cursor.
fn fresh_logs(logs: &[ErrorLog], last_seen_id: Option<i64>) -> Vec<&ErrorLog> {
    logs.iter()
        .filter(|log| last_seen_id.is_none_or(|seen| log.id > seen))
        .collect()
}

fn advance_cursor(logs: &[ErrorLog], last_seen_id: Option<i64>) -> Option<i64> {
    let newest = logs.iter().map(|log| log.id).max();
    match (last_seen_id, newest) {
        (Some(seen), Some(newest)) => Some(seen.max(newest)),
        (None, Some(newest)) => Some(newest),
        (seen, None) => seen,
    }
}

#[cfg(test)]
mod tests {
    use super::{advance_cursor, fresh_logs};
    use crate::models::ErrorLog;

    fn log(id: i64) -> ErrorLog {
        ErrorLog {
            id,
            source: None,
            message: format!("failure {id}"),
            stack_trace: None,
            created_at: None,
        }
    }

    #[test]
    fn first_poll_reports_everything() {
        let logs = vec![log(1), log(2)];
        let fresh = fresh_logs(&logs, None);
        assert_eq!(fresh.len(), 2);
        assert_eq!(advance_cursor(&logs, None), Some(2));
    }

    #[test]
    fn later_polls_only_report_new_entries() {
        let logs = vec![log(1), log(2), log(3)];
        let fresh = fresh_logs(&logs, Some(2));
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, 3);
        assert_eq!(advance_cursor(&logs, Some(2)), Some(3));
    }

    #[test]
    fn empty_poll_keeps_the_cursor() {
        let logs: Vec<ErrorLog> = Vec::new();
        assert!(fresh_logs(&logs, Some(5)).is_empty());
        assert_eq!(advance_cursor(&logs, Some(5)), Some(5));
    }

    #[test]
    fn cursor_never_moves_backwards() {
        let logs = vec![log(3)];
        assert_eq!(advance_cursor(&logs, Some(7)), Some(7));
        assert!(fresh_logs(&logs, Some(7)).is_empty());
    }
}
