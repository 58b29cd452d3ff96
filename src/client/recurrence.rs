use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{NextExecution, Task};

/// Recurrence execution belongs to the backend; these calls inspect or
/// trigger it, nothing runs client-side.
impl ApiClient {
    pub async fn due_recurring_tasks(&self) -> ClientResult<Vec<Task>> {
        self.fetch(Method::GET, "/api/recurrence/due").await
    }

    pub async fn execute_recurring_task(&self, id: i64) -> ClientResult<Task> {
        self.fetch(Method::POST, &format!("/api/recurrence/{id}/execute"))
            .await
    }

    pub async fn execute_all_recurring_tasks(&self) -> ClientResult<Vec<Task>> {
        self.fetch(Method::POST, "/api/recurrence/execute-all").await
    }

    pub async fn next_execution(&self, id: i64) -> ClientResult<NextExecution> {
        self.fetch(Method::GET, &format!("/api/recurrence/{id}/next-execution"))
            .await
    }
}
