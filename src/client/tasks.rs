use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

#[derive(Debug, Serialize)]
struct PositionRequest {
    position: i64,
}

impl ApiClient {
    pub async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        self.fetch(Method::GET, "/api/tasks").await
    }

    pub async fn get_task(&self, id: i64) -> ClientResult<Task> {
        self.fetch(Method::GET, &format!("/api/tasks/{id}")).await
    }

    pub async fn create_task(&self, payload: &CreateTaskRequest) -> ClientResult<Task> {
        self.send(Method::POST, "/api/tasks", payload).await
    }

    pub async fn update_task(&self, id: i64, payload: &UpdateTaskRequest) -> ClientResult<Task> {
        self.send(Method::PUT, &format!("/api/tasks/{id}"), payload)
            .await
    }

    pub async fn delete_task(&self, id: i64) -> ClientResult<()> {
        self.run(Method::DELETE, &format!("/api/tasks/{id}")).await
    }

    pub async fn toggle_task_completion(&self, id: i64) -> ClientResult<Task> {
        self.fetch(Method::PATCH, &format!("/api/tasks/{id}/toggle-completion"))
            .await
    }

    pub async fn set_task_position(&self, id: i64, position: i64) -> ClientResult<Task> {
        self.send(
            Method::PATCH,
            &format!("/api/tasks/{id}/position"),
            &PositionRequest { position },
        )
        .await
    }

    pub async fn project_tasks(&self, project_id: i64) -> ClientResult<Vec<Task>> {
        self.fetch(Method::GET, &format!("/api/tasks/project/{project_id}"))
            .await
    }
}
