use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest};

impl ApiClient {
    pub async fn list_projects(&self) -> ClientResult<Vec<Project>> {
        self.fetch(Method::GET, "/api/projects").await
    }

    pub async fn get_project(&self, id: i64) -> ClientResult<Project> {
        self.fetch(Method::GET, &format!("/api/projects/{id}")).await
    }

    pub async fn create_project(&self, payload: &CreateProjectRequest) -> ClientResult<Project> {
        self.send(Method::POST, "/api/projects", payload).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        payload: &UpdateProjectRequest,
    ) -> ClientResult<Project> {
        self.send(Method::PUT, &format!("/api/projects/{id}"), payload)
            .await
    }

    pub async fn delete_project(&self, id: i64) -> ClientResult<()> {
        self.run(Method::DELETE, &format!("/api/projects/{id}")).await
    }
}
