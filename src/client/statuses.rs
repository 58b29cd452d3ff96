use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateStatusRequest, Status, UpdateStatusRequest};

impl ApiClient {
    pub async fn list_statuses(&self) -> ClientResult<Vec<Status>> {
        self.fetch(Method::GET, "/api/statuses").await
    }

    pub async fn create_status(&self, payload: &CreateStatusRequest) -> ClientResult<Status> {
        self.send(Method::POST, "/api/statuses", payload).await
    }

    pub async fn update_status(
        &self,
        id: i64,
        payload: &UpdateStatusRequest,
    ) -> ClientResult<Status> {
        self.send(Method::PUT, &format!("/api/statuses/{id}"), payload)
            .await
    }

    pub async fn delete_status(&self, id: i64) -> ClientResult<()> {
        self.run(Method::DELETE, &format!("/api/statuses/{id}")).await
    }
}
