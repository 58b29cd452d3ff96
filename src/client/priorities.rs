use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreatePriorityRequest, Priority, UpdatePriorityRequest};

impl ApiClient {
    pub async fn list_priorities(&self) -> ClientResult<Vec<Priority>> {
        self.fetch(Method::GET, "/api/priorities").await
    }

    pub async fn create_priority(&self, payload: &CreatePriorityRequest) -> ClientResult<Priority> {
        self.send(Method::POST, "/api/priorities", payload).await
    }

    pub async fn update_priority(
        &self,
        id: i64,
        payload: &UpdatePriorityRequest,
    ) -> ClientResult<Priority> {
        self.send(Method::PUT, &format!("/api/priorities/{id}"), payload)
            .await
    }

    pub async fn delete_priority(&self, id: i64) -> ClientResult<()> {
        self.run(Method::DELETE, &format!("/api/priorities/{id}"))
            .await
    }
}
