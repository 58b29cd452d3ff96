use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateCommentRequest, TaskComment, UpdateCommentRequest};

impl ApiClient {
    pub async fn list_task_comments(&self, task_id: i64) -> ClientResult<Vec<TaskComment>> {
        self.fetch(Method::GET, &format!("/api/comments?task_id={task_id}"))
            .await
    }

    pub async fn create_comment(&self, payload: &CreateCommentRequest) -> ClientResult<TaskComment> {
        self.send(Method::POST, "/api/comments", payload).await
    }

    pub async fn update_comment(
        &self,
        id: i64,
        payload: &UpdateCommentRequest,
    ) -> ClientResult<TaskComment> {
        self.send(Method::PUT, &format!("/api/comments/{id}"), payload)
            .await
    }

    pub async fn delete_comment(&self, id: i64) -> ClientResult<()> {
        self.run(Method::DELETE, &format!("/api/comments/{id}")).await
    }
}
