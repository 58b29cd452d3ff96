use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateUserRequest, Task, UpdateUserRequest, User};

impl ApiClient {
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.fetch(Method::GET, "/api/users").await
    }

    pub async fn get_user(&self, id: i64) -> ClientResult<User> {
        self.fetch(Method::GET, &format!("/api/users/{id}")).await
    }

    pub async fn create_user(&self, payload: &CreateUserRequest) -> ClientResult<User> {
        self.send(Method::POST, "/api/users", payload).await
    }

    pub async fn update_user(&self, id: i64, payload: &UpdateUserRequest) -> ClientResult<User> {
        self.send(Method::PUT, &format!("/api/users/{id}"), payload)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.run(Method::DELETE, &format!("/api/users/{id}")).await
    }

    /// Resolves a nickname against the user list. Nickname login is the
    /// password-less identification path; matching is case-insensitive.
    pub async fn user_by_nickname(&self, nickname: &str) -> ClientResult<Option<User>> {
        let users = self.list_users().await?;
        Ok(users.into_iter().find(|user| {
            user.nickname
                .as_deref()
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(nickname))
        }))
    }

    /// The backend answers 404 when the user has no pending task; that is a
    /// normal outcome, not an error.
    pub async fn next_task_for_nickname(&self, nickname: &str) -> ClientResult<Option<Task>> {
        let path = format!("/api/users/nickname/{nickname}/next-task");
        match self.fetch(Method::GET, &path).await {
            Ok(task) => Ok(Some(task)),
            Err(error) if error.status() == Some(404) => Ok(None),
            Err(error) => Err(error),
        }
    }
}
