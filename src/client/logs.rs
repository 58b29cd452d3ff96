use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{ErrorLog, SystemCheck};

impl ApiClient {
    pub async fn error_logs(&self) -> ClientResult<Vec<ErrorLog>> {
        self.fetch(Method::GET, "/api/error-logs").await
    }

    pub async fn system_check(&self) -> ClientResult<SystemCheck> {
        self.fetch(Method::GET, "/api/ia-test").await
    }
}
