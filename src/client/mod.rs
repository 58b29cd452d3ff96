pub mod auth;
pub mod comments;
pub mod logs;
pub mod priorities;
pub mod projects;
pub mod recurrence;
pub mod statuses;
pub mod tasks;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::wire;

/// HTTP client for the Tarefas backend. Requests ride the session cookie
/// (the browser client's `credentials: include`); every request body is
/// converted to snake_case and every response body to camelCase before
/// typed deserialization.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config, session: &Session) -> ClientResult<Self> {
        let base_url = config.resolve_base_url()?;

        let jar = Arc::new(Jar::default());
        for cookie in &session.cookies {
            jar.add_cookie_str(cookie, &base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            http,
            jar,
            base_url,
        })
    }

    /// Cookies currently held for the backend, as `name=value` strings ready
    /// to be persisted into the session file and replayed on the next run.
    pub fn session_cookies(&self) -> Vec<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().map(ToOwned::to_owned).ok())
            .map(|header| header.split("; ").map(ToOwned::to_owned).collect())
            .unwrap_or_default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> ClientResult<T> {
        let request = self.http.request(method, self.url(path));
        self.execute(request).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = wire::to_snake_case(serde_json::to_value(body)?);
        let request = self.http.request(method, self.url(path)).json(&payload);
        self.execute(request).await
    }

    /// For endpoints whose success response carries no body worth decoding
    /// (deletes, logout).
    async fn run(&self, method: Method, path: &str) -> ClientResult<()> {
        let response = self.http.request(method, self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let bytes = response.bytes().await?;
            return Err(ClientError::from_response(status.as_u16(), &bytes));
        }

        Ok(())
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &bytes));
        }

        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(serde_json::from_value(wire::to_camel_case(value))?)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::{get, patch, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::client::ApiClient;
    use crate::config::{Config, Profile};
    use crate::error::ClientError;
    use crate::models::{CreateTaskRequest, RecurrenceType};
    use crate::session::Session;

    fn test_config(addr: SocketAddr) -> Config {
        Config {
            base_url: Some(format!("http://{addr}")),
            profile: Profile::Dev,
            session_file: PathBuf::from("./unused-session.json"),
            timeout_secs: 10,
            error_log_poll_secs: 300,
            system_check_poll_secs: 180,
        }
    }

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener
            .local_addr()
            .expect("listener address should be readable");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> ApiClient {
        ApiClient::new(&test_config(addr), &Session::default()).expect("client should build")
    }

    fn task_payload() -> Value {
        json!({
            "id": 12,
            "project_id": 3,
            "parent_task_id": null,
            "title": "Water the plants",
            "description": "",
            "status_id": 1,
            "priority_id": 2,
            "created_by_id": 1,
            "assigned_to_id": null,
            "deadline": null,
            "position": 0,
            "is_completed": false,
            "is_recurring": true,
            "recurrence_type": "weekly",
            "recurrence_times": "[\"08:00\",\"18:30\"]",
            "recurrence_days": "[0,3]",
            "last_executed_at": null,
            "next_execution_at": "2026-08-05T08:00:00Z",
        })
    }

    fn user_payload() -> Value {
        json!({
            "id": 4,
            "name": "Ana",
            "email": "ana@example.com",
            "avatar_url": null,
            "role": "Editor",
            "nickname": "ana",
        })
    }

    #[tokio::test]
    async fn response_bodies_are_camelized_and_recurrence_strings_decoded() {
        let router = Router::new().route(
            "/api/tasks",
            get(|| async { Json(json!([task_payload()])) }),
        );
        let client = client_for(serve(router).await);

        let tasks = client.list_tasks().await.expect("tasks should list");

        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.project_id, 3);
        assert_eq!(task.recurrence_type, Some(RecurrenceType::Weekly));
        assert_eq!(
            task.recurrence_times.as_deref(),
            Some(&["08:00".to_string(), "18:30".to_string()][..])
        );
        assert_eq!(task.recurrence_days.as_deref(), Some(&[0, 3][..]));
    }

    #[tokio::test]
    async fn request_bodies_are_snaked_and_recurrence_lists_encoded() {
        async fn create_task(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
            let snake_keys = body.get("project_id").is_some() && body.get("projectId").is_none();
            let times_encoded = body
                .get("recurrence_times")
                .is_some_and(Value::is_string);
            let days_encoded = body.get("recurrence_days").is_some_and(Value::is_string);

            if !(snake_keys && times_encoded && days_encoded) {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"error": "bad_request", "message": "wire shape mismatch"})),
                );
            }

            (StatusCode::CREATED, Json(task_payload()))
        }

        let router = Router::new().route("/api/tasks", post(create_task));
        let client = client_for(serve(router).await);

        let payload = CreateTaskRequest {
            project_id: 3,
            title: "Water the plants".to_string(),
            is_recurring: Some(true),
            recurrence_type: Some(RecurrenceType::Weekly),
            recurrence_times: Some(vec!["08:00".to_string(), "18:30".to_string()]),
            recurrence_days: Some(vec![0, 3]),
            ..Default::default()
        };

        let task = client
            .create_task(&payload)
            .await
            .expect("task should be created");
        assert_eq!(task.id, 12);
    }

    #[tokio::test]
    async fn backend_error_body_maps_to_api_error() {
        let router = Router::new().route(
            "/api/projects",
            get(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({"error": "conflict", "message": "project name already in use"})),
                )
            }),
        );
        let client = client_for(serve(router).await);

        let error = client
            .list_projects()
            .await
            .expect_err("conflict should surface as an error");

        match error {
            ClientError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "project name already in use");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_response_maps_to_unauthenticated() {
        let router = Router::new().route(
            "/api/tasks",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"}))) }),
        );
        let client = client_for(serve(router).await);

        let error = client
            .list_tasks()
            .await
            .expect_err("unauthorized should surface as an error");
        assert!(matches!(error, ClientError::Unauthenticated));
    }

    #[tokio::test]
    async fn login_cookie_is_held_and_replayed() {
        async fn login(Json(body): Json<Value>) -> (StatusCode, HeaderMap, Json<Value>) {
            if body.get("email").is_none() || body.get("password").is_none() {
                return (
                    StatusCode::BAD_REQUEST,
                    HeaderMap::new(),
                    Json(json!({"error": "bad_request", "message": "missing credentials"})),
                );
            }

            let mut headers = HeaderMap::new();
            headers.insert(
                header::SET_COOKIE,
                "tarefas_session=abc123; Path=/"
                    .parse()
                    .expect("cookie header should parse"),
            );
            (StatusCode::OK, headers, Json(user_payload()))
        }

        async fn check(headers: HeaderMap) -> Json<Value> {
            let authenticated = headers
                .get(header::COOKIE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.contains("tarefas_session=abc123"));

            Json(json!({
                "authenticated": authenticated,
                "user": if authenticated { user_payload() } else { Value::Null },
            }))
        }

        let router = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/check", get(check));
        let client = client_for(serve(router).await);

        let user = client
            .login("ana@example.com", "secret")
            .await
            .expect("login should succeed");
        assert_eq!(user.id, 4);

        let auth = client.check_auth().await.expect("check should succeed");
        assert!(auth.authenticated);
        assert_eq!(auth.user.map(|user| user.id), Some(4));

        let cookies = client.session_cookies();
        assert!(cookies.iter().any(|cookie| cookie == "tarefas_session=abc123"));
    }

    #[tokio::test]
    async fn saved_session_cookies_are_restored_into_the_jar() {
        async fn check(headers: HeaderMap) -> Json<Value> {
            let authenticated = headers
                .get(header::COOKIE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.contains("tarefas_session=restored"));
            Json(json!({"authenticated": authenticated, "user": Value::Null}))
        }

        let router = Router::new().route("/auth/check", get(check));
        let addr = serve(router).await;

        let session = Session {
            saved_nickname: None,
            user: None,
            cookies: vec!["tarefas_session=restored".to_string()],
        };
        let client =
            ApiClient::new(&test_config(addr), &session).expect("client should build");

        let auth = client.check_auth().await.expect("check should succeed");
        assert!(auth.authenticated);
    }

    #[tokio::test]
    async fn toggle_completion_hits_the_rpc_route() {
        let router = Router::new().route(
            "/api/tasks/{id}/toggle-completion",
            patch(|axum::extract::Path(id): axum::extract::Path<i64>| async move {
                let mut payload = task_payload();
                payload["id"] = json!(id);
                payload["is_completed"] = json!(true);
                Json(payload)
            }),
        );
        let client = client_for(serve(router).await);

        let task = client
            .toggle_task_completion(77)
            .await
            .expect("toggle should succeed");
        assert_eq!(task.id, 77);
        assert!(task.is_completed);
    }

    #[tokio::test]
    async fn missing_next_task_maps_to_none() {
        let router = Router::new().route(
            "/api/users/nickname/{nickname}/next-task",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "not_found", "message": "no pending task"})),
                )
            }),
        );
        let client = client_for(serve(router).await);

        let next = client
            .next_task_for_nickname("ana")
            .await
            .expect("missing next task should not be an error");
        assert!(next.is_none());
    }
}
