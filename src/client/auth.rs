use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{AuthCheck, User};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Auth endpoints live outside the `/api` prefix. The session cookie the
/// backend sets on login is held in the client's jar and persisted through
/// the session file.
impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        self.send(Method::POST, "/auth/login", &LoginRequest { email, password })
            .await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<User> {
        self.send(
            Method::POST,
            "/auth/register",
            &RegisterRequest {
                name,
                email,
                password,
            },
        )
        .await
    }

    pub async fn check_auth(&self) -> ClientResult<AuthCheck> {
        self.fetch(Method::GET, "/auth/check").await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.run(Method::POST, "/auth/logout").await
    }

    /// The Google flow is a browser redirect; the client only surfaces the
    /// address to open.
    pub fn google_login_url(&self) -> String {
        self.url("/auth/google")
    }
}
