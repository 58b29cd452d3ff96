use serde::Deserialize;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not signed in, run `tarefas auth login` or `tarefas auth nickname` first")]
    Unauthenticated,

    #[error("session file error: {0}")]
    Session(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Error body the backend sends on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ClientError {
    /// Builds the `Api` variant from a failed response, preferring the
    /// backend's structured `{error, message}` body and falling back to the
    /// raw text when the body is not JSON.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        if status == 401 {
            return Self::Unauthenticated;
        }

        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

        let message = if message.is_empty() {
            format!("request failed with status {status}")
        } else {
            message
        };

        Self::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
