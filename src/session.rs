use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::models::User;

/// Local state carried between CLI invocations: the saved nickname, the
/// signed-in user record and the backend session cookies. This is the file
/// rendition of the web app's two localStorage keys (`saved_nickname`,
/// `tarefas_user`), with the user stored in the same camelCase shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub saved_nickname: Option<String>,
    pub user: Option<User>,
    pub cookies: Vec<String>,
}

impl Session {
    pub fn signed_in(&self) -> bool {
        self.user.is_some() || !self.cookies.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty session, not an error.
    pub fn load(&self) -> ClientResult<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Session::default()),
            Err(error) => return Err(ClientError::Session(error)),
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(session),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error,
                    "session file is corrupt and will be treated as empty"
                );
                Ok(Session::default())
            }
        }
    }

    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::Session(error)),
        }
    }
}
