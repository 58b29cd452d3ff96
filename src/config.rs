use std::path::PathBuf;

use clap::{Args, ValueEnum};
use reqwest::Url;
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Default backend addresses for the two deployments the web client used to
/// pick between by sniffing the page hostname. An explicit --base-url wins.
const DEV_BASE_URL: &str = "http://localhost:3000";
const PROD_BASE_URL: &str = "http://tarefas.local:8080";

#[derive(Clone, Debug, Args)]
pub struct Config {
    /// Backend base URL; overrides the profile default.
    #[arg(long, env = "TAREFAS_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "TAREFAS_PROFILE", value_enum, default_value_t = Profile::Dev)]
    pub profile: Profile,

    #[arg(
        long,
        env = "TAREFAS_SESSION_FILE",
        default_value = "./.tarefas/session.json"
    )]
    pub session_file: PathBuf,

    #[arg(long, env = "TAREFAS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, env = "TAREFAS_ERROR_LOG_POLL_SECS", default_value_t = 300)]
    pub error_log_poll_secs: u64,

    #[arg(long, env = "TAREFAS_SYSTEM_CHECK_POLL_SECS", default_value_t = 180)]
    pub system_check_poll_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    Dev,
    Prod,
}

impl Config {
    pub fn resolve_base_url(&self) -> ClientResult<Url> {
        let raw = match self.base_url.as_deref() {
            Some(value) => value,
            None => match self.profile {
                Profile::Dev => DEV_BASE_URL,
                Profile::Prod => PROD_BASE_URL,
            },
        };

        let url = Url::parse(raw)
            .map_err(|error| ClientError::InvalidInput(format!("invalid base url '{raw}': {error}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidInput(format!(
                "base url '{raw}' must use http or https"
            )));
        }

        Ok(url)
    }

    pub fn validate(&self) {
        assert_non_zero("TAREFAS_TIMEOUT_SECS", self.timeout_secs);
        assert_non_zero("TAREFAS_ERROR_LOG_POLL_SECS", self.error_log_poll_secs);
        assert_non_zero("TAREFAS_SYSTEM_CHECK_POLL_SECS", self.system_check_poll_secs);
    }

    pub fn log_startup_warnings(&self, session: &Session) {
        if !session.signed_in() {
            warn!("no saved session, authenticated commands will fail until `tarefas auth login`");
        }
    }
}

fn assert_non_zero(key: &'static str, value: u64) {
    assert!(value > 0, "{key} must be greater than 0");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Config, Profile};

    fn config() -> Config {
        Config {
            base_url: None,
            profile: Profile::Dev,
            session_file: PathBuf::from("./.tarefas/session.json"),
            timeout_secs: 10,
            error_log_poll_secs: 300,
            system_check_poll_secs: 180,
        }
    }

    #[test]
    fn profile_supplies_the_default_base_url() {
        let dev = config();
        assert_eq!(
            dev.resolve_base_url().expect("dev url should resolve").as_str(),
            "http://localhost:3000/"
        );

        let prod = Config {
            profile: Profile::Prod,
            ..config()
        };
        assert_eq!(
            prod.resolve_base_url().expect("prod url should resolve").as_str(),
            "http://tarefas.local:8080/"
        );
    }

    #[test]
    fn explicit_base_url_wins_over_profile() {
        let overridden = Config {
            base_url: Some("https://board.example.com".to_string()),
            ..config()
        };
        assert_eq!(
            overridden
                .resolve_base_url()
                .expect("override should resolve")
                .as_str(),
            "https://board.example.com/"
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let bad = Config {
            base_url: Some("ftp://example.com".to_string()),
            ..config()
        };
        assert!(bad.resolve_base_url().is_err());
    }

    #[test]
    #[should_panic(expected = "TAREFAS_TIMEOUT_SECS")]
    fn zero_timeout_fails_validation() {
        let bad = Config {
            timeout_secs: 0,
            ..config()
        };
        bad.validate();
    }
}
