use anyhow::anyhow;
use clap::Subcommand;

use crate::client::ApiClient;
use crate::session::{Session, SessionStore};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Password-less sign-in by nickname; remembers the nickname for later.
    Nickname {
        /// Defaults to the previously saved nickname.
        nickname: Option<String>,
    },

    /// Show who is signed in according to the backend.
    Check,

    /// Print the Google sign-in address to open in a browser.
    Google,

    /// Sign out and drop the saved session.
    Logout,
}

pub async fn run(
    command: AuthCommand,
    client: &ApiClient,
    store: &SessionStore,
    session: &mut Session,
) -> anyhow::Result<()> {
    match command {
        AuthCommand::Login { email, password } => {
            let user = client.login(&email, &password).await?;
            println!("signed in as {} <{}>", user.name, user.email);
            session.user = Some(user);
            session.cookies = client.session_cookies();
            store.save(session)?;
        }
        AuthCommand::Register {
            name,
            email,
            password,
        } => {
            let user = client.register(&name, &email, &password).await?;
            println!("registered {} <{}>", user.name, user.email);
            session.user = Some(user);
            session.cookies = client.session_cookies();
            store.save(session)?;
        }
        AuthCommand::Nickname { nickname } => {
            let nickname = nickname
                .or_else(|| session.saved_nickname.clone())
                .ok_or_else(|| anyhow!("no nickname given and none saved yet"))?;

            let user = client
                .user_by_nickname(&nickname)
                .await?
                .ok_or_else(|| anyhow!("no user with nickname '{nickname}'"))?;

            println!("signed in as {} (nickname {nickname})", user.name);
            session.saved_nickname = Some(nickname);
            session.user = Some(user);
            session.cookies = client.session_cookies();
            store.save(session)?;
        }
        AuthCommand::Check => {
            let auth = client.check_auth().await?;
            match auth.user {
                Some(user) if auth.authenticated => {
                    println!("signed in as {} <{}> ({})", user.name, user.email, user.role.as_str());
                }
                _ if auth.authenticated => println!("signed in"),
                _ => println!("not signed in"),
            }
        }
        AuthCommand::Google => {
            println!("{}", client.google_login_url());
        }
        AuthCommand::Logout => {
            if let Err(error) = client.logout().await {
                tracing::warn!(error = %error, "logout request failed, clearing local session anyway");
            }
            store.clear()?;
            println!("signed out");
        }
    }

    Ok(())
}
