use anyhow::anyhow;
use clap::Subcommand;

use crate::client::ApiClient;
use crate::commands::{require_non_empty, require_some_field};
use crate::models::{CreateUserRequest, Role, UpdateUserRequest, User};
use crate::output;
use crate::session::Session;

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List,

    Get { id: i64 },

    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// admin, editor or viewer.
        #[arg(long)]
        role: Role,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },

    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },

    Delete { id: i64 },

    /// Next pending task for a nickname (defaults to the saved one).
    NextTask { nickname: Option<String> },
}

pub async fn run(command: UserCommand, client: &ApiClient, session: &Session) -> anyhow::Result<()> {
    match command {
        UserCommand::List => {
            let users = client.list_users().await?;
            print_user_table(&users);
        }
        UserCommand::Get { id } => {
            let user = client.get_user(id).await?;
            print_user(&user);
        }
        UserCommand::Create {
            name,
            email,
            role,
            nickname,
            avatar_url,
        } => {
            require_non_empty("name", &name)?;
            require_non_empty("email", &email)?;

            let user = client
                .create_user(&CreateUserRequest {
                    name,
                    email,
                    role,
                    nickname,
                    avatar_url,
                })
                .await?;
            println!("created user {} ({})", user.id, user.name);
        }
        UserCommand::Update {
            id,
            name,
            email,
            role,
            nickname,
            avatar_url,
        } => {
            require_some_field(
                name.is_some()
                    || email.is_some()
                    || role.is_some()
                    || nickname.is_some()
                    || avatar_url.is_some(),
            )?;

            let user = client
                .update_user(
                    id,
                    &UpdateUserRequest {
                        name,
                        email,
                        role,
                        nickname,
                        avatar_url,
                    },
                )
                .await?;
            println!("updated user {} ({})", user.id, user.name);
        }
        UserCommand::Delete { id } => {
            client.delete_user(id).await?;
            println!("deleted user {id}");
        }
        UserCommand::NextTask { nickname } => {
            let nickname = nickname
                .or_else(|| session.saved_nickname.clone())
                .ok_or_else(|| anyhow!("no nickname given and none saved yet"))?;

            match client.next_task_for_nickname(&nickname).await? {
                Some(task) => {
                    println!("next task for {nickname}:");
                    println!("  {} ({})", task.title, task.id);
                    println!("  project: {}", task.project_id);
                    println!("  deadline: {}", output::format_timestamp(task.deadline));
                }
                None => println!("no pending task for {nickname}"),
            }
        }
    }

    Ok(())
}

fn print_user_table(users: &[User]) {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                user.name.clone(),
                user.email.clone(),
                user.role.as_str().to_string(),
                user.nickname.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    output::print_table(&["id", "name", "email", "role", "nickname"], &rows);
}

fn print_user(user: &User) {
    println!("user {}: {}", user.id, user.name);
    println!("  email: {}", user.email);
    println!("  role: {}", user.role.as_str());
    if let Some(nickname) = user.nickname.as_deref() {
        println!("  nickname: {nickname}");
    }
    if let Some(avatar_url) = user.avatar_url.as_deref() {
        println!("  avatar: {avatar_url}");
    }
}
