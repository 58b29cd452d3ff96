use clap::Subcommand;

use crate::client::ApiClient;
use crate::commands::require_non_empty;
use crate::models::{CreateCommentRequest, TaskComment, UpdateCommentRequest};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Comments on a task, threaded one level like the web view.
    List {
        #[arg(long)]
        task: i64,
    },

    Create {
        #[arg(long)]
        task: i64,
        #[arg(long)]
        content: String,
        /// Comment id to reply to.
        #[arg(long = "reply-to")]
        reply_to: Option<i64>,
    },

    Update {
        id: i64,
        #[arg(long)]
        content: String,
    },

    Delete { id: i64 },
}

pub async fn run(command: CommentCommand, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        CommentCommand::List { task } => {
            let comments = client.list_task_comments(task).await?;
            print_thread(&comments);
        }
        CommentCommand::Create {
            task,
            content,
            reply_to,
        } => {
            require_non_empty("content", &content)?;
            let comment = client
                .create_comment(&CreateCommentRequest {
                    task_id: task,
                    content,
                    parent_comment_id: reply_to,
                })
                .await?;
            println!("created comment {} on task {}", comment.id, comment.task_id);
        }
        CommentCommand::Update { id, content } => {
            require_non_empty("content", &content)?;
            let comment = client
                .update_comment(id, &UpdateCommentRequest { content })
                .await?;
            println!("updated comment {}", comment.id);
        }
        CommentCommand::Delete { id } => {
            client.delete_comment(id).await?;
            println!("deleted comment {id}");
        }
    }

    Ok(())
}

fn print_thread(comments: &[TaskComment]) {
    if comments.is_empty() {
        println!("no comments");
        return;
    }

    for comment in comments.iter().filter(|c| c.parent_comment_id.is_none()) {
        print_comment(comment, 0);
        for reply in replies_to(comments, comment.id) {
            print_comment(reply, 1);
        }
    }
}

fn replies_to(comments: &[TaskComment], parent_id: i64) -> Vec<&TaskComment> {
    comments
        .iter()
        .filter(|comment| comment.parent_comment_id == Some(parent_id))
        .collect()
}

fn print_comment(comment: &TaskComment, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}#{} by user {} at {}",
        comment.id,
        comment.user_id,
        output::format_timestamp(comment.created_at)
    );
    println!("{indent}  {}", comment.content);
}

#[cfg(test)]
mod tests {
    use super::replies_to;
    use crate::models::TaskComment;

    fn comment(id: i64, parent: Option<i64>) -> TaskComment {
        TaskComment {
            id,
            task_id: 1,
            user_id: 1,
            content: format!("comment {id}"),
            parent_comment_id: parent,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn replies_are_grouped_under_their_parent() {
        let comments = vec![comment(1, None), comment(2, Some(1)), comment(3, None)];
        let replies = replies_to(&comments, 1);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].id, 2);
        assert!(replies_to(&comments, 3).is_empty());
    }
}
