use super::sessions::find_cached;
use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use medchat_application::{AppContext, MessageView};
use medchat_core::session::{Attachment, FeedbackOutcome, FeedbackSubmission, MessageRole, Session};

#[derive(Subcommand)]
pub enum MessageAction {
    /// Show the history of a session (defaults to the current one)
    List {
        #[arg(long)]
        session: Option<String>,
    },
    /// Send a message to the assistant
    Send {
        content: String,
        #[arg(long)]
        session: Option<String>,
        /// Attachment as NAME or NAME=URL, repeatable
        #[arg(long = "attach")]
        attachments: Vec<String>,
    },
    /// Toggle a like on a message
    Like {
        message_id: String,
        #[arg(long)]
        session: Option<String>,
    },
    /// Toggle a dislike on a message
    Dislike {
        message_id: String,
        #[arg(long)]
        session: Option<String>,
    },
    /// Rate a message and leave a comment; omit both to clear
    Feedback {
        message_id: String,
        #[arg(long)]
        stars: Option<u8>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        session: Option<String>,
    },
}

pub async fn run(ctx: &AppContext, action: MessageAction) -> Result<()> {
    match action {
        MessageAction::List { session } => {
            let session_id = resolve_session_id(ctx, session).await?;
            ctx.chat.list_messages(&session_id).await?;
            let rows = ctx.chat.messages_view(&session_id).await;
            if rows.is_empty() {
                println!("No messages yet");
            }
            for row in &rows {
                print_row(row);
            }
        }
        MessageAction::Send {
            content,
            session,
            attachments,
        } => {
            let session = resolve_session(ctx, session).await?;
            let attachments = attachments.iter().map(|a| parse_attachment(a)).collect();
            let sent = ctx
                .chat
                .send_message(
                    &session.id,
                    &session.case_id,
                    &session.patient_id,
                    &content,
                    attachments,
                )
                .await?;
            tracing::debug!("Message stored as {}", sent.id);
            // The reply is generated server-side; reload to pick it up.
            ctx.chat.list_messages(&session.id).await?;
            let rows = ctx.chat.messages_view(&session.id).await;
            let start = rows.iter().position(|r| r.id == sent.id).unwrap_or(0);
            for row in &rows[start..] {
                print_row(row);
            }
        }
        MessageAction::Like {
            message_id,
            session,
        } => {
            let session_id = resolve_session_id(ctx, session).await?;
            report(ctx.chat.like_message(&session_id, &message_id).await)?;
        }
        MessageAction::Dislike {
            message_id,
            session,
        } => {
            let session_id = resolve_session_id(ctx, session).await?;
            report(ctx.chat.dislike_message(&session_id, &message_id).await)?;
        }
        MessageAction::Feedback {
            message_id,
            stars,
            text,
            session,
        } => {
            let session_id = resolve_session_id(ctx, session).await?;
            let submission = FeedbackSubmission::new(stars, text);
            report(
                ctx.chat
                    .submit_feedback(&session_id, &message_id, submission)
                    .await,
            )?;
        }
    }
    Ok(())
}

async fn resolve_session_id(ctx: &AppContext, session: Option<String>) -> Result<String> {
    match session {
        Some(id) => Ok(id),
        None => ctx
            .chat
            .current_session_id()
            .await
            .context("No current session; pass --session or run `medchat session use <id>`"),
    }
}

async fn resolve_session(ctx: &AppContext, session: Option<String>) -> Result<Session> {
    let id = resolve_session_id(ctx, session).await?;
    find_cached(ctx, &id).await.ok_or_else(|| {
        anyhow!("Session {id} is not cached; run `medchat session list <patient> <case>` first")
    })
}

fn parse_attachment(raw: &str) -> Attachment {
    let (name, url) = match raw.split_once('=') {
        Some((name, url)) => (name, Some(url.to_string())),
        None => (raw, None),
    };
    Attachment {
        name: name.to_string(),
        mime_type: None,
        url,
    }
}

fn report(outcome: FeedbackOutcome) -> Result<()> {
    match outcome {
        FeedbackOutcome::Applied => {
            println!("✅ Saved");
            Ok(())
        }
        FeedbackOutcome::Skipped(reason) => {
            println!("⏭️  Skipped: {}", reason);
            Ok(())
        }
        FeedbackOutcome::Failed(reason) => Err(anyhow!(reason)),
    }
}

fn print_row(row: &MessageView) {
    let who = match row.role {
        MessageRole::User => "you",
        MessageRole::Assistant => "assistant",
        MessageRole::System => "system",
    };
    let mut marks = String::new();
    if row.is_liked() {
        marks.push_str(" 👍");
    }
    if row.is_disliked() {
        marks.push_str(" 👎");
    }
    if let Some(stars) = row.stars {
        marks.push_str(&format!(" {}", "★".repeat(stars as usize)));
    }
    let id = if row.can_react { row.id.as_str() } else { "-" };
    println!("[{}] {}{}", id, who, marks);
    for line in row.content.lines() {
        println!("    {}", line);
    }
    for attachment in &row.attachments {
        println!("    📎 {}", attachment.name);
    }
    if let Some(feedback) = &row.feedback {
        println!("    ✍️  {}", feedback);
    }
}
