use anyhow::{Result, bail};
use clap::Subcommand;
use medchat_application::AppContext;
use medchat_core::session::Session;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List the chat sessions of a case
    List { patient_id: String, case_id: String },
    /// Start a new chat session and make it current
    Start {
        patient_id: String,
        case_id: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// Rename a session
    Rename {
        case_id: String,
        session_id: String,
        title: String,
    },
    /// Delete a session and its history
    Delete { case_id: String, session_id: String },
    /// Make a cached session current
    Use { session_id: String },
    /// Show the current session
    Current,
}

pub async fn run(ctx: &AppContext, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::List {
            patient_id,
            case_id,
        } => {
            let sessions = ctx.chat.list_sessions(&patient_id, &case_id).await?;
            let current = ctx.chat.current_session_id().await;
            if sessions.is_empty() {
                println!("No sessions for case {}", case_id);
            }
            for session in &sessions {
                let marker = if current.as_deref() == Some(session.id.as_str()) { "*" } else { " " };
                println!("{} {}", marker, summary(session));
            }
        }
        SessionAction::Start {
            patient_id,
            case_id,
            title,
        } => {
            let session = ctx
                .chat
                .start_session(&patient_id, &case_id, title.as_deref())
                .await?;
            ctx.chat
                .ensure_session(&session.id, session.title.as_deref())
                .await;
            println!("✅ Started {}", summary(&session));
        }
        SessionAction::Rename {
            case_id,
            session_id,
            title,
        } => {
            ctx.chat.update_session(&session_id, &case_id, &title).await?;
            println!("✏️  Renamed {} to \"{}\"", session_id, title.trim());
        }
        SessionAction::Delete {
            case_id,
            session_id,
        } => {
            ctx.chat.delete_session(&session_id, &case_id).await?;
            println!("🗑️  Deleted session {}", session_id);
            if let Some(next) = ctx.chat.current_session().await {
                println!("Current session is now {}", summary(&next));
            }
        }
        SessionAction::Use { session_id } => {
            if ctx.chat.state().await.messages_by_session.contains_key(&session_id)
                || find_cached(ctx, &session_id).await.is_some()
            {
                ctx.chat.select_session(Some(&session_id)).await;
                println!("Current session: {}", session_id);
            } else {
                bail!("Session {session_id} is not cached; list the sessions of its case first");
            }
        }
        SessionAction::Current => match ctx.chat.current_session().await {
            Some(session) => println!("{}", summary(&session)),
            None => println!("No current session"),
        },
    }
    Ok(())
}

/// Looks a session up in the local cache.
pub async fn find_cached(ctx: &AppContext, session_id: &str) -> Option<Session> {
    ctx.chat
        .state()
        .await
        .sessions_by_case
        .into_values()
        .flatten()
        .find(|s| s.id == session_id)
}

pub fn summary(session: &Session) -> String {
    let updated = session
        .updated_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{}  {}  (updated {})", session.id, session.display_title(), updated)
}
