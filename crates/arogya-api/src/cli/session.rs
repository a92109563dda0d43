//! Session inspection CLI commands: list, show, delete.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use arogya_core::chat::repository::ChatRepository;
use arogya_types::error::RepositoryError;

use crate::state::AppState;

/// Characters of serialized conversation shown per row.
const PREVIEW_CHARS: usize = 100;

/// List sessions with a preview of their conversation.
///
/// # Examples
///
/// ```bash
/// arogya sessions list
/// arogya sessions list --limit 20 --json
/// ```
pub async fn list_sessions(state: &AppState, limit: Option<i64>, json: bool) -> Result<()> {
    let sessions = state.chat_repo.list(limit, None).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. They are created on the first {} request.",
            style("i").blue().bold(),
            style("POST /api/chat/").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("HID").fg(Color::White),
        Cell::new("Turns").fg(Color::White),
        Cell::new("Conversation").fg(Color::White),
    ]);

    for session in &sessions {
        table.add_row(vec![
            Cell::new(&session.hid).fg(Color::Cyan),
            Cell::new(session.conversation.len().to_string()).fg(Color::White),
            Cell::new(session.conversation.preview(PREVIEW_CHARS)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print the stored conversation of one session.
pub async fn show_session(state: &AppState, hid: &str, json: bool) -> Result<()> {
    let session = state
        .chat_repo
        .get(hid)
        .await?
        .with_context(|| format!("Session '{hid}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!();
    println!("  Session {}", style(&session.hid).cyan().bold());
    println!();

    if session.conversation.is_empty() {
        println!("  {}", style("(no turns recorded)").dim());
        println!();
        return Ok(());
    }

    for (utterance, reply) in session.conversation.turns() {
        println!("  {} {utterance}", style("User:").green().bold());
        println!("  {} {reply}", style("Bot:").blue().bold());
        println!();
    }

    Ok(())
}

/// Delete a session; its diagnosed diseases go with it.
pub async fn delete_session(state: &AppState, hid: &str, json: bool) -> Result<()> {
    match state.chat_repo.delete(hid).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => anyhow::bail!("Session '{hid}' not found"),
        Err(e) => return Err(e.into()),
    }

    if json {
        println!("{}", serde_json::json!({"deleted": true, "hid": hid}));
    } else {
        println!("  {} Session '{}' deleted.", style("x").red().bold(), hid);
    }

    Ok(())
}
