//! Diagnosed disease listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use arogya_core::chat::repository::ChatRepository;

use crate::state::AppState;

/// List diagnosed diseases across sessions, newest first.
///
/// # Examples
///
/// ```bash
/// arogya diseases list --limit 10
/// ```
pub async fn list_diseases(state: &AppState, limit: Option<i64>, json: bool) -> Result<()> {
    let diseases = state.chat_repo.list_diseases(limit, None).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diseases)?);
        return Ok(());
    }

    if diseases.is_empty() {
        println!();
        println!(
            "  {} No diseases diagnosed yet.",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("HID").fg(Color::White),
        Cell::new("Disease").fg(Color::White),
        Cell::new("Diagnosed").fg(Color::White),
    ]);

    for row in &diseases {
        table.add_row(vec![
            Cell::new(&row.hid).fg(Color::Cyan),
            Cell::new(&row.disease).fg(Color::Yellow),
            Cell::new(row.created_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
