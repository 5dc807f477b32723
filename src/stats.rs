//! Database statistics and health overview.
//!
//! Quick summary of what the service knows: knowledge-entry counts, the
//! unknown-question backlog, and database size. Used by `chatkb stats` to
//! give confidence that learning is actually happening.

use anyhow::Result;

use crate::config::Config;
use crate::db;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let knowledge_entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM knowledge_base")
        .fetch_one(&pool)
        .await?;

    let unknown_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM unknown_questions")
        .fetch_one(&pool)
        .await?;

    let unknown_pending: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM unknown_questions WHERE resolved = 0")
            .fetch_one(&pool)
            .await?;

    let last_asked: Option<i64> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM unknown_questions")
            .fetch_one(&pool)
            .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("chatkb — Database Stats");
    println!("=======================");
    println!();
    println!("  Database:          {}", config.db.path.display());
    println!("  Size:              {}", format_bytes(db_size));
    println!();
    println!("  Knowledge entries: {}", knowledge_entries);
    println!(
        "  Unknown questions: {} ({} pending, {} resolved)",
        unknown_total,
        unknown_pending,
        unknown_total - unknown_pending
    );
    println!(
        "  Last question:     {}",
        match last_asked {
            Some(ts) => format_ts_relative(ts),
            None => "never".to_string(),
        }
    );
    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
