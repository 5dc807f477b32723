use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::store;

/// Lists unresolved unknown questions, newest first.
pub async fn run_pending(config: &Config, limit: i64) -> Result<()> {
    let pool = db::connect(config).await?;
    let questions = store::list_unresolved(&pool, limit).await?;

    if questions.is_empty() {
        println!("No pending questions.");
        pool.close().await;
        return Ok(());
    }

    for (i, q) in questions.iter().enumerate() {
        let asked = chrono::DateTime::from_timestamp(q.created_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!("{}. {}", i + 1, q.question);
        println!("    asked: {}", asked);
        println!("    score at log time: {:.2}", q.confidence);
        if let Some(ref predicted) = q.predicted_answer {
            println!("    predicted: {}", predicted);
        }
        println!();
    }

    pool.close().await;
    Ok(())
}
