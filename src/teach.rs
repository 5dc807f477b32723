use anyhow::{bail, Result};

use crate::config::Config;
use crate::db;
use crate::learning;

/// Adds a knowledge entry from the command line. Mirrors `POST /feedback`:
/// the entry is stored and any logged unknown questions with the same text
/// are resolved.
pub async fn run_teach(config: &Config, question: &str, feedback: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let outcome = learning::apply_feedback(&pool, question, feedback).await?;
    pool.close().await;

    if !outcome.is_success() {
        bail!("{}", outcome.message);
    }

    println!("{}", outcome.message);
    Ok(())
}
