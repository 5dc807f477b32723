use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::learning;
use crate::matcher;
use crate::predictor;
use crate::store;

/// One-shot match from the command line. Mirrors `POST /chat`: a
/// low-confidence message is answered with the placeholder prediction and
/// logged as an unknown question.
pub async fn run_ask(config: &Config, message: &str) -> Result<()> {
    let message = message.trim();

    if message.is_empty() {
        println!("Please ask something.");
        return Ok(());
    }

    let pool = db::connect(config).await?;
    let entries = store::list_knowledge_entries(&pool).await?;
    let (answer, score) = matcher::find_best_answer(&entries, message);

    match answer {
        Some(answer) if score >= config.matching.threshold => {
            println!("{}", answer);
            println!("  confidence: {:.2}", score);
        }
        _ => {
            let predicted = predictor::predict_answer(message);
            learning::record_unknown(&pool, message, predicted, score).await?;

            println!("{}", predicted);
            println!("  confidence: {:.2} (logged; teach the answer with `chatkb teach`)", score);
        }
    }

    pool.close().await;
    Ok(())
}
