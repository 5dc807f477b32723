//! CRUD over the two record kinds: knowledge entries and the
//! unknown-question log.
//!
//! Plain `sqlx` queries against the shared pool; writes that must be atomic
//! with other writes take a connection so callers can run them inside a
//! transaction. No uniqueness is enforced on `question`: repeated
//! unanswered questions create repeated rows, and the feedback path
//! resolves all of them at once.

use anyhow::Result;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::models::{KnowledgeEntry, UnknownQuestion};

pub async fn list_knowledge_entries(pool: &SqlitePool) -> Result<Vec<KnowledgeEntry>> {
    let rows = sqlx::query("SELECT id, question, answer, confidence FROM knowledge_base ORDER BY id")
        .fetch_all(pool)
        .await?;

    let entries = rows
        .iter()
        .map(|row| KnowledgeEntry {
            id: row.get("id"),
            question: row.get("question"),
            answer: row.get("answer"),
            confidence: row.get("confidence"),
        })
        .collect();

    Ok(entries)
}

pub async fn insert_knowledge_entry(
    conn: &mut SqliteConnection,
    question: &str,
    answer: &str,
    confidence: f64,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO knowledge_base (question, answer, confidence) VALUES (?, ?, ?)")
        .bind(question)
        .bind(answer)
        .bind(confidence)
        .execute(conn)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_unknown_question(
    pool: &SqlitePool,
    question: &str,
    predicted_answer: &str,
    confidence: f64,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO unknown_questions (question, predicted_answer, confidence, resolved, created_at)
        VALUES (?, ?, ?, 0, ?)
        "#,
    )
    .bind(question)
    .bind(predicted_answer)
    .bind(confidence)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Marks every unresolved row with this exact question text as resolved,
/// recording the feedback. Returns the number of rows updated.
pub async fn resolve_unknown_questions(
    conn: &mut SqliteConnection,
    question: &str,
    feedback: &str,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE unknown_questions SET user_feedback = ?, resolved = 1 WHERE question = ? AND resolved = 0",
    )
    .bind(feedback)
    .bind(question)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

pub async fn list_unresolved(pool: &SqlitePool, limit: i64) -> Result<Vec<UnknownQuestion>> {
    let rows = sqlx::query(
        r#"
        SELECT id, question, predicted_answer, user_feedback, confidence, resolved, created_at
        FROM unknown_questions
        WHERE resolved = 0
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let questions = rows
        .iter()
        .map(|row| UnknownQuestion {
            id: row.get("id"),
            question: row.get("question"),
            predicted_answer: row.get("predicted_answer"),
            user_feedback: row.get("user_feedback"),
            confidence: row.get("confidence"),
            resolved: row.get("resolved"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(questions)
}
