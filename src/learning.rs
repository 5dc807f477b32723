//! Learning workflow: logging unanswered questions and folding user
//! feedback back into the knowledge base.
//!
//! `record_unknown` is a single insert; `apply_feedback` inserts the new
//! knowledge entry and resolves the logged questions in one transaction,
//! so either both writes persist or neither does.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::store;

/// Outcome of a feedback submission. Maps 1:1 onto the `/feedback`
/// response body.
#[derive(Debug)]
pub struct FeedbackOutcome {
    pub status: FeedbackStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    Success,
    Error,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Success => "success",
            FeedbackStatus::Error => "error",
        }
    }
}

impl FeedbackOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: FeedbackStatus::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: FeedbackStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FeedbackStatus::Success
    }
}

/// Logs a question that could not be answered confidently. No-op for
/// empty/whitespace questions. No deduplication: repeated unanswered
/// questions create repeated rows.
pub async fn record_unknown(
    pool: &SqlitePool,
    question: &str,
    predicted_answer: &str,
    confidence: f64,
) -> Result<()> {
    if question.trim().is_empty() {
        return Ok(());
    }

    store::insert_unknown_question(pool, question, predicted_answer, confidence).await?;
    Ok(())
}

/// Adds a knowledge entry from user feedback and marks every unresolved
/// unknown-question row with the same question text as resolved.
///
/// Validation failures (empty inputs, feedback shorter than 3 trimmed
/// characters) return an error outcome without touching the database.
/// Database failures propagate to the caller.
pub async fn apply_feedback(
    pool: &SqlitePool,
    question: &str,
    feedback: &str,
) -> Result<FeedbackOutcome> {
    let question = question.trim();
    let feedback = feedback.trim();

    if question.is_empty() || feedback.is_empty() {
        return Ok(FeedbackOutcome::error("Question and feedback are required"));
    }

    if feedback.chars().count() < 3 {
        return Ok(FeedbackOutcome::error("Feedback is too short"));
    }

    let mut tx = pool.begin().await?;
    store::insert_knowledge_entry(&mut tx, question, feedback, 1.0).await?;
    store::resolve_unknown_questions(&mut tx, question, feedback).await?;
    tx.commit().await?;

    Ok(FeedbackOutcome::success("Thank you! I've learned this."))
}
