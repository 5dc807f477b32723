//! Core data models for the chatkb knowledge base.
//!
//! These types mirror the two SQLite tables: stored question/answer pairs
//! and the log of questions that could not be answered confidently.

/// A stored question/answer pair usable as a future match.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Static weight, 1.0 for entries learned from feedback. Never recomputed.
    pub confidence: f64,
}

/// A logged message that did not match confidently, pending human feedback.
#[derive(Debug, Clone)]
pub struct UnknownQuestion {
    pub id: i64,
    pub question: String,
    pub predicted_answer: Option<String>,
    pub user_feedback: Option<String>,
    /// Similarity score at the time the question was logged.
    pub confidence: f64,
    pub resolved: bool,
    /// Unix timestamp, set at insert.
    pub created_at: i64,
}
