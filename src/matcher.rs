//! Similarity matching between an incoming message and stored questions.
//!
//! Builds a TF-IDF term-weighted vector space over the stored questions
//! plus the incoming message, scores every stored question by cosine
//! similarity, and picks the maximum. The space is rebuilt from scratch on
//! every call; nothing is shared across requests.

use std::collections::{HashMap, HashSet};

use crate::models::KnowledgeEntry;

/// Finds the stored answer whose question is most similar to `message`.
///
/// Returns `(None, 0.0)` when the knowledge base is empty, the message is
/// empty/whitespace-only, or the message yields no usable terms. Otherwise
/// returns the best answer together with its similarity score in `[0, 1]`.
/// Ties keep the first occurrence in knowledge-base order.
pub fn find_best_answer(entries: &[KnowledgeEntry], message: &str) -> (Option<String>, f64) {
    if entries.is_empty() || message.trim().is_empty() {
        return (None, 0.0);
    }

    let query_terms = tokenize(message);
    if query_terms.is_empty() {
        // Degenerate vocabulary (e.g. punctuation only): no match.
        return (None, 0.0);
    }

    let question_terms: Vec<Vec<String>> = entries.iter().map(|e| tokenize(&e.question)).collect();

    // Document frequency over all stored questions plus the message itself.
    let n_docs = question_terms.len() + 1;
    let mut df: HashMap<&str, usize> = HashMap::new();
    for terms in question_terms.iter().chain(std::iter::once(&query_terms)) {
        let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
    let mut vocab: HashMap<&str, usize> = HashMap::new();
    let mut idf: Vec<f64> = Vec::with_capacity(df.len());
    for (&term, &count) in &df {
        vocab.insert(term, idf.len());
        idf.push(((1.0 + n_docs as f64) / (1.0 + count as f64)).ln() + 1.0);
    }

    let query_vec = tf_idf_vector(&query_terms, &vocab, &idf);

    let mut best_index = 0usize;
    let mut best_score = f64::NEG_INFINITY;
    for (i, terms) in question_terms.iter().enumerate() {
        let question_vec = tf_idf_vector(terms, &vocab, &idf);
        let score = cosine_similarity(&query_vec, &question_vec);
        if score > best_score {
            best_score = score;
            best_index = i;
        }
    }

    (Some(entries[best_index].answer.clone()), best_score)
}

/// Lowercase alphanumeric tokenization. Single-character tokens are kept
/// so that messages like "2+2" still carry usable terms.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn tf_idf_vector(terms: &[String], vocab: &HashMap<&str, usize>, idf: &[f64]) -> Vec<f64> {
    let mut vec = vec![0.0; idf.len()];
    for term in terms {
        if let Some(&i) = vocab.get(term.as_str()) {
            vec[i] += idf[i];
        }
    }
    vec
}

/// Compute cosine similarity between two term-weight vectors.
///
/// Returns `0.0` for empty vectors, vectors of different lengths, or when
/// either vector has no weight.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}
