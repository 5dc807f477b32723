//! # chatkb
//!
//! A self-learning chat answering service backed by SQLite.
//!
//! Incoming messages are matched against stored question/answer pairs
//! using TF-IDF cosine similarity. A confident match returns the stored
//! answer; anything below the threshold is logged as an unknown question
//! and answered with a placeholder asking the user to teach the correct
//! answer, which then becomes a new knowledge entry.
//!
//! ```text
//! message ──▶ Matcher ──▶ confident? ──▶ stored answer
//!                │
//!                └─ no ──▶ Predictor + unknown-question log
//!                              │
//!              feedback ───────┴──▶ new knowledge entry
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`store`] | CRUD over the two tables |
//! | [`matcher`] | TF-IDF cosine-similarity matching |
//! | [`learning`] | Unknown-question log and feedback workflow |
//! | [`predictor`] | Placeholder answer prediction |
//! | [`server`] | HTTP server (`/chat`, `/feedback`, `/health`) |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |

pub mod ask;
pub mod config;
pub mod db;
pub mod learning;
pub mod matcher;
pub mod migrate;
pub mod models;
pub mod pending;
pub mod predictor;
pub mod server;
pub mod stats;
pub mod store;
pub mod teach;
