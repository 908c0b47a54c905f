//! # Datalyst
//!
//! An analytical request agent over uploaded tabular datasets.
//!
//! A free-text request is classified into one of seven intents (with a
//! deterministic keyword fallback when the model is unavailable), routed
//! to a report strategy, and any SQL the model proposes is extracted from
//! fenced blocks and executed statement by statement against PostgreSQL.
//! Every failure mode degrades to a partial or explanatory report; no
//! error aborts a request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datalyst::{Agent, AgentConfig};
//!
//! # async fn demo() {
//! let agent = Agent::new(AgentConfig::default());
//! let response = agent.handle("show the columns", &[]).await;
//! println!("{}", response.report);
//! # }
//! ```

// Internal modules
pub mod agent;
pub mod config;
pub mod dataset;
pub mod error;
pub mod intent;
pub mod llm;
pub mod report;
pub mod sql;
pub mod strategy;

// Public API - Main types users need
pub use agent::Agent;
pub use config::{AgentConfig, DbConfig, LlmConfig};
pub use report::AgentResponse;

// Re-export commonly used types
pub use dataset::{ColumnType, Dataset};
pub use error::{AgentError, AgentResult};
pub use intent::{IntentCategory, IntentClassification};
pub use sql::{BatchOutcome, SqlOutcome};
pub use strategy::visualize::ChartSpec;
