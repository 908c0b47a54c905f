//! Report Strategies - the seven peer handlers plus the default
//!
//! Each strategy consumes the datasets and/or the store and produces a
//! markdown report; none of them ever fails the request.

pub mod explore;
pub mod fallback;
pub mod mutation;
pub mod narrative;
pub mod query;
pub mod schema_ops;
pub mod visualize;
pub mod warehouse;

use crate::config::AgentConfig;
use crate::dataset::ContextEntry;
use crate::llm::OllamaClient;
use crate::sql::StoreClient;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Shared view of one request, handed to the selected strategy
pub(crate) struct StrategyCtx<'a> {
    pub config: &'a AgentConfig,
    pub llm: &'a OllamaClient,
    pub store: &'a StoreClient,
    pub request: &'a str,
    pub paths: &'a [PathBuf],
    pub contexts: &'a BTreeMap<String, ContextEntry>,
}
