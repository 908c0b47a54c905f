//! Agent - per-request orchestration
//!
//! One request is processed start-to-finish: build the dataset contexts,
//! classify the intent, dispatch to exactly one strategy, return the
//! aggregated report. No failure on this path aborts the request.

use crate::config::AgentConfig;
use crate::dataset::build_contexts;
use crate::intent::{IntentCategory, IntentClassifier};
use crate::llm::OllamaClient;
use crate::report::AgentResponse;
use crate::sql::StoreClient;
use crate::strategy::{self, StrategyCtx};
use std::path::PathBuf;
use tracing::info;

/// The analytical request agent. Construct once from an explicit
/// configuration object; handle one request at a time.
pub struct Agent {
    config: AgentConfig,
    llm: OllamaClient,
    store: StoreClient,
    classifier: IntentClassifier,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        let llm = OllamaClient::new(&config.llm);
        let store = StoreClient::new(config.database.clone());
        let classifier = IntentClassifier::new(config.llm.fast_model.clone());
        Self {
            config,
            llm,
            store,
            classifier,
        }
    }

    /// Route one request to a strategy and produce its report
    pub async fn handle(&self, request: &str, paths: &[PathBuf]) -> AgentResponse {
        let contexts = build_contexts(paths);

        let classification = self.classifier.classify(&self.llm, request, &contexts).await;
        info!(
            category = %classification.category,
            confidence = classification.confidence,
            "request classified"
        );

        let ctx = StrategyCtx {
            config: &self.config,
            llm: &self.llm,
            store: &self.store,
            request,
            paths,
            contexts: &contexts,
        };

        let mut chart = None;
        let report = match classification.category {
            IntentCategory::Exploration => strategy::explore::run(&ctx).await,
            IntentCategory::WarehouseCreation => strategy::warehouse::run(&ctx).await,
            IntentCategory::Querying => strategy::query::run(&ctx).await,
            IntentCategory::SchemaChange => strategy::schema_ops::run(&ctx).await,
            IntentCategory::DataMutation => strategy::mutation::run(&ctx).await,
            IntentCategory::Visualization => {
                let (report, spec) = strategy::visualize::run(&ctx).await;
                chart = spec;
                report
            }
            IntentCategory::Reporting => strategy::narrative::run(&ctx).await,
            IntentCategory::Unclassified => strategy::fallback::run(&ctx).await,
        };

        AgentResponse {
            report,
            classification,
            chart,
        }
    }

    /// Check whether the model backend is reachable
    pub async fn health_check(&self) -> bool {
        self.llm.health_check().await
    }
}
