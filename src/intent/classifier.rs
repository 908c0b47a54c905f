//! Intent Classifier - Model-backed classification with keyword fallback
//!
//! The primary path asks the model for a minimal JSON object. Whenever the
//! call fails or the payload cannot be parsed, an ordered keyword scan over
//! the lower-cased request decides instead. This component never fails and
//! always yields exactly one classification.

use crate::dataset::context::{self, ContextEntry};
use crate::error::AgentResult;
use crate::intent::{IntentCategory, IntentClassification};
use crate::llm::OllamaClient;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Confidence reported when no trigger keyword matches
const UNCLASSIFIED_CONFIDENCE: f64 = 0.6;

/// Trigger vocabularies in fixed priority order; the first matching
/// category wins. Substring membership against the lower-cased request,
/// keeping the original Portuguese terms alongside English equivalents.
const FALLBACK_RULES: &[(IntentCategory, f64, &[&str])] = &[
    (
        IntentCategory::Exploration,
        0.8,
        &["coluna", "column", "estrutura", "structure", "amostra", "sample", "analise", "explor"],
    ),
    (
        IntentCategory::WarehouseCreation,
        0.9,
        &["dw", "data warehouse", "warehouse", "modelo", "etl", "carregar", "star schema"],
    ),
    (
        IntentCategory::Querying,
        0.85,
        &["select", "query", "consultar", "filtrar", "filter", "agrupar", "aggregate"],
    ),
    (
        IntentCategory::SchemaChange,
        0.9,
        &["create", "alter", "drop", "tabela", "table", "índice", "index"],
    ),
    (
        IntentCategory::DataMutation,
        0.9,
        &["insert", "update", "delete", "atualizar", "incluir"],
    ),
    (
        IntentCategory::Visualization,
        0.8,
        &["gráfico", "grafico", "chart", "plot", "visualizar", "visualize", "dashboard"],
    ),
    (
        IntentCategory::Reporting,
        0.8,
        &["relatório", "relatorio", "report", "análise", "analise", "analysis", "insight"],
    ),
];

/// Classifies a request into one of the seven categories
pub struct IntentClassifier {
    /// Model used for classification calls (the configured fast model)
    model: String,
}

impl IntentClassifier {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }

    /// Classify a request. Guaranteed to return exactly one classification
    /// even when the model is unavailable or replies with garbage.
    pub async fn classify(
        &self,
        client: &OllamaClient,
        request: &str,
        contexts: &BTreeMap<String, ContextEntry>,
    ) -> IntentClassification {
        match self.classify_with_model(client, request, contexts).await {
            Ok(classification) => {
                debug!(category = %classification.category, "model classification accepted");
                classification
            }
            Err(e) => {
                warn!(error = %e, "model classification failed, using keyword fallback");
                fallback_classify(request)
            }
        }
    }

    async fn classify_with_model(
        &self,
        client: &OllamaClient,
        request: &str,
        contexts: &BTreeMap<String, ContextEntry>,
    ) -> AgentResult<IntentClassification> {
        let prompt = self.build_prompt(request, contexts);
        let mut classification: IntentClassification =
            client.generate_json(&prompt, Some(&self.model)).await?;
        classification.confidence = classification.confidence.clamp(0.0, 1.0);
        Ok(classification)
    }

    fn build_prompt(&self, request: &str, contexts: &BTreeMap<String, ContextEntry>) -> String {
        format!(
            r#"Analyze the user request and classify its main intent.

REQUEST: "{}"

DATA CONTEXT: {}

Classify into exactly one of these categories:

1. exploration - explore the data: columns, samples, basic statistics
2. warehouse_creation - build a data warehouse: modeling, tables, ETL
3. querying - run SELECT queries, filters, aggregations
4. schema_change - DDL operations: CREATE, ALTER, DROP
5. data_mutation - DML operations: INSERT, UPDATE, DELETE
6. visualization - charts, dashboards, plots
7. reporting - structured reports, narrative analysis

Reply with JSON only, nothing else:
{{
    "category": "category_name",
    "confidence": 0.9,
    "rationale": "short explanation"
}}
"#,
            request,
            context::to_json(contexts)
        )
    }
}

/// Deterministic keyword fallback. The first category whose trigger
/// vocabulary matches wins; no match yields the unclassified default.
pub fn fallback_classify(request: &str) -> IntentClassification {
    let request = request.to_lowercase();

    for (category, confidence, triggers) in FALLBACK_RULES {
        if let Some(trigger) = triggers.iter().find(|t| request.contains(*t)) {
            return IntentClassification {
                category: *category,
                confidence: *confidence,
                rationale: format!("trigger keyword '{}' matched", trigger),
            };
        }
    }

    IntentClassification {
        category: IntentCategory::Unclassified,
        confidence: UNCLASSIFIED_CONFIDENCE,
        rationale: "no trigger keyword matched; using the default process".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trigger_selects_its_category() {
        let cases = [
            ("mostre as colunas do arquivo", IntentCategory::Exploration),
            ("build a data warehouse from these files", IntentCategory::WarehouseCreation),
            ("select os dez maiores valores", IntentCategory::Querying),
            ("drop the temporary data", IntentCategory::SchemaChange),
            ("insert a new row", IntentCategory::DataMutation),
            ("plot the distribution", IntentCategory::Visualization),
            ("give me a report of the findings", IntentCategory::Reporting),
        ];
        for (request, expected) in cases {
            assert_eq!(fallback_classify(request).category, expected, "{}", request);
        }
    }

    #[test]
    fn test_no_trigger_yields_unclassified_default() {
        let classification = fallback_classify("hello there");
        assert_eq!(classification.category, IntentCategory::Unclassified);
        assert_eq!(classification.confidence, 0.6);
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        // "analise" appears in both the exploration and reporting
        // vocabularies; exploration is evaluated first.
        let classification = fallback_classify("faça uma analise dos dados");
        assert_eq!(classification.category, IntentCategory::Exploration);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let classification = fallback_classify("SELECT * FROM sales");
        assert_eq!(classification.category, IntentCategory::Querying);
    }

    #[test]
    fn test_unknown_model_label_fails_the_parse() {
        // an out-of-vocabulary label must not classify; the caller falls
        // back to the keyword scan instead
        let raw = r#"{"category": "something_else", "confidence": 0.4, "rationale": "?"}"#;
        assert!(serde_json::from_str::<IntentClassification>(raw).is_err());
    }

    #[test]
    fn test_known_model_label_parses() {
        let raw = r#"{"category": "warehouse_creation", "confidence": 0.9, "rationale": "dw"}"#;
        let parsed: IntentClassification = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.category, IntentCategory::WarehouseCreation);
    }
}
