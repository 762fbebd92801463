//! Capability catalog: the closed set of ADK tools an LLM agent can be granted.
//!
//! Identifiers are emitted verbatim as import tokens in generated code, so they
//! must never change once published.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    GoogleSearch,
    GoogleCodeExecution,
    VertexAiRagRetrieval,
    VertexAiSearch,
    BigqueryListDatasetIds,
    BigqueryGetDatasetInfo,
    BigqueryListTableIds,
    BigqueryGetTableInfo,
    BigqueryExecuteSql,
    BigqueryForecast,
    BigqueryAskDataInsights,
    SpannerListTableNames,
    SpannerGetTableSchema,
    SpannerExecuteSql,
    SpannerSimilaritySearch,
    BigtableListInstances,
    BigtableGetInstanceInfo,
    BigtableListTables,
    BigtableGetTableInfo,
    BigtableExecuteSql,
    GkeCodeExecutor,
}

/// Catalog entries in display order: (capability, identifier, description).
const CATALOG: &[(Capability, &str, &str)] = &[
    (
        Capability::GoogleSearch,
        "google_search",
        "Web searches using Google Search",
    ),
    (
        Capability::GoogleCodeExecution,
        "google_code_execution",
        "Execute code for calculations and data manipulation",
    ),
    (
        Capability::VertexAiRagRetrieval,
        "vertex_ai_rag_retrieval",
        "Private data retrieval using Vertex AI RAG Engine",
    ),
    (
        Capability::VertexAiSearch,
        "vertex_ai_search",
        "Search across private data stores via Vertex AI",
    ),
    (
        Capability::BigqueryListDatasetIds,
        "bigquery_list_dataset_ids",
        "List BigQuery dataset IDs",
    ),
    (
        Capability::BigqueryGetDatasetInfo,
        "bigquery_get_dataset_info",
        "Get BigQuery dataset information",
    ),
    (
        Capability::BigqueryListTableIds,
        "bigquery_list_table_ids",
        "List BigQuery table IDs",
    ),
    (
        Capability::BigqueryGetTableInfo,
        "bigquery_get_table_info",
        "Get BigQuery table information",
    ),
    (
        Capability::BigqueryExecuteSql,
        "bigquery_execute_sql",
        "Execute SQL queries on BigQuery",
    ),
    (
        Capability::BigqueryForecast,
        "bigquery_forecast",
        "BigQuery forecasting capabilities",
    ),
    (
        Capability::BigqueryAskDataInsights,
        "bigquery_ask_data_insights",
        "Ask data insights from BigQuery",
    ),
    (
        Capability::SpannerListTableNames,
        "spanner_list_table_names",
        "List Cloud Spanner table names",
    ),
    (
        Capability::SpannerGetTableSchema,
        "spanner_get_table_schema",
        "Get Cloud Spanner table schema",
    ),
    (
        Capability::SpannerExecuteSql,
        "spanner_execute_sql",
        "Execute SQL queries on Cloud Spanner",
    ),
    (
        Capability::SpannerSimilaritySearch,
        "spanner_similarity_search",
        "Similarity search on Cloud Spanner",
    ),
    (
        Capability::BigtableListInstances,
        "bigtable_list_instances",
        "List Bigtable instances",
    ),
    (
        Capability::BigtableGetInstanceInfo,
        "bigtable_get_instance_info",
        "Get Bigtable instance information",
    ),
    (
        Capability::BigtableListTables,
        "bigtable_list_tables",
        "List Bigtable tables",
    ),
    (
        Capability::BigtableGetTableInfo,
        "bigtable_get_table_info",
        "Get Bigtable table information",
    ),
    (
        Capability::BigtableExecuteSql,
        "bigtable_execute_sql",
        "Execute SQL queries on Bigtable",
    ),
    (
        Capability::GkeCodeExecutor,
        "gke_code_executor",
        "Secure code execution in GKE sandboxed environments",
    ),
];

impl Capability {
    pub fn id(self) -> &'static str {
        entry(self).1
    }

    pub fn description(self) -> &'static str {
        entry(self).2
    }

    pub fn from_id(id: &str) -> Option<Capability> {
        let trimmed = id.trim();
        CATALOG
            .iter()
            .find(|(_, candidate, _)| *candidate == trimmed)
            .map(|(capability, _, _)| *capability)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn entry(capability: Capability) -> &'static (Capability, &'static str, &'static str) {
    // Every variant has exactly one row; the catalog test guards this.
    CATALOG
        .iter()
        .find(|(candidate, _, _)| *candidate == capability)
        .unwrap_or(&CATALOG[0])
}

/// Every capability in stable display order.
pub fn list_all() -> Vec<Capability> {
    CATALOG.iter().map(|(capability, _, _)| *capability).collect()
}

/// Description for a raw identifier; empty when the identifier is unknown.
pub fn describe(id: &str) -> &'static str {
    Capability::from_id(id)
        .map(Capability::description)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_identifiers_are_unique_and_cover_every_variant() {
        let ids = CATALOG
            .iter()
            .map(|(_, id, _)| *id)
            .collect::<BTreeSet<&str>>();
        assert_eq!(ids.len(), CATALOG.len());

        let variants = list_all().into_iter().collect::<BTreeSet<Capability>>();
        assert_eq!(variants.len(), 21);
        for capability in variants {
            assert_eq!(Capability::from_id(capability.id()), Some(capability));
            assert!(!capability.description().is_empty());
        }
    }

    #[test]
    fn list_all_keeps_catalog_order() {
        let all = list_all();
        assert_eq!(all.first(), Some(&Capability::GoogleSearch));
        assert_eq!(all.last(), Some(&Capability::GkeCodeExecutor));
        assert_eq!(all[8].id(), "bigquery_execute_sql");
    }

    #[test]
    fn describe_returns_empty_for_unknown_ids() {
        assert_eq!(describe("google_search"), "Web searches using Google Search");
        assert_eq!(describe("not_a_tool"), "");
        assert_eq!(describe(""), "");
    }

    #[test]
    fn serde_uses_catalog_identifier() {
        let json = serde_json::to_string(&Capability::BigqueryExecuteSql).expect("serialize");
        assert_eq!(json, "\"bigquery_execute_sql\"");
        let parsed: Capability =
            serde_json::from_str("\"vertex_ai_rag_retrieval\"").expect("deserialize");
        assert_eq!(parsed, Capability::VertexAiRagRetrieval);
    }
}
