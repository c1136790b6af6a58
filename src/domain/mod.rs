use serde::{Deserialize, Serialize};

/// Result of an `execute_query` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub success: bool,
    pub rows_affected: u64,
    pub message: String,
}

/// Result of an `optimize_query` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub original_query: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub potential_improvement: String,
}
