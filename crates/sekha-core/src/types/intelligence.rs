//! Types for the server-side intelligence endpoints: importance scoring,
//! summarization, pruning suggestions, label suggestions, and export.
//!
//! These are passthrough shapes; the scoring and pruning logic itself lives
//! on the server.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Granularity of a generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLevel {
    Daily,
    Weekly,
    Monthly,
}

impl SummaryLevel {
    /// Wire representation, used as a query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl Default for SummaryLevel {
    fn default() -> Self {
        Self::Daily
    }
}

/// Auto-label suggestion for a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSuggestion {
    pub label: String,
    pub confidence: f32,
    pub is_existing: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Pruning recommendation for a stale conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruningSuggestion {
    pub conversation_id: String,
    pub conversation_label: String,
    pub last_accessed: DateTime<Utc>,
    pub message_count: u64,
    pub token_estimate: u64,
    pub importance_score: f32,
    pub preview: String,
    /// "keep" or "archive".
    pub recommendation: String,
}

/// LLM-assigned importance score for a message, 1 through 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportanceScore {
    pub score: f32,
    #[serde(default)]
    pub reasoning: Option<String>,
    pub model: String,
}

/// Generated summary for a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub level: SummaryLevel,
    pub model: String,
    pub tokens_used: u64,
}

/// Output format for conversation export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Json,
}

impl ExportFormat {
    /// Wire representation, used as a query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Markdown
    }
}

/// Body of the export endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub content: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    #[serde(default)]
    pub checks: HashMap<String, serde_json::Value>,
}

/// Descriptor of a tool exposed over the MCP bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Provider-specific fields the SDK does not interpret.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_level_as_str() {
        assert_eq!(SummaryLevel::Daily.as_str(), "daily");
        assert_eq!(SummaryLevel::Monthly.as_str(), "monthly");
    }

    #[test]
    fn test_label_suggestion_decodes() {
        let json = r#"{"label": "rust", "confidence": 0.95, "is_existing": true}"#;
        let s: LabelSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.label, "rust");
        assert!(s.reason.is_none());
    }

    #[test]
    fn test_mcp_tool_keeps_unknown_fields() {
        let json = r#"{"name": "recall", "input_schema": {"type": "object"}}"#;
        let tool: McpTool = serde_json::from_str(json).unwrap();
        assert_eq!(tool.name, "recall");
        assert!(tool.extra.contains_key("input_schema"));
    }

    #[test]
    fn test_export_format_as_str() {
        assert_eq!(ExportFormat::Markdown.as_str(), "markdown");
        assert_eq!(ExportFormat::Json.as_str(), "json");
    }
}
