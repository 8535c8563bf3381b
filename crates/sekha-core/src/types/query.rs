//! Smart query request/response types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SekhaError, SekhaResult};

/// Maximum number of results a single query may request.
pub const MAX_QUERY_LIMIT: u32 = 1000;

/// Request body for the smart query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<HashMap<String, serde_json::Value>>,
}

impl QueryRequest {
    /// Create a query with server-side default limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            filters: None,
        }
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Attach metadata filters.
    pub fn with_filters(mut self, filters: HashMap<String, serde_json::Value>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Check field constraints before the request goes on the wire.
    pub fn validate(&self) -> SekhaResult<()> {
        if self.query.is_empty() {
            return Err(SekhaError::validation("query must not be empty"));
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_QUERY_LIMIT {
                return Err(SekhaError::validation(format!(
                    "limit must be between 1 and {}",
                    MAX_QUERY_LIMIT
                )));
            }
        }
        Ok(())
    }
}

/// A single search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub conversation_id: String,
    pub message_id: String,
    pub score: f32,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    pub label: String,
    pub folder: String,
    pub timestamp: DateTime<Utc>,
}

/// Assembled context returned by the smart query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<QueryResult>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_query() {
        assert!(QueryRequest::new("").validate().is_err());
    }

    #[test]
    fn test_validate_limit_bounds() {
        assert!(QueryRequest::new("q").with_limit(0).validate().is_err());
        assert!(QueryRequest::new("q")
            .with_limit(MAX_QUERY_LIMIT + 1)
            .validate()
            .is_err());
        assert!(QueryRequest::new("q").with_limit(10).validate().is_ok());
    }

    #[test]
    fn test_unset_fields_skipped_on_wire() {
        let json = serde_json::to_value(QueryRequest::new("rust")).unwrap();
        assert!(json.get("limit").is_none());
        assert!(json.get("filters").is_none());
    }
}
