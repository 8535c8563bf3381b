//! Sekha API client implementation.

use reqwest::Method;
use serde_json::json;

use sekha_core::config::ClientConfig;
use sekha_core::error::{SekhaError, SekhaResult};
use sekha_core::types::{
    ConversationResponse, ConversationStatus, ExportFormat, ExportResponse, HealthResponse,
    ImportanceScore, LabelSuggestion, ListConversationsResponse, McpTool, NewConversation,
    PruningSuggestion, QueryRequest, QueryResponse, SummaryLevel, SummaryResponse,
};

use crate::http::Http;
use crate::retry::with_retry;

/// Async client for the Sekha AI memory service.
///
/// Handles authentication, client-side rate limiting, and bounded retry of
/// transient failures. All operations return [`SekhaResult`]; failures are
/// always one of the typed error kinds, never a bare transport error.
pub struct SekhaClient {
    config: ClientConfig,
    http: Http,
}

impl SekhaClient {
    /// Create a new client. Fails on invalid configuration.
    pub fn new(config: ClientConfig) -> SekhaResult<Self> {
        config.validate()?;
        let http = Http::new(&config)?;
        Ok(Self { config, http })
    }

    /// Create a client from `SEKHA_API_KEY` / `SEKHA_BASE_URL`.
    pub fn from_env() -> SekhaResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ============== Conversations ==============

    /// Create a new conversation with messages.
    ///
    /// Retried on transient connection failures; the server deduplicates
    /// creation, so the retry is safe.
    pub async fn create_conversation(
        &self,
        mut conversation: NewConversation,
    ) -> SekhaResult<ConversationResponse> {
        if conversation.label.is_empty() {
            if let Some(default) = &self.config.default_label {
                conversation.label = default.clone();
            }
        }
        conversation.validate()?;

        let body = serde_json::to_value(&conversation)?;
        with_retry(self.config.max_retries, || {
            self.http
                .send(Method::POST, "/api/v1/conversations", &[], Some(&body))
        })
        .await
    }

    /// Get a conversation by ID.
    pub async fn get_conversation(&self, conversation_id: &str) -> SekhaResult<ConversationResponse> {
        let path = format!("/api/v1/conversations/{}", conversation_id);
        with_retry(self.config.max_retries, || {
            self.http.send(Method::GET, &path, &[], None)
        })
        .await
        .map_err(|e| conversation_not_found(e, conversation_id))
    }

    /// List conversations, optionally filtered by label.
    pub async fn list_conversations(
        &self,
        label: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> SekhaResult<Vec<ConversationResponse>> {
        let mut query = vec![("page", page.to_string()), ("page_size", page_size.to_string())];
        if let Some(label) = label {
            query.push(("label", label.to_string()));
        }

        let response: ListConversationsResponse = with_retry(self.config.max_retries, || {
            self.http
                .send(Method::GET, "/api/v1/conversations", &query, None)
        })
        .await?;

        Ok(response.results)
    }

    /// Update a conversation's label and, optionally, its folder.
    pub async fn update_label(
        &self,
        conversation_id: &str,
        new_label: &str,
        new_folder: Option<&str>,
    ) -> SekhaResult<()> {
        let mut body = json!({ "label": new_label });
        if let Some(folder) = new_folder {
            body["folder"] = json!(folder);
        }

        let path = format!("/api/v1/conversations/{}/label", conversation_id);
        self.http
            .send_empty(Method::PUT, &path, &[], Some(&body))
            .await
            .map_err(|e| conversation_not_found(e, conversation_id))
    }

    /// Delete a conversation.
    pub async fn delete_conversation(&self, conversation_id: &str) -> SekhaResult<()> {
        let path = format!("/api/v1/conversations/{}", conversation_id);
        self.http
            .send_empty(Method::DELETE, &path, &[], None)
            .await
            .map_err(|e| conversation_not_found(e, conversation_id))
    }

    /// Set a conversation's lifecycle status.
    pub async fn update_status(
        &self,
        conversation_id: &str,
        status: ConversationStatus,
    ) -> SekhaResult<()> {
        let body = json!({ "status": status.as_str() });
        let path = format!("/api/v1/conversations/{}/status", conversation_id);
        self.http
            .send_empty(Method::PUT, &path, &[], Some(&body))
            .await
            .map_err(|e| conversation_not_found(e, conversation_id))
    }

    /// Pin a conversation.
    pub async fn pin(&self, conversation_id: &str) -> SekhaResult<()> {
        self.update_status(conversation_id, ConversationStatus::Pinned)
            .await
    }

    /// Archive a conversation.
    pub async fn archive(&self, conversation_id: &str) -> SekhaResult<()> {
        self.update_status(conversation_id, ConversationStatus::Archived)
            .await
    }

    // ============== Smart query ==============

    /// Intelligent context assembly over stored conversations.
    pub async fn smart_query(&self, request: QueryRequest) -> SekhaResult<QueryResponse> {
        request.validate()?;
        let body = serde_json::to_value(&request)?;
        with_retry(self.config.max_retries, || {
            self.http
                .send(Method::POST, "/api/v1/query/smart", &[], Some(&body))
        })
        .await
    }

    // ============== Intelligence ==============

    /// Score a message's importance (1 through 10).
    pub async fn score_message_importance(&self, message_id: &str) -> SekhaResult<ImportanceScore> {
        let path = format!("/api/v1/messages/{}/importance", message_id);
        self.http.send(Method::POST, &path, &[], None).await
    }

    /// Generate a hierarchical summary for a conversation.
    pub async fn generate_summary(
        &self,
        conversation_id: &str,
        level: SummaryLevel,
    ) -> SekhaResult<SummaryResponse> {
        let path = format!("/api/v1/conversations/{}/summary", conversation_id);
        let query = [("level", level.as_str().to_string())];
        self.http
            .send(Method::POST, &path, &query, None)
            .await
            .map_err(|e| conversation_not_found(e, conversation_id))
    }

    /// Get pruning suggestions for stale, low-importance conversations.
    pub async fn get_pruning_suggestions(
        &self,
        threshold_days: u32,
        importance_threshold: f32,
    ) -> SekhaResult<Vec<PruningSuggestion>> {
        let query = [
            ("threshold_days", threshold_days.to_string()),
            ("importance_threshold", importance_threshold.to_string()),
        ];
        with_retry(self.config.max_retries, || {
            self.http
                .send(Method::GET, "/api/v1/prune/suggestions", &query, None)
        })
        .await
    }

    /// Get auto-label suggestions for a conversation.
    pub async fn suggest_labels(&self, conversation_id: &str) -> SekhaResult<Vec<LabelSuggestion>> {
        let path = format!("/api/v1/conversations/{}/suggest-labels", conversation_id);
        self.http
            .send(Method::POST, &path, &[], None)
            .await
            .map_err(|e| conversation_not_found(e, conversation_id))
    }

    /// Apply the first label suggestion whose confidence meets `threshold`.
    ///
    /// Returns the applied label, or `None` when no suggestion qualifies.
    /// This is two independent calls with no transaction between them: if
    /// the label update fails, the suggestion call is not rolled back.
    pub async fn auto_label(
        &self,
        conversation_id: &str,
        threshold: f32,
    ) -> SekhaResult<Option<String>> {
        let suggestions = self.suggest_labels(conversation_id).await?;

        for suggestion in suggestions {
            if suggestion.confidence >= threshold {
                self.update_label(conversation_id, &suggestion.label, None)
                    .await?;
                return Ok(Some(suggestion.label));
            }
        }

        Ok(None)
    }

    // ============== Export ==============

    /// Export conversations, optionally filtered by label.
    ///
    /// Returns the exported content as a string in the requested format.
    pub async fn export(&self, label: Option<&str>, format: ExportFormat) -> SekhaResult<String> {
        let mut query = vec![("format", format.as_str().to_string())];
        if let Some(label) = label {
            query.push(("label", label.to_string()));
        }

        let response: ExportResponse = with_retry(self.config.max_retries, || {
            self.http.send(Method::GET, "/api/v1/export", &query, None)
        })
        .await?;

        Ok(response.content)
    }

    // ============== Service ==============

    /// Check server health.
    pub async fn health(&self) -> SekhaResult<HealthResponse> {
        with_retry(self.config.max_retries, || {
            self.http.send(Method::GET, "/api/v1/health", &[], None)
        })
        .await
    }

    /// List tools available over the MCP bridge.
    pub async fn mcp_tools(&self) -> SekhaResult<Vec<McpTool>> {
        with_retry(self.config.max_retries, || {
            self.http.send(Method::GET, "/mcp/tools", &[], None)
        })
        .await
    }
}

/// Name the missing conversation in a not-found error.
fn conversation_not_found(err: SekhaError, conversation_id: &str) -> SekhaError {
    match err {
        SekhaError::NotFound { .. } => {
            SekhaError::not_found(format!("conversation {}", conversation_id))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::new("bad-key");
        assert!(matches!(
            SekhaClient::new(config),
            Err(SekhaError::Configuration(_))
        ));
    }

    #[test]
    fn test_not_found_gets_renamed() {
        let err = conversation_not_found(SekhaError::from_http_status(404, ""), "conv-9");
        assert!(err.to_string().contains("conv-9"));

        let err = conversation_not_found(SekhaError::api(500, "boom"), "conv-9");
        assert!(matches!(err, SekhaError::Api { status: 500, .. }));
    }
}
