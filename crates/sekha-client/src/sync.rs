//! Blocking wrapper over [`SekhaClient`].
//!
//! One hand-written blocking method per async operation, so the surface
//! stays statically typed; no runtime dispatch.

use tokio::runtime::{Builder, Runtime};

use sekha_core::config::ClientConfig;
use sekha_core::error::{SekhaError, SekhaResult};
use sekha_core::types::{
    ConversationResponse, ConversationStatus, ExportFormat, HealthResponse, ImportanceScore,
    LabelSuggestion, McpTool, NewConversation, PruningSuggestion, QueryRequest, QueryResponse,
    SummaryLevel, SummaryResponse,
};

use crate::client::SekhaClient;

/// Blocking client for the Sekha AI memory service.
///
/// Owns a current-thread runtime and runs each operation to completion.
/// Do not use from inside an async context; use [`SekhaClient`] there.
pub struct SyncSekhaClient {
    runtime: Runtime,
    inner: SekhaClient,
}

impl SyncSekhaClient {
    /// Create a new blocking client. Fails on invalid configuration.
    pub fn new(config: ClientConfig) -> SekhaResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SekhaError::Configuration(format!("Failed to build runtime: {}", e)))?;
        let inner = SekhaClient::new(config)?;
        Ok(Self { runtime, inner })
    }

    /// Create a client from `SEKHA_API_KEY` / `SEKHA_BASE_URL`.
    pub fn from_env() -> SekhaResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a new conversation with messages.
    pub fn create_conversation(
        &self,
        conversation: NewConversation,
    ) -> SekhaResult<ConversationResponse> {
        self.runtime
            .block_on(self.inner.create_conversation(conversation))
    }

    /// Get a conversation by ID.
    pub fn get_conversation(&self, conversation_id: &str) -> SekhaResult<ConversationResponse> {
        self.runtime
            .block_on(self.inner.get_conversation(conversation_id))
    }

    /// List conversations, optionally filtered by label.
    pub fn list_conversations(
        &self,
        label: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> SekhaResult<Vec<ConversationResponse>> {
        self.runtime
            .block_on(self.inner.list_conversations(label, page, page_size))
    }

    /// Update a conversation's label and, optionally, its folder.
    pub fn update_label(
        &self,
        conversation_id: &str,
        new_label: &str,
        new_folder: Option<&str>,
    ) -> SekhaResult<()> {
        self.runtime
            .block_on(self.inner.update_label(conversation_id, new_label, new_folder))
    }

    /// Delete a conversation.
    pub fn delete_conversation(&self, conversation_id: &str) -> SekhaResult<()> {
        self.runtime
            .block_on(self.inner.delete_conversation(conversation_id))
    }

    /// Set a conversation's lifecycle status.
    pub fn update_status(
        &self,
        conversation_id: &str,
        status: ConversationStatus,
    ) -> SekhaResult<()> {
        self.runtime
            .block_on(self.inner.update_status(conversation_id, status))
    }

    /// Pin a conversation.
    pub fn pin(&self, conversation_id: &str) -> SekhaResult<()> {
        self.runtime.block_on(self.inner.pin(conversation_id))
    }

    /// Archive a conversation.
    pub fn archive(&self, conversation_id: &str) -> SekhaResult<()> {
        self.runtime.block_on(self.inner.archive(conversation_id))
    }

    /// Intelligent context assembly over stored conversations.
    pub fn smart_query(&self, request: QueryRequest) -> SekhaResult<QueryResponse> {
        self.runtime.block_on(self.inner.smart_query(request))
    }

    /// Score a message's importance (1 through 10).
    pub fn score_message_importance(&self, message_id: &str) -> SekhaResult<ImportanceScore> {
        self.runtime
            .block_on(self.inner.score_message_importance(message_id))
    }

    /// Generate a hierarchical summary for a conversation.
    pub fn generate_summary(
        &self,
        conversation_id: &str,
        level: SummaryLevel,
    ) -> SekhaResult<SummaryResponse> {
        self.runtime
            .block_on(self.inner.generate_summary(conversation_id, level))
    }

    /// Get pruning suggestions for stale, low-importance conversations.
    pub fn get_pruning_suggestions(
        &self,
        threshold_days: u32,
        importance_threshold: f32,
    ) -> SekhaResult<Vec<PruningSuggestion>> {
        self.runtime.block_on(
            self.inner
                .get_pruning_suggestions(threshold_days, importance_threshold),
        )
    }

    /// Get auto-label suggestions for a conversation.
    pub fn suggest_labels(&self, conversation_id: &str) -> SekhaResult<Vec<LabelSuggestion>> {
        self.runtime
            .block_on(self.inner.suggest_labels(conversation_id))
    }

    /// Apply the first label suggestion whose confidence meets `threshold`.
    pub fn auto_label(
        &self,
        conversation_id: &str,
        threshold: f32,
    ) -> SekhaResult<Option<String>> {
        self.runtime
            .block_on(self.inner.auto_label(conversation_id, threshold))
    }

    /// Export conversations, optionally filtered by label.
    pub fn export(&self, label: Option<&str>, format: ExportFormat) -> SekhaResult<String> {
        self.runtime.block_on(self.inner.export(label, format))
    }

    /// Check server health.
    pub fn health(&self) -> SekhaResult<HealthResponse> {
        self.runtime.block_on(self.inner.health())
    }

    /// List tools available over the MCP bridge.
    pub fn mcp_tools(&self) -> SekhaResult<Vec<McpTool>> {
        self.runtime.block_on(self.inner.mcp_tools())
    }
}
