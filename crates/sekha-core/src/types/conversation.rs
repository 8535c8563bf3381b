//! Conversation types for the Sekha API.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SekhaError, SekhaResult};
use crate::types::message::MessageDto;

/// Maximum length of a conversation label or folder path.
pub const MAX_LABEL_LEN: usize = 200;

/// Lifecycle status of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Archived,
    Pinned,
}

impl ConversationStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Pinned => "pinned",
        }
    }
}

impl Default for ConversationStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Request body for creating a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConversation {
    pub label: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    pub messages: Vec<MessageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

fn default_folder() -> String {
    "/".to_string()
}

impl NewConversation {
    /// Create a new conversation request with the root folder.
    pub fn new(label: impl Into<String>, messages: Vec<MessageDto>) -> Self {
        Self {
            label: label.into(),
            folder: default_folder(),
            messages,
            metadata: None,
        }
    }

    /// Set the folder path.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check field constraints before the request goes on the wire.
    pub fn validate(&self) -> SekhaResult<()> {
        if self.label.is_empty() {
            return Err(SekhaError::validation("label must not be empty"));
        }
        if self.label.len() > MAX_LABEL_LEN {
            return Err(SekhaError::validation(format!(
                "label exceeds {} characters",
                MAX_LABEL_LEN
            )));
        }
        if self.folder.len() > MAX_LABEL_LEN {
            return Err(SekhaError::validation(format!(
                "folder exceeds {} characters",
                MAX_LABEL_LEN
            )));
        }
        if self.messages.is_empty() {
            return Err(SekhaError::validation(
                "conversation requires at least one message",
            ));
        }
        Ok(())
    }
}

/// Conversation as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub label: String,
    pub folder: String,
    pub status: ConversationStatus,
    pub message_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Paged list of conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConversationsResponse {
    #[serde(default)]
    pub results: Vec<ConversationResponse>,
}
