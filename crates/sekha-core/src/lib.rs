//! sekha-core - Core types for the Sekha SDK.
//!
//! This crate provides the request/response types, error taxonomy, and
//! configuration shared by the Sekha client crates.

pub mod config;
pub mod error;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ErrorCode, SekhaError, SekhaResult};
pub use types::{
    ConversationResponse, ConversationStatus, ExportFormat, HealthResponse, ImportanceScore,
    LabelSuggestion, McpTool, MessageDto, MessageRole, NewConversation, PruningSuggestion,
    QueryRequest, QueryResponse, QueryResult, SummaryLevel, SummaryResponse,
};
