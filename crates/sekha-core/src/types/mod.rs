//! Request and response types for the Sekha API.

pub mod conversation;
pub mod intelligence;
pub mod message;
pub mod query;

pub use conversation::{
    ConversationResponse, ConversationStatus, ListConversationsResponse, NewConversation,
    MAX_LABEL_LEN,
};
pub use intelligence::{
    ExportFormat, ExportResponse, HealthResponse, ImportanceScore, LabelSuggestion, McpTool,
    PruningSuggestion, SummaryLevel, SummaryResponse,
};
pub use message::{MessageDto, MessageRole};
pub use query::{QueryRequest, QueryResponse, QueryResult, MAX_QUERY_LIMIT};
