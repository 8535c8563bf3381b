//! sekha-client - Async client for the Sekha AI memory service.
//!
//! This crate provides a typed client over the Sekha HTTP API with bearer
//! authentication, client-side rate limiting, and bounded retry of
//! transient failures.
//!
//! # Example
//!
//! ```ignore
//! use sekha_client::{SekhaClient, ClientConfig};
//! use sekha_client::types::{MessageDto, NewConversation, QueryRequest};
//!
//! let config = ClientConfig::new("sk-sekha-...");
//! let client = SekhaClient::new(config)?;
//!
//! // Store a conversation
//! let conv = client
//!     .create_conversation(NewConversation::new(
//!         "rust help",
//!         vec![MessageDto::user("how do lifetimes work?")],
//!     ))
//!     .await?;
//!
//! // Query assembled context
//! let context = client.smart_query(QueryRequest::new("lifetimes")).await?;
//!
//! // Pin it for later
//! client.pin(&conv.id).await?;
//! ```

mod client;
mod http;
mod sync;

pub mod backoff;
pub mod limiter;
pub mod retry;

pub use client::SekhaClient;
pub use sync::SyncSekhaClient;

pub use sekha_core::config::ClientConfig;
pub use sekha_core::error::{ErrorCode, SekhaError, SekhaResult};
pub use sekha_core::types;
