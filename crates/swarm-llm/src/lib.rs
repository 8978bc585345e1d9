//! LLM provider abstraction layer for investswarm
//!
//! This crate provides provider-agnostic abstractions for interacting with
//! Large Language Models (LLMs). It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - The Dedalus provider implementation (behind the `dedalus` feature)
//!
//! Search augmentation is requested by server identifier through
//! [`CompletionRequest::mcp_servers`]; the provider executes those tools
//! server-side during generation, so no client-side tool loop exists here.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "dedalus")]
pub mod providers;
