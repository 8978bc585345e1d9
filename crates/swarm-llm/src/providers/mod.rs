//! Concrete LLM provider implementations

pub mod dedalus;

pub use dedalus::{DedalusConfig, DedalusProvider};
