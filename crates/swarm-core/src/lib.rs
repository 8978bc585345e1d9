//! Multi-agent stock analysis coordination
//!
//! A ticker fans out to three specialized research agents (financial, market,
//! sentiment) that run concurrently against an LLM provider; their outputs
//! are handed to a judge that drafts a verdict on one model and finalizes it
//! on a second. The terminal artifact is an [`AnalysisReport`].
//!
//! Failure isolation is the central design rule: agent and judge errors are
//! captured in per-call result records, never propagated, so every run that
//! passes request validation produces a complete structured report.
//!
//! ```no_run
//! use std::sync::Arc;
//! use swarm_core::{Swarm, SwarmConfig};
//! use swarm_llm::providers::DedalusProvider;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = Arc::new(DedalusProvider::from_env()?);
//! let swarm = Swarm::new(provider, SwarmConfig::default())?;
//! let report = swarm.analyze("TSLA").await?;
//! println!("{}", report.verdict.verdict);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod invoker;
pub mod judge;
pub mod prompts;
pub mod report;
pub mod swarm;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use agents::{AgentId, AgentSpec, research_agents};
pub use config::SwarmConfig;
pub use coordinator::{NoProgress, ResearchProgress, run_research};
pub use error::{Result, SwarmError};
pub use invoker::invoke_agent;
pub use judge::synthesize_verdict;
pub use report::{
    AgentResult, AnalysisReport, AnalysisRequest, CallStatus, OverallStatus, ResearchResults,
    VerdictResult, assemble,
};
pub use swarm::Swarm;
