//! Research agent identities and specs
//!
//! Agents are plain configuration records, not a trait hierarchy: each one is
//! a display name, a prompt template, a model identifier, and a set of
//! search-augmentation servers. A single invocation function
//! ([`crate::invoker::invoke_agent`]) runs any of them.

use crate::config::SwarmConfig;
use crate::prompts;
use serde::{Deserialize, Serialize};

/// Identity of a research agent
///
/// These three are fixed: every analysis report carries exactly one result
/// slot per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentId {
    /// Financial statement and valuation research
    Financial,
    /// Market position and product research
    Market,
    /// News, analyst, and social sentiment research
    Sentiment,
}

impl AgentId {
    /// All research agents, in report order
    pub const ALL: [AgentId; 3] = [AgentId::Financial, AgentId::Market, AgentId::Sentiment];

    /// JSON key for this agent in the serialized report
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Financial => "financial",
            AgentId::Market => "market",
            AgentId::Sentiment => "sentiment",
        }
    }

    /// Human-readable agent name for display and provenance
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentId::Financial => "Financial Analysis Agent",
            AgentId::Market => "Market & Product Analysis Agent",
            AgentId::Sentiment => "Sentiment Analysis Agent",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration record for one research agent invocation
#[derive(Debug, Clone)]
pub struct AgentSpec {
    /// Agent identity
    pub id: AgentId,

    /// Human-readable name
    pub display_name: &'static str,

    /// Model identifier to run the agent on
    pub model: String,

    /// Prompt template with a `{ticker}` placeholder
    pub prompt_template: &'static str,

    /// Search-augmentation servers the provider may invoke for this agent
    pub mcp_servers: Vec<String>,
}

impl AgentSpec {
    fn new(id: AgentId, model: String, template: &'static str, mcp_servers: Vec<String>) -> Self {
        Self {
            id,
            display_name: id.display_name(),
            model,
            prompt_template: template,
            mcp_servers,
        }
    }
}

/// Build the three research agent specs from configuration
///
/// Server assignment mirrors each agent's data needs: the financial agent
/// pairs web search with the Yahoo Finance server, market and sentiment lean
/// on semantic search, and sentiment additionally gets Sonar for recent news.
pub fn research_agents(config: &SwarmConfig) -> [AgentSpec; 3] {
    [
        AgentSpec::new(
            AgentId::Financial,
            config.financial_model.clone(),
            prompts::FINANCIAL_RESEARCH,
            vec![
                config.brave_search_mcp.clone(),
                config.yahoo_finance_mcp.clone(),
            ],
        ),
        AgentSpec::new(
            AgentId::Market,
            config.market_model.clone(),
            prompts::MARKET_RESEARCH,
            vec![config.brave_search_mcp.clone(), config.exa_mcp.clone()],
        ),
        AgentSpec::new(
            AgentId::Sentiment,
            config.sentiment_model.clone(),
            prompts::SENTIMENT_RESEARCH,
            vec![
                config.brave_search_mcp.clone(),
                config.exa_mcp.clone(),
                config.sonar_mcp.clone(),
            ],
        ),
    ]
}
