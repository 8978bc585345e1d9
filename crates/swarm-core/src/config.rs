//! Configuration for swarm analysis runs

use crate::error::{Result, SwarmError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a swarm analysis run
///
/// Models are Dedalus-style `vendor/model` identifiers. The MCP fields name
/// hosted search-augmentation servers that research agents may let the
/// provider invoke during generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Model for the financial research agent
    pub financial_model: String,

    /// Model for the market & product research agent
    pub market_model: String,

    /// Model for the sentiment research agent
    pub sentiment_model: String,

    /// Model that drafts the verdict (judge stage 1)
    pub judge_draft_model: String,

    /// Model that finalizes the verdict from the draft (judge stage 2)
    pub judge_final_model: String,

    /// Brave Search MCP server identifier
    pub brave_search_mcp: String,

    /// Exa semantic search MCP server identifier
    pub exa_mcp: String,

    /// Perplexity Sonar MCP server identifier
    pub sonar_mcp: String,

    /// Yahoo Finance MCP server identifier
    pub yahoo_finance_mcp: String,

    /// Per-call deadline for each agent and judge stage; a timeout converts
    /// to a failed result rather than hanging the join
    pub agent_timeout: Duration,

    /// Maximum tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            financial_model: "openai/gpt-5".to_string(),
            market_model: "openai/gpt-5".to_string(),
            sentiment_model: "openai/gpt-5".to_string(),
            judge_draft_model: "openai/gpt-5".to_string(),
            judge_final_model: "anthropic/claude-sonnet-4-20250514".to_string(),
            brave_search_mcp: "windsor/brave-search-mcp".to_string(),
            exa_mcp: "joerup/exa-mcp".to_string(),
            sonar_mcp: "akakak/sonar".to_string(),
            yahoo_finance_mcp: "aq_humor/yahoo-finance-mcp".to_string(),
            agent_timeout: Duration::from_secs(300),
            max_tokens: 4096,
            temperature: None,
        }
    }
}

impl SwarmConfig {
    /// Create a new configuration builder
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let models = [
            ("financial_model", &self.financial_model),
            ("market_model", &self.market_model),
            ("sentiment_model", &self.sentiment_model),
            ("judge_draft_model", &self.judge_draft_model),
            ("judge_final_model", &self.judge_final_model),
        ];

        for (name, model) in models {
            if model.trim().is_empty() {
                return Err(SwarmError::ConfigError(format!("{name} must not be empty")));
            }
        }

        if self.agent_timeout.is_zero() {
            return Err(SwarmError::ConfigError(
                "agent_timeout must be greater than zero".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(SwarmError::ConfigError(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for SwarmConfig
#[derive(Debug, Default)]
pub struct SwarmConfigBuilder {
    financial_model: Option<String>,
    market_model: Option<String>,
    sentiment_model: Option<String>,
    judge_draft_model: Option<String>,
    judge_final_model: Option<String>,
    agent_timeout: Option<Duration>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl SwarmConfigBuilder {
    /// Use the same model for all three research agents
    pub fn research_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.financial_model = Some(model.clone());
        self.market_model = Some(model.clone());
        self.sentiment_model = Some(model);
        self
    }

    /// Set the financial agent model
    pub fn financial_model(mut self, model: impl Into<String>) -> Self {
        self.financial_model = Some(model.into());
        self
    }

    /// Set the market agent model
    pub fn market_model(mut self, model: impl Into<String>) -> Self {
        self.market_model = Some(model.into());
        self
    }

    /// Set the sentiment agent model
    pub fn sentiment_model(mut self, model: impl Into<String>) -> Self {
        self.sentiment_model = Some(model.into());
        self
    }

    /// Set the judge draft model (stage 1)
    pub fn judge_draft_model(mut self, model: impl Into<String>) -> Self {
        self.judge_draft_model = Some(model.into());
        self
    }

    /// Set the judge final model (stage 2 of the handoff)
    pub fn judge_final_model(mut self, model: impl Into<String>) -> Self {
        self.judge_final_model = Some(model.into());
        self
    }

    /// Set the per-call deadline
    pub fn agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = Some(timeout);
        self
    }

    /// Set maximum tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SwarmConfig> {
        let defaults = SwarmConfig::default();

        let config = SwarmConfig {
            financial_model: self.financial_model.unwrap_or(defaults.financial_model),
            market_model: self.market_model.unwrap_or(defaults.market_model),
            sentiment_model: self.sentiment_model.unwrap_or(defaults.sentiment_model),
            judge_draft_model: self.judge_draft_model.unwrap_or(defaults.judge_draft_model),
            judge_final_model: self.judge_final_model.unwrap_or(defaults.judge_final_model),
            brave_search_mcp: defaults.brave_search_mcp,
            exa_mcp: defaults.exa_mcp,
            sonar_mcp: defaults.sonar_mcp,
            yahoo_finance_mcp: defaults.yahoo_finance_mcp,
            agent_timeout: self.agent_timeout.unwrap_or(defaults.agent_timeout),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.or(defaults.temperature),
        };

        config.validate()?;
        Ok(config)
    }
}
