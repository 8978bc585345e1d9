//! Top-level orchestration: research fan-out, judge handoff, report assembly
//!
//! State machine per request: Idle -> Researching (three parallel legs) ->
//! Judging -> Assembled. Terminal state is the assembled report; there is no
//! retry or resume - a failed run is restarted in full by the caller.

use crate::config::SwarmConfig;
use crate::coordinator::{NoProgress, ResearchProgress, run_research};
use crate::error::Result;
use crate::judge::synthesize_verdict;
use crate::report::{AnalysisReport, AnalysisRequest, assemble};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use swarm_llm::LLMProvider;
use tracing::info;

/// The agent swarm: one provider, one configuration, any number of runs
pub struct Swarm {
    provider: Arc<dyn LLMProvider>,
    config: SwarmConfig,
}

impl Swarm {
    /// Create a swarm over a provider with the given configuration
    pub fn new(provider: Arc<dyn LLMProvider>, config: SwarmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    /// The active configuration
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Analyze a stock ticker and return the complete report
    ///
    /// Only request validation can fail; once the pipeline starts, per-agent
    /// and judge failures are reflected in the report's status fields, so the
    /// caller always receives a structured result.
    pub async fn analyze(&self, ticker: &str) -> Result<AnalysisReport> {
        self.analyze_with_progress(ticker, &NoProgress).await
    }

    /// Analyze with a progress observer for interactive display
    pub async fn analyze_with_progress(
        &self,
        ticker: &str,
        progress: &dyn ResearchProgress,
    ) -> Result<AnalysisReport> {
        let request = AnalysisRequest::new(ticker)?;
        let started_at = Utc::now();
        let clock = Instant::now();

        info!(ticker = %request.ticker(), "Starting swarm analysis");

        let research =
            run_research(self.provider.as_ref(), &self.config, &request, progress).await;

        let verdict =
            synthesize_verdict(self.provider.as_ref(), &self.config, &request, &research).await;

        let report = assemble(&request, started_at, clock.elapsed(), research, verdict);

        info!(
            ticker = %report.stock_ticker,
            status = ?report.status,
            duration_seconds = report.duration_seconds,
            "Analysis complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwarmError;
    use crate::report::OverallStatus;
    use crate::test_support::ScriptedProvider;

    #[tokio::test]
    async fn test_full_pipeline_success() {
        let provider = Arc::new(ScriptedProvider::scripted(|req| {
            // Research prompts mention the ticker; judge stages carry the
            // portfolio-manager system prompt.
            if req.system.is_some() {
                Ok("BUY, conviction 8".to_string())
            } else {
                Ok("research finding".to_string())
            }
        }));
        let swarm = Swarm::new(provider, SwarmConfig::default()).unwrap();

        let report = swarm.analyze("tsla").await.unwrap();

        assert_eq!(report.stock_ticker, "TSLA");
        assert_eq!(report.status, OverallStatus::Success);
        assert_eq!(report.research.succeeded(), 3);
        assert_eq!(report.verdict.verdict, "BUY, conviction 8");
        assert!(report.duration_seconds >= 0.0);
    }

    #[tokio::test]
    async fn test_partial_run_still_renders_verdict() {
        let provider = Arc::new(ScriptedProvider::scripted(|req| {
            if req.messages[0].content.contains("sentiment analysis expert") {
                Err("simulated network error".to_string())
            } else {
                Ok("output".to_string())
            }
        }));
        let swarm = Swarm::new(provider, SwarmConfig::default()).unwrap();

        let report = swarm.analyze("AAPL").await.unwrap();

        assert_eq!(report.status, OverallStatus::Partial);
        assert!(report.verdict.is_success());
        assert!(!report.research.sentiment.is_success());
    }

    #[tokio::test]
    async fn test_total_failure_still_returns_report() {
        let provider = Arc::new(ScriptedProvider::failing("provider outage"));
        let swarm = Swarm::new(provider, SwarmConfig::default()).unwrap();

        let report = swarm.analyze("MSFT").await.unwrap();

        assert_eq!(report.status, OverallStatus::Failed);
        assert!(report.research.all_failed());
        assert!(!report.verdict.is_success());
    }

    #[tokio::test]
    async fn test_invalid_ticker_rejected() {
        let provider = Arc::new(ScriptedProvider::replying("unused"));
        let swarm = Swarm::new(provider, SwarmConfig::default()).unwrap();

        let err = swarm.analyze("NOT-A-TICKER").await.unwrap_err();
        assert!(matches!(err, SwarmError::InvalidTicker(_)));
    }
}
