//! Analysis report data model and assembly
//!
//! Serialized field names (`status`, `stock_ticker`, `timestamp`,
//! `duration_seconds`, `research`, `verdict`, and the per-agent `agent` /
//! `agent_name` / `analysis` / `status`) are a compatibility surface for
//! downstream consumers of the JSON export; do not rename them.

use crate::agents::AgentId;
use crate::error::{Result, SwarmError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A validated analysis request
///
/// Tickers are trimmed, uppercased, and restricted to 1-5 alphanumeric
/// characters. Immutable once constructed; shared by all agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    ticker: String,
}

impl AnalysisRequest {
    /// Validate and normalize a ticker symbol
    pub fn new(ticker: &str) -> Result<Self> {
        let ticker = ticker.trim().to_uppercase();

        if ticker.is_empty()
            || ticker.len() > 5
            || !ticker.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(SwarmError::InvalidTicker(ticker));
        }

        Ok(Self { ticker })
    }

    /// The normalized ticker symbol
    pub fn ticker(&self) -> &str {
        &self.ticker
    }
}

/// Outcome of a single agent or judge call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Failed,
}

/// Overall outcome of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Verdict succeeded and all three agents succeeded
    Success,
    /// Verdict succeeded but at least one agent failed
    Partial,
    /// Verdict failed
    Failed,
}

/// Result of one research agent invocation (write-once)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// Agent identity
    pub agent: AgentId,

    /// Display name, kept for provenance in the serialized report
    pub agent_name: String,

    /// Analysis text on success, error description on failure
    pub analysis: String,

    /// Call outcome
    pub status: CallStatus,

    /// Captured error message when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResult {
    /// Successful result with trimmed analysis text
    pub fn success(agent: AgentId, analysis: impl Into<String>) -> Self {
        Self {
            agent,
            agent_name: agent.display_name().to_string(),
            analysis: analysis.into().trim().to_string(),
            status: CallStatus::Success,
            error: None,
        }
    }

    /// Failed result with the captured error
    pub fn failed(agent: AgentId, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            agent,
            agent_name: agent.display_name().to_string(),
            analysis: format!("Error during analysis: {error}"),
            status: CallStatus::Failed,
            error: Some(error),
        }
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }
}

/// The judge's verdict (write-once)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictResult {
    /// Verdict text on success, error description on failure
    pub verdict: String,

    /// Call outcome
    pub status: CallStatus,

    /// Captured error message when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerdictResult {
    /// Successful verdict with trimmed text
    pub fn success(verdict: impl Into<String>) -> Self {
        Self {
            verdict: verdict.into().trim().to_string(),
            status: CallStatus::Success,
            error: None,
        }
    }

    /// Failed verdict with the captured error
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            verdict: format!("Error: {error}"),
            status: CallStatus::Failed,
            error: Some(error),
        }
    }

    /// Whether the judge succeeded
    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }
}

/// Results of the research phase: always exactly the three fixed agent slots
///
/// A failure in one agent never removes its slot; the failed result occupies
/// it with the error captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResults {
    pub financial: AgentResult,
    pub market: AgentResult,
    pub sentiment: AgentResult,
}

impl ResearchResults {
    /// Access one agent's result by identity
    pub fn get(&self, agent: AgentId) -> &AgentResult {
        match agent {
            AgentId::Financial => &self.financial,
            AgentId::Market => &self.market,
            AgentId::Sentiment => &self.sentiment,
        }
    }

    /// Iterate results in report order
    pub fn iter(&self) -> impl Iterator<Item = &AgentResult> {
        [&self.financial, &self.market, &self.sentiment].into_iter()
    }

    /// Number of agents that succeeded
    pub fn succeeded(&self) -> usize {
        self.iter().filter(|r| r.is_success()).count()
    }

    /// Number of agents that failed
    pub fn failed(&self) -> usize {
        3 - self.succeeded()
    }

    /// Whether every research leg failed
    pub fn all_failed(&self) -> bool {
        self.succeeded() == 0
    }
}

/// The terminal artifact of an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Overall run outcome
    pub status: OverallStatus,

    /// The analyzed ticker
    pub stock_ticker: String,

    /// When the run started (ISO-8601)
    pub timestamp: DateTime<Utc>,

    /// Wall-clock duration of the run in seconds
    pub duration_seconds: f64,

    /// Per-agent research results
    pub research: ResearchResults,

    /// The judge's verdict
    pub verdict: VerdictResult,
}

/// Assemble the final report
///
/// Pure with respect to its inputs: the caller measures elapsed wall-clock
/// time and passes it in, and the overall status is derived from the verdict
/// and per-agent outcomes.
pub fn assemble(
    request: &AnalysisRequest,
    started_at: DateTime<Utc>,
    elapsed: Duration,
    research: ResearchResults,
    verdict: VerdictResult,
) -> AnalysisReport {
    let status = if !verdict.is_success() {
        OverallStatus::Failed
    } else if research.failed() > 0 {
        OverallStatus::Partial
    } else {
        OverallStatus::Success
    };

    AnalysisReport {
        status,
        stock_ticker: request.ticker().to_string(),
        timestamp: started_at,
        duration_seconds: elapsed.as_secs_f64(),
        research,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_success() -> ResearchResults {
        ResearchResults {
            financial: AgentResult::success(AgentId::Financial, "strong balance sheet"),
            market: AgentResult::success(AgentId::Market, "wide moat"),
            sentiment: AgentResult::success(AgentId::Sentiment, "bullish coverage"),
        }
    }

    #[test]
    fn test_ticker_validation() {
        assert_eq!(AnalysisRequest::new(" tsla ").unwrap().ticker(), "TSLA");
        assert_eq!(AnalysisRequest::new("BRK2").unwrap().ticker(), "BRK2");

        assert!(AnalysisRequest::new("").is_err());
        assert!(AnalysisRequest::new("TOOLONG").is_err());
        assert!(AnalysisRequest::new("BRK.B").is_err());
    }

    #[test]
    fn test_success_result_trims_text() {
        let result = AgentResult::success(AgentId::Financial, "  analysis text \n");
        assert_eq!(result.analysis, "analysis text");
        assert!(result.is_success());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_overall_status_derivation() {
        let request = AnalysisRequest::new("TSLA").unwrap();
        let now = Utc::now();
        let elapsed = Duration::from_millis(1500);

        let report = assemble(
            &request,
            now,
            elapsed,
            all_success(),
            VerdictResult::success("BUY"),
        );
        assert_eq!(report.status, OverallStatus::Success);
        assert!((report.duration_seconds - 1.5).abs() < f64::EPSILON);

        let mut partial = all_success();
        partial.sentiment = AgentResult::failed(AgentId::Sentiment, "timeout");
        let report = assemble(&request, now, elapsed, partial, VerdictResult::success("BUY"));
        assert_eq!(report.status, OverallStatus::Partial);

        let report = assemble(
            &request,
            now,
            elapsed,
            all_success(),
            VerdictResult::failed("judge unreachable"),
        );
        assert_eq!(report.status, OverallStatus::Failed);
    }

    #[test]
    fn test_assemble_is_pure() {
        let request = AnalysisRequest::new("TSLA").unwrap();
        let now = Utc::now();
        let elapsed = Duration::from_secs(2);

        let a = assemble(&request, now, elapsed, all_success(), VerdictResult::success("BUY"));
        let b = assemble(&request, now, elapsed, all_success(), VerdictResult::success("BUY"));

        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let request = AnalysisRequest::new("TSLA").unwrap();
        let mut research = all_success();
        research.market = AgentResult::failed(AgentId::Market, "rate limited");

        let report = assemble(
            &request,
            Utc::now(),
            Duration::from_secs(1),
            research,
            VerdictResult::success("HOLD"),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["stock_ticker"], "TSLA");
        assert!(json["timestamp"].is_string());
        assert!(json["duration_seconds"].is_number());
        assert_eq!(json["research"]["financial"]["agent"], "financial");
        assert_eq!(
            json["research"]["financial"]["agent_name"],
            "Financial Analysis Agent"
        );
        assert_eq!(json["research"]["market"]["status"], "failed");
        assert_eq!(json["research"]["market"]["error"], "rate limited");
        // error is omitted entirely on success
        assert!(json["research"]["financial"].get("error").is_none());
        assert_eq!(json["verdict"]["verdict"], "HOLD");
        assert_eq!(json["verdict"]["status"], "success");
    }
}
