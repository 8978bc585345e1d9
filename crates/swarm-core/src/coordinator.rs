//! Research coordinator: concurrent fan-out across the three agents
//!
//! The three invocations are independent futures joined on the same task;
//! the join is the barrier between the research phase and the judge. No
//! ordering is guaranteed among the agents and none is needed - results are
//! keyed by agent identity, not completion order.

use crate::agents::{AgentId, AgentSpec, research_agents};
use crate::config::SwarmConfig;
use crate::invoker::invoke_agent;
use crate::report::{AgentResult, AnalysisRequest, ResearchResults};
use swarm_llm::LLMProvider;
use tracing::info;

/// Observer for interactive progress display
///
/// Purely observational: coordinator correctness does not depend on these
/// hooks being called or on what they do.
pub trait ResearchProgress: Send + Sync {
    /// An agent's call has been issued
    fn agent_started(&self, _agent: AgentId) {}

    /// An agent's call has completed, successfully or not
    fn agent_finished(&self, _agent: AgentId, _success: bool) {}
}

/// No-op progress observer
pub struct NoProgress;

impl ResearchProgress for NoProgress {}

/// Run all three research agents concurrently and collect every result
///
/// Waits for all agents regardless of individual failures; a failed agent
/// occupies its result slot with the error captured and never cancels or
/// blocks its siblings.
pub async fn run_research(
    provider: &dyn LLMProvider,
    config: &SwarmConfig,
    request: &AnalysisRequest,
    progress: &dyn ResearchProgress,
) -> ResearchResults {
    let [financial, market, sentiment] = research_agents(config);

    info!(ticker = %request.ticker(), "Starting parallel research with 3 specialized agents");

    let (financial, market, sentiment) = tokio::join!(
        run_one(provider, config, financial, request, progress),
        run_one(provider, config, market, request, progress),
        run_one(provider, config, sentiment, request, progress),
    );

    info!(
        succeeded = financial.is_success() as usize
            + market.is_success() as usize
            + sentiment.is_success() as usize,
        "Research phase complete"
    );

    ResearchResults {
        financial,
        market,
        sentiment,
    }
}

async fn run_one(
    provider: &dyn LLMProvider,
    config: &SwarmConfig,
    spec: AgentSpec,
    request: &AnalysisRequest,
    progress: &dyn ResearchProgress,
) -> AgentResult {
    progress.agent_started(spec.id);
    let result = invoke_agent(provider, config, &spec, request).await;
    progress.agent_finished(spec.id, result.is_success());
    result
}
