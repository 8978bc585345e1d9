//! Single-agent invocation with isolated failure
//!
//! One outbound LLM call per agent. Every failure mode (transport error,
//! provider error, empty response, deadline) is converted into a failed
//! `AgentResult` here; nothing propagates to the coordinator, so one agent
//! can never abort its siblings.

use crate::agents::AgentSpec;
use crate::config::SwarmConfig;
use crate::prompts;
use crate::report::{AgentResult, AnalysisRequest};
use swarm_llm::{CompletionRequest, LLMProvider, Message};
use tracing::{debug, warn};

/// Run one research agent to completion
pub async fn invoke_agent(
    provider: &dyn LLMProvider,
    config: &SwarmConfig,
    spec: &AgentSpec,
    request: &AnalysisRequest,
) -> AgentResult {
    let prompt = prompts::render_research_prompt(spec, request.ticker());

    let mut builder = CompletionRequest::builder(&spec.model)
        .add_message(Message::user(prompt))
        .max_tokens(config.max_tokens)
        .mcp_servers(spec.mcp_servers.clone());
    if let Some(temperature) = config.temperature {
        builder = builder.temperature(temperature);
    }
    let completion = builder.build();

    debug!(agent = %spec.id, model = %spec.model, "Invoking research agent");

    let outcome = tokio::time::timeout(config.agent_timeout, provider.complete(completion)).await;

    match outcome {
        Ok(Ok(response)) => {
            let text = response.message.text().trim();
            if text.is_empty() {
                warn!(agent = %spec.id, "Agent returned an empty response");
                AgentResult::failed(spec.id, "empty response from provider")
            } else {
                AgentResult::success(spec.id, text)
            }
        }
        Ok(Err(e)) => {
            warn!(agent = %spec.id, error = %e, "Agent call failed");
            AgentResult::failed(spec.id, e.to_string())
        }
        Err(_) => {
            warn!(agent = %spec.id, timeout = ?config.agent_timeout, "Agent call timed out");
            AgentResult::failed(
                spec.id,
                format!("timed out after {}s", config.agent_timeout.as_secs()),
            )
        }
    }
}
