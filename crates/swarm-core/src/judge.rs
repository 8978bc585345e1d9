//! Judge synthesizer: two-stage model handoff
//!
//! Stage 1 drafts a verdict from the three research texts; stage 2 hands the
//! draft (as assistant context) plus the same research to a second model that
//! finalizes it. The handoff is nothing more than passing stage 1's output
//! forward in the conversation.
//!
//! Policy when every research leg failed: short-circuit deterministically to
//! a failed verdict without calling any model. There is no evidence to judge
//! and burning two completions on placeholders buys nothing.

use crate::config::SwarmConfig;
use crate::prompts;
use crate::report::{AnalysisRequest, ResearchResults, VerdictResult};
use swarm_llm::{CompletionRequest, LLMProvider, Message};
use tracing::{debug, info, warn};

const JUDGE_SYSTEM: &str =
    "You are a senior portfolio manager producing decisive buy/hold/sell verdicts.";

/// Synthesize the final verdict from the research results
///
/// Never raises: provider errors at either stage are captured in a failed
/// `VerdictResult`.
pub async fn synthesize_verdict(
    provider: &dyn LLMProvider,
    config: &SwarmConfig,
    request: &AnalysisRequest,
    research: &ResearchResults,
) -> VerdictResult {
    if research.all_failed() {
        warn!(ticker = %request.ticker(), "All research agents failed; skipping judge");
        return VerdictResult::failed(
            "all three research agents failed; no analysis available to judge",
        );
    }

    info!(ticker = %request.ticker(), "Judge evaluating research and formulating verdict");

    let synthesis = prompts::synthesis_prompt(request.ticker(), research);

    // Stage 1: draft
    let draft = match run_stage(
        provider,
        config,
        &config.judge_draft_model,
        vec![Message::user(synthesis.clone())],
    )
    .await
    {
        Ok(text) => text,
        Err(e) => return VerdictResult::failed(format!("judge draft stage: {e}")),
    };

    debug!(chars = draft.len(), "Draft verdict received, handing off");

    // Stage 2: handoff - the finalizing model continues the draft's reasoning
    let messages = vec![
        Message::user(synthesis),
        Message::assistant(draft),
        Message::user(prompts::FINALIZE_VERDICT),
    ];

    match run_stage(provider, config, &config.judge_final_model, messages).await {
        Ok(text) => VerdictResult::success(text),
        Err(e) => VerdictResult::failed(format!("judge final stage: {e}")),
    }
}

async fn run_stage(
    provider: &dyn LLMProvider,
    config: &SwarmConfig,
    model: &str,
    messages: Vec<Message>,
) -> Result<String, String> {
    let mut builder = CompletionRequest::builder(model)
        .system(JUDGE_SYSTEM)
        .messages(messages)
        .max_tokens(config.max_tokens);
    if let Some(temperature) = config.temperature {
        builder = builder.temperature(temperature);
    }

    let outcome = tokio::time::timeout(config.agent_timeout, provider.complete(builder.build()))
        .await
        .map_err(|_| format!("timed out after {}s", config.agent_timeout.as_secs()))?;

    let response = outcome.map_err(|e| e.to_string())?;
    let text = response.message.text().trim().to_string();
    if text.is_empty() {
        return Err("empty response from provider".to_string());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentId;
    use crate::report::AgentResult;
    use crate::test_support::ScriptedProvider;
    use swarm_llm::Role;

    fn research_with_failed_sentiment() -> ResearchResults {
        ResearchResults {
            financial: AgentResult::success(AgentId::Financial, "healthy margins"),
            market: AgentResult::success(AgentId::Market, "dominant share"),
            sentiment: AgentResult::failed(AgentId::Sentiment, "connection reset"),
        }
    }

    fn all_failed() -> ResearchResults {
        ResearchResults {
            financial: AgentResult::failed(AgentId::Financial, "down"),
            market: AgentResult::failed(AgentId::Market, "down"),
            sentiment: AgentResult::failed(AgentId::Sentiment, "down"),
        }
    }

    #[tokio::test]
    async fn test_handoff_passes_draft_to_final_model() {
        let config = SwarmConfig::default();
        let request = AnalysisRequest::new("TSLA").unwrap();

        let draft_model = config.judge_draft_model.clone();
        let final_model = config.judge_final_model.clone();
        let provider = ScriptedProvider::scripted(move |req| {
            if req.model == draft_model {
                return Ok("DRAFT: lean BUY".to_string());
            }
            assert_eq!(req.model, final_model);
            // The final stage must receive the draft as prior assistant context
            let has_draft = req
                .messages
                .iter()
                .any(|m| m.role == Role::Assistant && m.content == "DRAFT: lean BUY");
            assert!(has_draft, "final stage did not receive the draft");
            Ok("FINAL: BUY, conviction 7".to_string())
        });

        let verdict = synthesize_verdict(
            &provider,
            &config,
            &request,
            &research_with_failed_sentiment(),
        )
        .await;

        assert!(verdict.is_success());
        assert_eq!(verdict.verdict, "FINAL: BUY, conviction 7");
    }

    #[tokio::test]
    async fn test_all_failed_short_circuits_without_model_call() {
        let config = SwarmConfig::default();
        let request = AnalysisRequest::new("TSLA").unwrap();
        let provider = ScriptedProvider::scripted(|_| {
            panic!("judge must not call the provider when all research failed")
        });

        let verdict = synthesize_verdict(&provider, &config, &request, &all_failed()).await;

        assert!(!verdict.is_success());
        assert!(
            verdict
                .error
                .as_deref()
                .unwrap()
                .contains("all three research agents failed")
        );
    }

    #[tokio::test]
    async fn test_draft_stage_error_is_captured() {
        let config = SwarmConfig::default();
        let request = AnalysisRequest::new("TSLA").unwrap();
        let provider = ScriptedProvider::failing("503 from upstream");

        let verdict = synthesize_verdict(
            &provider,
            &config,
            &request,
            &research_with_failed_sentiment(),
        )
        .await;

        assert!(!verdict.is_success());
        let error = verdict.error.as_deref().unwrap();
        assert!(error.contains("judge draft stage"));
        assert!(error.contains("503 from upstream"));
    }

    #[tokio::test]
    async fn test_final_stage_error_is_captured() {
        let config = SwarmConfig::default();
        let request = AnalysisRequest::new("TSLA").unwrap();

        let final_model = config.judge_final_model.clone();
        let provider = ScriptedProvider::scripted(move |req| {
            if req.model == final_model {
                Err("finalizer unreachable".to_string())
            } else {
                Ok("DRAFT".to_string())
            }
        });

        let verdict = synthesize_verdict(
            &provider,
            &config,
            &request,
            &research_with_failed_sentiment(),
        )
        .await;

        assert!(!verdict.is_success());
        assert!(
            verdict
                .error
                .as_deref()
                .unwrap()
                .contains("judge final stage")
        );
    }
}
