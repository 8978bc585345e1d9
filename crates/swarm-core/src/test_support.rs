//! Scripted in-memory provider for exercising the coordination paths

use async_trait::async_trait;
use std::time::Duration;
use swarm_llm::{
    CompletionRequest, CompletionResponse, LLMProvider, LlmError, Message, StopReason, TokenUsage,
};

type Script = Box<dyn Fn(&CompletionRequest) -> Result<String, String> + Send + Sync>;

/// Provider whose behavior is a function of the request, with optional delay
pub struct ScriptedProvider {
    script: Script,
    delay: Duration,
}

impl ScriptedProvider {
    /// Provider that answers every request with the same text
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::scripted(move |_| Ok(text.clone()))
    }

    /// Provider that fails every request with the given error message
    pub fn failing(error: &str) -> Self {
        let error = error.to_string();
        Self::scripted(move |_| Err(error.clone()))
    }

    /// Provider with per-request behavior
    pub fn scripted(
        script: impl Fn(&CompletionRequest) -> Result<String, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            delay: Duration::ZERO,
        }
    }

    /// Sleep before answering each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> swarm_llm::Result<CompletionResponse> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match (self.script)(&request) {
            Ok(text) => Ok(CompletionResponse {
                message: Message::assistant(text),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 0,
                    output_tokens: 0,
                },
            }),
            Err(error) => Err(LlmError::RequestFailed(error)),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
