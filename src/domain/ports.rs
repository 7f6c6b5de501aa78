use crate::domain::execution::{AgentInput, GraphInputs, PollOutcome};
use crate::domain::model::{GenerationRequest, GenerationResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Transport to the external agent-execution service.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Runs one agent and returns its raw JSON body. Non-success statuses are `UpstreamError`.
    async fn execute_agent(&self, agent_id: &str, input: &AgentInput)
        -> Result<serde_json::Value>;

    /// Starts one graph execution and returns its execution id.
    async fn start_execution(&self, graph_id: &str, inputs: &GraphInputs) -> Result<String>;

    async fn poll_execution(&self, graph_id: &str, execution_id: &str) -> Result<PollOutcome>;
}

/// Anything that can turn a request into per-module results.
#[async_trait]
pub trait ConceptGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
