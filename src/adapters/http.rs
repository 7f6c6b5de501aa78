use crate::config::StudioConfig;
use crate::domain::execution::{AgentInput, ExecutionSnapshot, ExecutionState, GraphInputs, PollOutcome};
use crate::domain::ports::AgentBackend;
use crate::utils::error::{Result, StudioError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Serialize)]
struct ExecuteAgentBody<'a> {
    input: &'a AgentInput,
}

/// reqwest transport for the agent backend.
#[derive(Debug, Clone)]
pub struct HttpAgentBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpAgentBackend {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &StudioConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self::with_client(
            client,
            config.backend.base_url.clone(),
            config.backend.api_key.clone(),
        ))
    }

    fn graph_url(&self, graph_id: &str) -> String {
        format!("{}/graphs/{}", self.base_url, graph_id)
    }
}

fn execution_id_from(body: &serde_json::Value) -> Option<String> {
    ["id", "graph_exec_id", "execution_id"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|value| match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

#[async_trait]
impl AgentBackend for HttpAgentBackend {
    async fn execute_agent(
        &self,
        agent_id: &str,
        input: &AgentInput,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/api/v1/agents/{}/execute", self.base_url, agent_id);
        tracing::debug!("Executing agent {} for module {}", agent_id, input.module);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ExecuteAgentBody { input })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StudioError::upstream(format!(
                "Agent returned HTTP {}",
                status.as_u16()
            )));
        }

        Ok(response.json().await?)
    }

    async fn start_execution(&self, graph_id: &str, inputs: &GraphInputs) -> Result<String> {
        let url = format!("{}/execute", self.graph_url(graph_id));
        tracing::debug!("Starting execution of graph {} for modules {}", graph_id, inputs.modules);

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .json(inputs)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StudioError::upstream(format!(
                "Graph execution request returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        execution_id_from(&body)
            .ok_or_else(|| StudioError::upstream("Graph execution response carried no execution id"))
    }

    async fn poll_execution(&self, graph_id: &str, execution_id: &str) -> Result<PollOutcome> {
        let url = format!("{}/executions/{}", self.graph_url(graph_id), execution_id);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(
                "Poll of execution {} returned HTTP {}, retrying",
                execution_id,
                response.status()
            );
            return Ok(PollOutcome::NotReady);
        }

        let body: serde_json::Value = response.json().await?;
        let state = body
            .get("status")
            .and_then(|s| s.as_str())
            .map(ExecutionState::parse)
            .unwrap_or_else(|| ExecutionState::Running(String::new()));
        let outputs = body
            .get("outputs")
            .and_then(|o| o.as_object())
            .cloned()
            .unwrap_or_default();

        Ok(PollOutcome::Snapshot(ExecutionSnapshot { state, outputs }))
    }
}
