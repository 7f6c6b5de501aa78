use crate::config::{MissingCredentials, Strategy, StudioConfig};
use crate::core::demo::{demo_notice, demo_response, DEMO_MODE_MESSAGE};
use crate::core::graph::run_graph_execution;
use crate::core::per_module::run_per_module;
use crate::domain::catalog::is_known_module;
use crate::domain::model::{GenerationRequest, GenerationResponse};
use crate::domain::ports::{AgentBackend, ConceptGenerator};
use crate::utils::error::{Result, StudioError};
use async_trait::async_trait;

fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Checks prompt and modules and returns the request with duplicate modules removed.
/// Preferences are never looked at.
pub fn validate_request(request: GenerationRequest) -> Result<GenerationRequest> {
    if request.prompt.trim().is_empty() {
        return Err(StudioError::validation("Prompt is required"));
    }
    if request.modules.is_empty() {
        return Err(StudioError::validation(
            "At least one module must be selected",
        ));
    }

    let mut modules: Vec<String> = Vec::with_capacity(request.modules.len());
    for module_id in &request.modules {
        if !is_known_module(module_id) {
            return Err(StudioError::validation(format!(
                "Unknown module: {}",
                module_id
            )));
        }
        if !modules.contains(module_id) {
            modules.push(module_id.clone());
        }
    }

    Ok(GenerationRequest { modules, ..request })
}

/// Server-side bridge between `/api/generate` and the agent backend.
pub struct GenerationProxy<B: AgentBackend> {
    config: StudioConfig,
    backend: B,
}

impl<B: AgentBackend> GenerationProxy<B> {
    pub fn new(config: StudioConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub async fn handle(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let request = validate_request(request)?;
        tracing::info!(
            "Generation requested for {} modules: {}",
            request.modules.len(),
            request.modules.join(", ")
        );

        if self.config.credentials_missing() {
            return match self.config.generation.missing_credentials {
                MissingCredentials::Demo => {
                    tracing::warn!("Backend credentials missing, answering in demo mode");
                    let mut response =
                        demo_response(&request, format!("local-{}", unix_millis()), demo_notice);
                    response.message = Some(DEMO_MODE_MESSAGE.to_string());
                    Ok(response)
                }
                MissingCredentials::Strict => Err(StudioError::configuration(
                    match self.config.generation.strategy {
                        Strategy::PerModule => "AUTOGPT_API_KEY is not configured",
                        Strategy::Graph => "AUTOGPT_API_KEY and AUTOGPT_GRAPH_ID must both be configured",
                    },
                )),
            };
        }

        match self.config.generation.strategy {
            Strategy::PerModule => {
                let modules = run_per_module(&self.backend, &self.config, &request).await;
                Ok(GenerationResponse {
                    success: true,
                    execution_id: format!("exec-{}", unix_millis()),
                    modules,
                    message: None,
                })
            }
            Strategy::Graph => {
                let graph_id = self.config.backend.graph_id.as_deref().ok_or_else(|| {
                    StudioError::configuration("AUTOGPT_GRAPH_ID is not configured")
                })?;
                let outcome =
                    run_graph_execution(&self.backend, graph_id, &self.config.polling, &request)
                        .await?;
                Ok(GenerationResponse {
                    success: true,
                    execution_id: outcome.execution_id,
                    modules: outcome.modules,
                    message: None,
                })
            }
        }
    }
}

#[async_trait]
impl<B: AgentBackend> ConceptGenerator for GenerationProxy<B> {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        self.handle(request.clone()).await
    }
}
