use crate::config::StudioConfig;
use crate::domain::execution::AgentInput;
use crate::domain::model::{GenerationRequest, ModuleResult};
use crate::domain::ports::AgentBackend;
use crate::utils::error::StudioError;
use std::collections::BTreeMap;

fn is_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => false,
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Picks `output`, then `result`, falling back to the whole body as JSON text.
pub fn extract_agent_content(body: &serde_json::Value) -> serde_json::Value {
    ["output", "result"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find(|value| is_present(value))
        .cloned()
        .unwrap_or_else(|| serde_json::Value::String(body.to_string()))
}

/// One backend call per module. Failures stay with their module.
pub async fn run_per_module<B>(
    backend: &B,
    config: &StudioConfig,
    request: &GenerationRequest,
) -> BTreeMap<String, ModuleResult>
where
    B: AgentBackend + ?Sized,
{
    let mut results = BTreeMap::new();

    for module_id in &request.modules {
        let Some(agent_id) = config.agent_for(module_id) else {
            tracing::warn!("No agent configured for module {}", module_id);
            results.insert(
                module_id.clone(),
                ModuleResult::error(format!("Agent not configured for module: {}", module_id)),
            );
            continue;
        };

        let input = AgentInput::for_module(request, module_id);
        let result = match backend.execute_agent(agent_id, &input).await {
            Ok(body) => {
                tracing::info!("Module {} completed by agent {}", module_id, agent_id);
                ModuleResult::completed(extract_agent_content(&body))
            }
            Err(StudioError::UpstreamError { message }) => {
                tracing::warn!("Module {} failed: {}", module_id, message);
                ModuleResult::error(message)
            }
            Err(e) => {
                tracing::warn!("Module {} failed: {}", module_id, e);
                ModuleResult::error(format!("Failed to execute agent: {}", e))
            }
        };
        results.insert(module_id.clone(), result);
    }

    results
}
