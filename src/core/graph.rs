use crate::config::PollingConfig;
use crate::core::matching::assign_outputs;
use crate::domain::execution::{ExecutionState, GraphInputs, PollOutcome};
use crate::domain::model::{GenerationRequest, ModuleResult};
use crate::domain::ports::AgentBackend;
use crate::utils::error::{Result, StudioError};
use std::collections::BTreeMap;

pub struct GraphOutcome {
    pub execution_id: String,
    pub modules: BTreeMap<String, ModuleResult>,
}

/// One execution for all modules, polled until COMPLETED or FAILED.
/// Any failure here fails the whole request.
pub async fn run_graph_execution<B>(
    backend: &B,
    graph_id: &str,
    polling: &PollingConfig,
    request: &GenerationRequest,
) -> Result<GraphOutcome>
where
    B: AgentBackend + ?Sized,
{
    let inputs = GraphInputs::from_request(request);
    let execution_id = backend.start_execution(graph_id, &inputs).await?;
    tracing::info!(
        "Started execution {} of graph {} for {} modules",
        execution_id,
        graph_id,
        request.modules.len()
    );

    for attempt in 1..=polling.max_attempts {
        tokio::time::sleep(polling.interval()).await;

        let snapshot = match backend.poll_execution(graph_id, &execution_id).await {
            Ok(PollOutcome::Snapshot(snapshot)) => snapshot,
            Ok(PollOutcome::NotReady) => continue,
            Err(e) => {
                tracing::warn!("Poll {} of execution {} failed: {}", attempt, execution_id, e);
                continue;
            }
        };

        if !snapshot.state.is_terminal() {
            tracing::debug!(
                "Execution {} is {:?} (poll {}/{})",
                execution_id,
                snapshot.state,
                attempt,
                polling.max_attempts
            );
            continue;
        }

        if snapshot.state == ExecutionState::Failed {
            tracing::error!("Execution {} failed", execution_id);
            return Err(StudioError::upstream(format!(
                "Execution {} failed",
                execution_id
            )));
        }

        tracing::info!("Execution {} completed after {} polls", execution_id, attempt);
        let modules = assign_outputs(&request.modules, &snapshot.outputs);
        return Ok(GraphOutcome {
            execution_id,
            modules,
        });
    }

    Err(StudioError::TimeoutError {
        execution_id,
        attempts: polling.max_attempts,
    })
}
