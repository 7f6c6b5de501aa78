use crate::domain::model::GenerationRequest;
use serde::{Deserialize, Serialize};

const DEFAULT_STYLE: &str = "Professional";
const DEFAULT_INDUSTRY: &str = "General";
const DEFAULT_AUDIENCE: &str = "General";
const NOT_SPECIFIED: &str = "Not specified";

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Input of a single agent run, one per requested module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInput {
    pub prompt: String,
    pub module: String,
    pub style: String,
    pub industry: String,
    pub audience: String,
    pub budget: String,
    pub timeline: String,
    pub additional_notes: String,
}

impl AgentInput {
    pub fn for_module(request: &GenerationRequest, module_id: &str) -> Self {
        Self {
            prompt: request.prompt.clone(),
            module: module_id.to_string(),
            style: or_default(&request.style, DEFAULT_STYLE),
            industry: or_default(&request.industry, DEFAULT_INDUSTRY),
            audience: or_default(&request.audience, DEFAULT_AUDIENCE),
            budget: or_default(&request.budget, NOT_SPECIFIED),
            timeline: or_default(&request.timeline, NOT_SPECIFIED),
            additional_notes: request.additional_notes.clone(),
        }
    }
}

/// Flattened inputs of one graph execution covering every requested module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInputs {
    pub prompt: String,
    pub modules: String,
    pub style: String,
    pub industry: String,
    pub audience: String,
    pub budget: String,
    pub timeline: String,
    pub additional_notes: String,
}

impl GraphInputs {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            prompt: request.prompt.clone(),
            modules: request.modules.join(","),
            style: or_default(&request.style, DEFAULT_STYLE),
            industry: or_default(&request.industry, DEFAULT_INDUSTRY),
            audience: or_default(&request.audience, DEFAULT_AUDIENCE),
            budget: or_default(&request.budget, NOT_SPECIFIED),
            timeline: or_default(&request.timeline, NOT_SPECIFIED),
            additional_notes: request.additional_notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    Completed,
    Failed,
    Running(String),
}

impl ExecutionState {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "COMPLETED" => ExecutionState::Completed,
            "FAILED" => ExecutionState::Failed,
            _ => ExecutionState::Running(raw.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionState::Running(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSnapshot {
    pub state: ExecutionState,
    pub outputs: serde_json::Map<String, serde_json::Value>,
}

/// Result of one status poll. Non-success HTTP answers are `NotReady`, never errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    NotReady,
    Snapshot(ExecutionSnapshot),
}
