use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Strategy,
    Creative,
    Technical,
    Visual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Module {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub category: Category,
}

/// Body of `POST /api/generate`. Preferences are free text and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub modules: Vec<String>,
    pub style: String,
    pub industry: String,
    pub audience: String,
    pub budget: String,
    pub timeline: String,
    pub additional_notes: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, modules: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            modules,
            ..Default::default()
        }
    }

    pub fn with_preferences(mut self, preferences: &Preferences) -> Self {
        self.style = preferences.style.clone();
        self.industry = preferences.industry.clone();
        self.audience = preferences.audience.clone();
        self.budget = preferences.budget.clone();
        self.timeline = preferences.timeline.clone();
        self.additional_notes = preferences.additional_notes.clone();
        self
    }

    /// Copy of this request narrowed to one module.
    pub fn for_module(&self, module_id: &str) -> Self {
        Self {
            modules: vec![module_id.to_string()],
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub style: String,
    pub industry: String,
    pub audience: String,
    pub budget: String,
    pub timeline: String,
    pub additional_notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceField {
    Style,
    Industry,
    Audience,
    Budget,
    Timeline,
    AdditionalNotes,
}

impl Preferences {
    pub fn set(&mut self, field: PreferenceField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PreferenceField::Style => self.style = value,
            PreferenceField::Industry => self.industry = value,
            PreferenceField::Audience => self.audience = value,
            PreferenceField::Budget => self.budget = value,
            PreferenceField::Timeline => self.timeline = value,
            PreferenceField::AdditionalNotes => self.additional_notes = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Pending,
    Generating,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub status: ModuleStatus,
    pub content: serde_json::Value,
}

impl ModuleResult {
    pub fn completed(content: impl Into<serde_json::Value>) -> Self {
        Self {
            status: ModuleStatus::Completed,
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ModuleStatus::Error,
            content: serde_json::Value::String(message.into()),
        }
    }

    /// Content as displayable text; structured payloads are pretty-printed.
    pub fn content_text(&self) -> String {
        match &self.content {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub execution_id: String,
    pub modules: BTreeMap<String, ModuleResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
