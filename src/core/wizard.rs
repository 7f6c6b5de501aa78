//! Prompt → module selection → preferences → sequential generation.

use crate::domain::catalog::{find_module, is_known_module};
use crate::domain::model::{
    GenerationRequest, Module, ModuleResult, ModuleStatus, PreferenceField, Preferences,
};
use crate::domain::ports::ConceptGenerator;
use crate::utils::error::{Result, StudioError};
use std::collections::{BTreeMap, VecDeque};
use tokio::sync::mpsc::UnboundedSender;

const DEFAULT_SELECTION: [&str; 2] = ["brainstorm", "business_plan"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStatus {
    Idle,
    Generating,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started { total: usize },
    ModuleStarted { module_id: String, position: usize },
    ModuleFinished { module_id: String, result: ModuleResult },
    Finished { completed: usize, failed: usize },
}

#[derive(Debug, Clone)]
pub struct Wizard {
    prompt: String,
    selected: Vec<String>,
    preferences: Preferences,
    status: WizardStatus,
    module_statuses: BTreeMap<String, ModuleStatus>,
    results: BTreeMap<String, ModuleResult>,
    last_error: Option<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            selected: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
            preferences: Preferences::default(),
            status: WizardStatus::Idle,
            module_statuses: BTreeMap::new(),
            results: BTreeMap::new(),
            last_error: None,
        }
    }
}

fn emit(progress: Option<&UnboundedSender<ProgressEvent>>, event: ProgressEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is watching.
        let _ = tx.send(event);
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn module_status(&self, module_id: &str) -> Option<ModuleStatus> {
        self.module_statuses.get(module_id).copied()
    }

    pub fn results(&self) -> &BTreeMap<String, ModuleResult> {
        &self.results
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn is_editable(&self) -> bool {
        matches!(self.status, WizardStatus::Idle | WizardStatus::Error)
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        if self.is_editable() {
            self.prompt = prompt.into();
        }
    }

    /// Adds the module when absent, removes it when present. Returns whether it is now selected.
    pub fn toggle_module(&mut self, module_id: &str) -> bool {
        if !self.is_editable() || !is_known_module(module_id) {
            return self.is_selected(module_id);
        }

        if let Some(pos) = self.selected.iter().position(|m| m == module_id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(module_id.to_string());
            true
        }
    }

    pub fn is_selected(&self, module_id: &str) -> bool {
        self.selected.iter().any(|m| m == module_id)
    }

    pub fn set_preference(&mut self, field: PreferenceField, value: impl Into<String>) {
        if self.is_editable() {
            self.preferences.set(field, value);
        }
    }

    pub fn can_generate(&self) -> bool {
        self.is_editable() && !self.prompt.trim().is_empty() && !self.selected.is_empty()
    }

    /// Runs every selected module one after another, publishing each status change.
    /// Individual module failures are recorded, never returned.
    pub async fn generate<G>(
        &mut self,
        generator: &G,
        progress: Option<&UnboundedSender<ProgressEvent>>,
    ) -> Result<()>
    where
        G: ConceptGenerator + ?Sized,
    {
        if !self.is_editable() {
            return Err(StudioError::validation(
                "Generation already ran; reset the wizard before generating again",
            ));
        }
        if !self.can_generate() {
            let message = if self.prompt.trim().is_empty() {
                "Enter a prompt before generating"
            } else {
                "Select at least one module before generating"
            };
            self.status = WizardStatus::Error;
            self.last_error = Some(message.to_string());
            return Err(StudioError::validation(message));
        }

        self.status = WizardStatus::Generating;
        self.last_error = None;
        self.results.clear();
        self.module_statuses = self
            .selected
            .iter()
            .map(|id| (id.clone(), ModuleStatus::Pending))
            .collect();
        emit(progress, ProgressEvent::Started { total: self.selected.len() });

        let base_request =
            GenerationRequest::new(self.prompt.clone(), Vec::new()).with_preferences(&self.preferences);
        let mut queue: VecDeque<String> = self.selected.iter().cloned().collect();
        let mut position = 0;

        while let Some(module_id) = queue.pop_front() {
            position += 1;
            self.module_statuses
                .insert(module_id.clone(), ModuleStatus::Generating);
            emit(
                progress,
                ProgressEvent::ModuleStarted {
                    module_id: module_id.clone(),
                    position,
                },
            );

            let result = match generator.generate(&base_request.for_module(&module_id)).await {
                Ok(mut response) => match response.modules.remove(&module_id) {
                    Some(result) if result.status == ModuleStatus::Error => result,
                    Some(result) => ModuleResult {
                        status: ModuleStatus::Completed,
                        ..result
                    },
                    None => ModuleResult::error(format!("No result returned for module: {}", module_id)),
                },
                Err(e) => {
                    tracing::warn!("Generation of {} failed: {}", module_id, e);
                    ModuleResult::error(e.user_friendly_message())
                }
            };

            self.module_statuses.insert(module_id.clone(), result.status);
            self.results.insert(module_id.clone(), result.clone());
            emit(progress, ProgressEvent::ModuleFinished { module_id, result });
        }

        let failed = self
            .module_statuses
            .values()
            .filter(|s| **s == ModuleStatus::Error)
            .count();
        self.status = WizardStatus::Completed;
        emit(
            progress,
            ProgressEvent::Finished {
                completed: self.selected.len() - failed,
                failed,
            },
        );
        Ok(())
    }

    /// Back to the form. Prompt, selection and preferences are kept.
    pub fn reset(&mut self) {
        self.status = WizardStatus::Idle;
        self.results.clear();
        self.module_statuses.clear();
        self.last_error = None;
    }

    /// Selected modules that already have a result, in selection order.
    pub fn results_in_order(&self) -> Vec<(&'static Module, &ModuleResult)> {
        self.selected
            .iter()
            .filter_map(|id| Some((find_module(id)?, self.results.get(id)?)))
            .collect()
    }
}
