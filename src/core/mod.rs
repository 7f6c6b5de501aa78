pub mod demo;
pub mod export;
pub mod graph;
pub mod matching;
pub mod per_module;
pub mod proxy;
pub mod wizard;

pub use crate::domain::model::{GenerationRequest, GenerationResponse, ModuleResult, ModuleStatus};
pub use crate::domain::ports::{AgentBackend, ConceptGenerator, Storage};
pub use crate::utils::error::Result;
