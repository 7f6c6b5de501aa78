pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpAgentBackend;
pub use app::{ApiClient, ClientMode};
pub use config::{cli::LocalStorage, StudioConfig};
pub use core::{proxy::GenerationProxy, wizard::Wizard};
pub use utils::error::{Result, StudioError};
