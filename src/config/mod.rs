pub mod cli;
pub mod toml_config;

pub use toml_config::{MissingCredentials, PollingConfig, Strategy, StudioConfig};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "concept-studio")]
#[command(about = "Concept Studio generation server")]
pub struct CliConfig {
    /// TOML configuration file; the environment is used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "127.0.0.1:3000")]
    pub bind: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_studio_config(&self) -> crate::utils::error::Result<StudioConfig> {
        match &self.config {
            Some(path) => StudioConfig::from_file(path),
            None => StudioConfig::from_env(),
        }
    }
}
