pub mod analysis;
pub mod config;
pub mod core;
pub mod domain;
pub mod llm;
pub mod sources;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, AgentConfig};
pub use core::{agent::JobMarketAgent, engine::AnalysisEngine, pipeline::MarketPipeline};
pub use utils::error::{AgentError, Result};
