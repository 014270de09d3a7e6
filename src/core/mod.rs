pub mod agent;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AnalysisOutput, AnalysisReport, JobPosting, MarketAnalysis};
pub use crate::domain::ports::{ConfigProvider, JobSource, Pipeline, Storage};
pub use crate::utils::error::Result;
