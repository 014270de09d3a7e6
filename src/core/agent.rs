use crate::config::cli::LocalStorage;
use crate::config::AgentConfig;
use crate::core::pipeline::MarketPipeline;
use crate::domain::model::AnalysisReport;
use crate::domain::ports::{JobSource, Pipeline};
use crate::llm::OpenAiSummarizer;
use crate::sources::{IndeedSource, LinkedInSource};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// High-level facade: construct with an OpenAI API key, then await
/// `run_full_analysis()` for a complete market report. Defaults mirror the
/// CLI (built-in keyword set, Paris/Lyon/Marseille, 50 postings per site).
///
/// ```no_run
/// use jobscope::JobMarketAgent;
///
/// # async fn demo() -> jobscope::Result<()> {
/// let agent = JobMarketAgent::new("sk-...");
/// let results = agent.run_full_analysis().await?;
/// println!("{} postings analyzed", results.metadata.total_jobs_collected);
/// # Ok(())
/// # }
/// ```
pub struct JobMarketAgent {
    api_key: Option<String>,
    model: String,
    config: AgentConfig,
    linkedin_endpoint: Option<String>,
    indeed_endpoint: Option<String>,
    llm_endpoint: Option<String>,
    request_delay: Duration,
}

impl JobMarketAgent {
    /// An empty key disables the AI summary; everything else still runs.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: Some(api_key).filter(|k| !k.trim().is_empty()),
            model: crate::llm::DEFAULT_MODEL.to_string(),
            config: AgentConfig::default(),
            linkedin_endpoint: None,
            indeed_endpoint: None,
            llm_endpoint: None,
            request_delay: Duration::ZERO,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.keywords = keywords;
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.config.locations = locations;
        self
    }

    pub fn with_limit_per_site(mut self, limit: usize) -> Self {
        self.config.limit_per_site = limit;
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.config.output_path = output_path.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_linkedin_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.linkedin_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_indeed_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.indeed_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_llm_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.llm_endpoint = Some(endpoint.into());
        self
    }

    /// Collects postings from every source, analyzes the market, persists
    /// the report files, and returns the report.
    pub async fn run_full_analysis(&self) -> Result<AnalysisReport> {
        let mut linkedin = LinkedInSource::new(self.config.keywords.clone())
            .with_request_delay(self.request_delay);
        if let Some(endpoint) = &self.linkedin_endpoint {
            linkedin = linkedin.with_endpoint(endpoint.clone());
        }

        let mut indeed =
            IndeedSource::new(self.config.keywords.clone()).with_request_delay(self.request_delay);
        if let Some(endpoint) = &self.indeed_endpoint {
            indeed = indeed.with_endpoint(endpoint.clone());
        }

        let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(linkedin), Arc::new(indeed)];

        let storage = LocalStorage::new(self.config.output_path.clone());
        let mut pipeline = MarketPipeline::new(storage, self.config.clone(), sources);

        if let Some(api_key) = &self.api_key {
            let mut summarizer = OpenAiSummarizer::new(api_key.clone(), self.model.clone());
            if let Some(endpoint) = &self.llm_endpoint {
                summarizer = summarizer.with_endpoint(endpoint.clone());
            }
            pipeline = pipeline.with_summarizer(summarizer);
        }

        let jobs = pipeline.extract().await?;
        let output = pipeline.transform(jobs).await?;
        let report = output.report.clone();
        let report_path = pipeline.load(output).await?;

        tracing::info!("📁 Full analysis report written to: {}", report_path);
        Ok(report)
    }
}
