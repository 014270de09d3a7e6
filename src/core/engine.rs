use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs the collection → analysis → reporting phases of a pipeline.
pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs the full analysis and returns the report path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting full job market analysis...");

        tracing::info!("Collecting job postings...");
        let jobs = self.pipeline.extract().await?;
        tracing::info!("📥 Collected {} job postings", jobs.len());
        self.monitor.log_stats("Collection");

        tracing::info!("Analyzing market data...");
        let output = self.pipeline.transform(jobs).await?;
        tracing::info!(
            "📈 Analysis complete: {} postings, {} ranked technologies",
            output.report.market_analysis.total_jobs,
            output.report.market_analysis.top_technologies.len()
        );
        self.monitor.log_stats("Analysis");

        tracing::info!("Writing reports...");
        let report_path = self.pipeline.load(output).await?;
        tracing::info!("📁 Reports written to: {}", report_path);
        self.monitor.log_stats("Reporting");

        self.monitor.log_final_stats();
        Ok(report_path)
    }
}
