use clap::Parser;
use jobscope::core::pipeline::MarketPipeline;
use jobscope::domain::ports::JobSource;
use jobscope::llm::OpenAiSummarizer;
use jobscope::sources::{IndeedSource, LinkedInSource};
use jobscope::utils::{logger, validation::Validate};
use jobscope::{AnalysisEngine, CliConfig, LocalStorage};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting jobscope CLI");
    config.apply_defaults();
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let request_delay = Duration::from_millis(config.request_delay_ms);
    let sources: Vec<Arc<dyn JobSource>> = vec![
        Arc::new(
            LinkedInSource::new(config.keywords.clone())
                .with_endpoint(config.linkedin_url.clone())
                .with_request_delay(request_delay),
        ),
        Arc::new(
            IndeedSource::new(config.keywords.clone())
                .with_endpoint(config.indeed_url.clone())
                .with_request_delay(request_delay),
        ),
    ];

    let api_key = config.resolved_api_key();
    if api_key.is_none() {
        tracing::info!("No API key configured (OPENAI_API_KEY); skipping the AI summary");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let bundle = config.bundle;
    let model = config.model.clone();
    let mut pipeline = MarketPipeline::new(storage, config, sources);
    if let Some(api_key) = api_key {
        pipeline = pipeline.with_summarizer(OpenAiSummarizer::new(api_key, model));
    }
    if bundle {
        pipeline = pipeline.with_bundle("job_market_analysis.zip");
    }

    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report_path) => {
            tracing::info!("✅ Job market analysis completed successfully!");
            println!("✅ Job market analysis completed successfully!");
            println!("📁 Report saved to: {}", report_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                jobscope::utils::error::ErrorSeverity::Low => 0,
                jobscope::utils::error::ErrorSeverity::Medium => 2,
                jobscope::utils::error::ErrorSeverity::High => 1,
                jobscope::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
