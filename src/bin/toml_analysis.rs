use clap::Parser;
use jobscope::config::toml_config::TomlConfig;
use jobscope::core::pipeline::MarketPipeline;
use jobscope::domain::ports::{ConfigProvider, JobSource};
use jobscope::llm::OpenAiSummarizer;
use jobscope::sources::{IndeedSource, LinkedInSource};
use jobscope::utils::{logger, validation::Validate};
use jobscope::{AnalysisEngine, LocalStorage};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "toml-analysis")]
#[command(about = "Job market analysis driven by a TOML profile")]
struct Args {
    /// Path to the TOML analysis profile
    #[arg(short, long, default_value = "analysis-profile.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from the profile
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be collected without any network activity
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-driven job market analysis");
    tracing::info!("📁 Loading profile from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load profile '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Profile validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Profile loaded and validated successfully");

    display_profile_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No postings will be collected");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let sources = build_sources(&config);
    if sources.is_empty() {
        eprintln!("❌ All sources are disabled in the profile");
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let formats = config.load.output_formats.clone();
    let bundle = config.compression().map(|c| c.filename.clone());
    let summarizer = build_summarizer(&config);

    let mut pipeline = MarketPipeline::new(storage, config, sources).with_formats(&formats);
    if let Some(summarizer) = summarizer {
        pipeline = pipeline.with_summarizer(summarizer);
    }
    if let Some(filename) = bundle {
        pipeline = pipeline.with_bundle(filename);
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

fn build_sources(config: &TomlConfig) -> Vec<Arc<dyn JobSource>> {
    let mut sources: Vec<Arc<dyn JobSource>> = Vec::new();
    let keywords = config.keywords().to_vec();

    if config.linkedin_enabled() {
        let mut source = LinkedInSource::new(keywords.clone());
        if let Some(entry) = config.source_entry(|s| &s.linkedin) {
            if let Some(endpoint) = &entry.endpoint {
                source = source.with_endpoint(endpoint.clone());
            }
            if let Some(delay_ms) = entry.request_delay_ms {
                source = source.with_request_delay(Duration::from_millis(delay_ms));
            }
            if let Some(timeout) = entry.timeout_seconds {
                source = source.with_timeout(Duration::from_secs(timeout));
            }
        }
        sources.push(Arc::new(source));
    }

    if config.indeed_enabled() {
        let mut source = IndeedSource::new(keywords);
        if let Some(entry) = config.source_entry(|s| &s.indeed) {
            if let Some(endpoint) = &entry.endpoint {
                source = source.with_endpoint(endpoint.clone());
            }
            if let Some(delay_ms) = entry.request_delay_ms {
                source = source.with_request_delay(Duration::from_millis(delay_ms));
            }
            if let Some(timeout) = entry.timeout_seconds {
                source = source.with_timeout(Duration::from_secs(timeout));
            }
        }
        sources.push(Arc::new(source));
    }

    sources
}

fn build_summarizer(config: &TomlConfig) -> Option<OpenAiSummarizer> {
    if !config.llm_enabled() {
        return None;
    }

    let api_key = config.llm_api_key()?;
    let mut summarizer = OpenAiSummarizer::new(api_key, config.llm_model());
    if let Some(endpoint) = config.llm_endpoint() {
        summarizer = summarizer.with_endpoint(endpoint);
    }
    Some(summarizer)
}

fn display_profile_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Profile Summary:");
    println!(
        "  Profile: {} v{}",
        config.profile.name, config.profile.version
    );
    println!("  Keywords: {}", config.keywords().join(", "));
    println!("  Locations: {}", config.locations().join(", "));
    println!("  Limit per site: {}", config.limit_per_site());
    println!(
        "  Sources: linkedin={}, indeed={}",
        config.linkedin_enabled(),
        config.indeed_enabled()
    );
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.load.output_formats.join(", "));
    println!("  AI summary: {}", config.llm_enabled());

    if let Some(compression) = config.compression() {
        println!("  Compression: {} (ZIP)", compression.filename);
    }

    println!("  Concurrent requests: {}", config.concurrent_requests());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
