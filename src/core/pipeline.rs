use crate::analysis::recommend::RecommendationEngine;
use crate::analysis::trends::TrendAnalyzer;
use crate::domain::model::{
    AnalysisOutput, AnalysisReport, JobPosting, ReportMetadata,
};
use crate::domain::ports::{ConfigProvider, JobSource, Pipeline, Storage};
use crate::llm::OpenAiSummarizer;
use crate::utils::error::{AgentError, Result};
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use zip::write::{FileOptions, ZipWriter};

/// Collects postings from every configured job board, aggregates them into
/// a market report, and persists the report files.
pub struct MarketPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    sources: Vec<Arc<dyn JobSource>>,
    summarizer: Option<OpenAiSummarizer>,
    write_json: bool,
    write_csv: bool,
    bundle_filename: Option<String>,
}

impl<S: Storage, C: ConfigProvider> MarketPipeline<S, C> {
    pub fn new(storage: S, config: C, sources: Vec<Arc<dyn JobSource>>) -> Self {
        Self {
            storage,
            config,
            sources,
            summarizer: None,
            write_json: true,
            write_csv: true,
            bundle_filename: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: OpenAiSummarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Restrict which report files are written ("json", "csv").
    pub fn with_formats(mut self, formats: &[String]) -> Self {
        self.write_json = formats.iter().any(|f| f == "json");
        self.write_csv = formats.iter().any(|f| f == "csv");
        self
    }

    /// Additionally bundle the report files into one zip archive.
    pub fn with_bundle(mut self, filename: impl Into<String>) -> Self {
        self.bundle_filename = Some(filename.into());
        self
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MarketPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<JobPosting>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_requests().max(1)));
        let mut tasks = JoinSet::new();

        for location in self.config.locations() {
            for source in &self.sources {
                let source = Arc::clone(source);
                let semaphore = Arc::clone(&semaphore);
                let location = location.clone();
                let limit = self.config.limit_per_site();

                tasks.spawn(async move {
                    // The semaphore is never closed, so acquisition cannot fail.
                    let _permit = semaphore.acquire_owned().await.ok();

                    let site = source.name().to_string();
                    match source.fetch_jobs(&location, limit).await {
                        Ok(jobs) => {
                            tracing::info!("{} {}: {} jobs collected", site, location, jobs.len());
                            jobs
                        }
                        Err(e) => {
                            tracing::error!("{} {}: collection failed: {}", site, location, e);
                            Vec::new()
                        }
                    }
                });
            }
        }

        let mut all_jobs = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(jobs) => all_jobs.extend(jobs),
                Err(e) => tracing::error!("Collection task failed: {}", e),
            }
        }

        Ok(all_jobs)
    }

    async fn transform(&self, jobs: Vec<JobPosting>) -> Result<AnalysisOutput> {
        tracing::debug!("Analyzing {} collected postings", jobs.len());

        let analysis = TrendAnalyzer::new(self.config.top_n()).analyze(&jobs);
        let recommendations = RecommendationEngine::generate(&analysis);

        // Best-effort: a failed summary never sinks the report.
        let ai_summary = match &self.summarizer {
            Some(summarizer) => match summarizer.summarize(&analysis, &recommendations).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!("AI summary unavailable: {}", e);
                    None
                }
            },
            None => None,
        };

        let metadata = ReportMetadata {
            total_jobs_collected: jobs.len(),
            keywords_used: self.config.keywords().to_vec(),
            locations_searched: self.config.locations().to_vec(),
            analysis_date: Utc::now().to_rfc3339(),
        };

        let jobs_csv = jobs_to_csv(&jobs)?;

        Ok(AnalysisOutput {
            report: AnalysisReport {
                metadata,
                market_analysis: analysis,
                recommendations,
                ai_summary,
                jobs,
            },
            jobs_csv,
        })
    }

    async fn load(&self, output: AnalysisOutput) -> Result<String> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let report_filename = format!("job_market_analysis_{}.json", timestamp);
        let csv_filename = format!("jobs_data_{}.csv", timestamp);

        let report_json = serde_json::to_string_pretty(&output.report)?;

        if self.write_json {
            self.storage
                .write_file(&report_filename, report_json.as_bytes())
                .await?;
        }

        if self.write_csv {
            self.storage
                .write_file(&csv_filename, output.jobs_csv.as_bytes())
                .await?;
        }

        if let Some(bundle_filename) = &self.bundle_filename {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                if self.write_json {
                    zip.start_file::<_, ()>(report_filename.as_str(), FileOptions::default())?;
                    zip.write_all(report_json.as_bytes())?;
                }

                if self.write_csv {
                    zip.start_file::<_, ()>(csv_filename.as_str(), FileOptions::default())?;
                    zip.write_all(output.jobs_csv.as_bytes())?;
                }

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing report bundle ({} bytes)", zip_data.len());
            self.storage.write_file(bundle_filename, &zip_data).await?;
        }

        Ok(format!("{}/{}", self.config.output_path(), report_filename))
    }
}

/// Flat CSV row; list fields are joined with ';'.
#[derive(Serialize)]
struct CsvJobRow<'a> {
    title: &'a str,
    company: &'a str,
    location: &'a str,
    technologies: String,
    frameworks: String,
    certifications: String,
    salary_range: &'a str,
    date_posted: &'a str,
    recruiter: &'a str,
    url: &'a str,
    description: &'a str,
}

pub fn jobs_to_csv(jobs: &[JobPosting]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for job in jobs {
        writer.serialize(CsvJobRow {
            title: &job.title,
            company: &job.company,
            location: &job.location,
            technologies: job.technologies.join(";"),
            frameworks: job.frameworks.join(";"),
            certifications: job.certifications.join(";"),
            salary_range: job.salary_range.as_deref().unwrap_or(""),
            date_posted: &job.date_posted,
            recruiter: job.recruiter.as_deref().unwrap_or(""),
            url: &job.url,
            description: &job.description,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AgentError::ProcessingError {
            message: format!("CSV buffer flush failed: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| AgentError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use crate::llm::OpenAiSummarizer;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_names(&self) -> Vec<String> {
            let files = self.files.lock().await;
            let mut names: Vec<String> = files.keys().cloned().collect();
            names.sort();
            names
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                AgentError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct StaticSource {
        name: String,
        jobs_per_location: usize,
        technologies: Vec<String>,
        fail: bool,
    }

    impl StaticSource {
        fn new(name: &str, jobs_per_location: usize, technologies: &[&str]) -> Self {
            Self {
                name: name.to_string(),
                jobs_per_location,
                technologies: technologies.iter().map(|s| s.to_string()).collect(),
                fail: false,
            }
        }

        fn failing(name: &str) -> Self {
            Self {
                name: name.to_string(),
                jobs_per_location: 0,
                technologies: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl JobSource for StaticSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn fetch_jobs(
            &self,
            location: &str,
            limit_per_site: usize,
        ) -> Result<Vec<JobPosting>> {
            if self.fail {
                return Err(AgentError::ScrapeError {
                    site: self.name.clone(),
                    message: "boom".to_string(),
                });
            }

            Ok((0..self.jobs_per_location.min(limit_per_site))
                .map(|i| JobPosting {
                    title: format!("{} job {}", self.name, i),
                    company: format!("{} Corp", self.name),
                    location: location.to_string(),
                    description: String::new(),
                    technologies: self.technologies.clone(),
                    frameworks: Vec::new(),
                    certifications: Vec::new(),
                    salary_range: None,
                    date_posted: "2026-08-06".to_string(),
                    recruiter: None,
                    url: format!("https://example.com/{}/{}", self.name, i),
                })
                .collect())
        }
    }

    fn test_config() -> AgentConfig {
        AgentConfig {
            keywords: vec!["Rust Developer".to_string()],
            locations: vec!["Paris".to_string(), "Lyon".to_string()],
            limit_per_site: 10,
            concurrent_requests: 2,
            top_n: 10,
            output_path: "test_output".to_string(),
        }
    }

    #[tokio::test]
    async fn test_extract_merges_all_sources_and_locations() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(StaticSource::new("alpha", 2, &["Rust"])),
            Arc::new(StaticSource::new("beta", 3, &["Python"])),
        ];

        let pipeline = MarketPipeline::new(MockStorage::new(), test_config(), sources);
        let jobs = pipeline.extract().await.unwrap();

        // 2 locations x (2 + 3) jobs.
        assert_eq!(jobs.len(), 10);
    }

    #[tokio::test]
    async fn test_extract_survives_failing_source() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(StaticSource::new("alpha", 1, &["Rust"])),
            Arc::new(StaticSource::failing("broken")),
        ];

        let pipeline = MarketPipeline::new(MockStorage::new(), test_config(), sources);
        let jobs = pipeline.extract().await.unwrap();

        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_honors_limit_per_site() {
        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 50, &["Rust"]))];

        let mut config = test_config();
        config.limit_per_site = 5;
        config.locations = vec!["Paris".to_string()];

        let pipeline = MarketPipeline::new(MockStorage::new(), config, sources);
        let jobs = pipeline.extract().await.unwrap();

        assert_eq!(jobs.len(), 5);
    }

    #[tokio::test]
    async fn test_transform_builds_report_and_csv() {
        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 2, &["Rust", "Python"]))];
        let pipeline = MarketPipeline::new(MockStorage::new(), test_config(), sources);

        let jobs = pipeline.extract().await.unwrap();
        let output = pipeline.transform(jobs).await.unwrap();

        let report = &output.report;
        assert_eq!(report.metadata.total_jobs_collected, 4);
        assert_eq!(report.metadata.keywords_used, vec!["Rust Developer"]);
        assert_eq!(report.market_analysis.total_jobs, 4);
        assert_eq!(report.market_analysis.top_technologies.len(), 2);
        assert!(report.ai_summary.is_none());
        assert_eq!(report.jobs.len(), 4);

        let mut lines = output.jobs_csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("title,company,location,technologies"));
        assert_eq!(lines.count(), 4);
        assert!(output.jobs_csv.contains("Rust;Python"));
    }

    #[tokio::test]
    async fn test_transform_with_summarizer_attaches_summary() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"content": "A promising market."}}]
                }));
        });

        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 1, &["Rust"]))];
        let summarizer =
            OpenAiSummarizer::new("sk-test", "gpt-4o-mini").with_endpoint(server.base_url());
        let pipeline = MarketPipeline::new(MockStorage::new(), test_config(), sources)
            .with_summarizer(summarizer);

        let jobs = pipeline.extract().await.unwrap();
        let output = pipeline.transform(jobs).await.unwrap();

        assert_eq!(output.report.ai_summary.as_deref(), Some("A promising market."));
    }

    #[tokio::test]
    async fn test_transform_summary_failure_is_non_fatal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500);
        });

        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 1, &["Rust"]))];
        let summarizer =
            OpenAiSummarizer::new("sk-test", "gpt-4o-mini").with_endpoint(server.base_url());
        let pipeline = MarketPipeline::new(MockStorage::new(), test_config(), sources)
            .with_summarizer(summarizer);

        let jobs = pipeline.extract().await.unwrap();
        let output = pipeline.transform(jobs).await.unwrap();

        assert!(output.report.ai_summary.is_none());
    }

    #[tokio::test]
    async fn test_load_writes_json_and_csv() {
        let storage = MockStorage::new();
        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 1, &["Rust"]))];
        let pipeline = MarketPipeline::new(storage.clone(), test_config(), sources);

        let jobs = pipeline.extract().await.unwrap();
        let output = pipeline.transform(jobs).await.unwrap();
        let report_path = pipeline.load(output).await.unwrap();

        assert!(report_path.starts_with("test_output/job_market_analysis_"));
        assert!(report_path.ends_with(".json"));

        let names = storage.file_names().await;
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("job_market_analysis_"));
        assert!(names[1].starts_with("jobs_data_"));

        // The JSON report round-trips.
        let report_bytes = storage.get_file(&names[0]).await.unwrap();
        let report: crate::domain::model::AnalysisReport =
            serde_json::from_slice(&report_bytes).unwrap();
        assert_eq!(report.metadata.total_jobs_collected, 2);
    }

    #[tokio::test]
    async fn test_load_json_only_format() {
        let storage = MockStorage::new();
        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 1, &["Rust"]))];
        let pipeline = MarketPipeline::new(storage.clone(), test_config(), sources)
            .with_formats(&["json".to_string()]);

        let jobs = pipeline.extract().await.unwrap();
        let output = pipeline.transform(jobs).await.unwrap();
        pipeline.load(output).await.unwrap();

        let names = storage.file_names().await;
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("job_market_analysis_"));
    }

    #[tokio::test]
    async fn test_load_bundle_contains_both_files() {
        let storage = MockStorage::new();
        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(StaticSource::new("alpha", 1, &["Rust"]))];
        let pipeline = MarketPipeline::new(storage.clone(), test_config(), sources)
            .with_bundle("job_market_analysis.zip");

        let jobs = pipeline.extract().await.unwrap();
        let output = pipeline.transform(jobs).await.unwrap();
        pipeline.load(output).await.unwrap();

        let zip_data = storage.get_file("job_market_analysis.zip").await.unwrap();
        let cursor = std::io::Cursor::new(zip_data);
        let archive = zip::ZipArchive::new(cursor).unwrap();

        assert_eq!(archive.len(), 2);
        let mut bundled: Vec<String> = archive.file_names().map(|n| n.to_string()).collect();
        bundled.sort();
        assert!(bundled[0].starts_with("job_market_analysis_"));
        assert!(bundled[1].starts_with("jobs_data_"));
    }

    #[test]
    fn test_jobs_to_csv_escapes_and_joins() {
        let jobs = vec![JobPosting {
            title: "Engineer, Senior".to_string(),
            company: "Acme".to_string(),
            location: "Paris".to_string(),
            description: "line one\nline two".to_string(),
            technologies: vec!["Rust".to_string(), "SQL".to_string()],
            frameworks: Vec::new(),
            certifications: Vec::new(),
            salary_range: Some("$90k - $120k".to_string()),
            date_posted: "2026-08-06".to_string(),
            recruiter: None,
            url: "https://example.com/1".to_string(),
        }];

        let csv_output = jobs_to_csv(&jobs).unwrap();

        assert!(csv_output.contains("\"Engineer, Senior\""));
        assert!(csv_output.contains("Rust;SQL"));
        assert!(csv_output.contains("$90k - $120k"));
    }

    #[test]
    fn test_jobs_to_csv_empty_input_is_headerless() {
        // csv::Writer only emits headers once a record is serialized.
        let csv_output = jobs_to_csv(&[]).unwrap();
        assert!(csv_output.is_empty());
    }
}
