mod common;

use common::*;
use httpmock::prelude::*;
use jobscope::core::pipeline::MarketPipeline;
use jobscope::domain::model::AnalysisReport;
use jobscope::domain::ports::JobSource;
use jobscope::llm::OpenAiSummarizer;
use jobscope::sources::{IndeedSource, LinkedInSource};
use jobscope::{AgentConfig, AnalysisEngine, LocalStorage};
use std::sync::Arc;
use tempfile::TempDir;

fn test_config(output_path: &str) -> AgentConfig {
    AgentConfig {
        keywords: vec!["Rust".to_string()],
        locations: vec!["Paris".to_string()],
        limit_per_site: 10,
        concurrent_requests: 2,
        top_n: 10,
        output_path: output_path.to_string(),
    }
}

fn find_report_files(output_path: &std::path::Path) -> (Option<String>, Option<String>) {
    let mut json_file = None;
    let mut csv_file = None;
    for entry in std::fs::read_dir(output_path).unwrap() {
        let name = entry.unwrap().file_name().to_string_lossy().to_string();
        if name.starts_with("job_market_analysis_") && name.ends_with(".json") {
            json_file = Some(name);
        } else if name.starts_with("jobs_data_") && name.ends_with(".csv") {
            csv_file = Some(name);
        }
    }
    (json_file, csv_file)
}

#[tokio::test]
async fn test_end_to_end_analysis_with_both_sources() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();

    // LinkedIn: one posting with a rich description.
    let linkedin_detail_url = server.url("/jobs/view/1");
    server.mock(|when, then| {
        when.method(GET).path("/jobs/view/1");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(linkedin_detail_page(
                "Senior Rust and Python engineer. Kubernetes and AWS required. \
                 Salary $120,000 - $150,000. Contact talent@acme.example.com",
            ));
    });
    server.mock(|when, then| {
        when.method(GET).path("/jobs/search");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(linkedin_search_page(&[(
                "Senior Rust Engineer",
                "Acme",
                "Paris",
                &linkedin_detail_url,
            )]));
    });

    // Indeed: one posting with a relative link.
    server.mock(|when, then| {
        when.method(GET).path("/viewjob");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(indeed_detail_page("Python and Django, Docker a plus."));
    });
    server.mock(|when, then| {
        when.method(GET).path("/emplois");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(indeed_search_page(&[(
                "Python Developer",
                "Globex",
                "Paris",
                "/viewjob?jk=7",
            )]));
    });

    mock_openai(&server, "Rust and Python dominate this market.");

    let sources: Vec<Arc<dyn JobSource>> = vec![
        Arc::new(
            LinkedInSource::new(vec!["Rust".to_string()])
                .with_endpoint(server.url("/jobs/search")),
        ),
        Arc::new(IndeedSource::new(vec!["Rust".to_string()]).with_endpoint(server.url("/emplois"))),
    ];

    let storage = LocalStorage::new(output_path.clone());
    let summarizer =
        OpenAiSummarizer::new("sk-test", "gpt-4o-mini").with_endpoint(server.base_url());
    let pipeline = MarketPipeline::new(storage, test_config(&output_path), sources)
        .with_summarizer(summarizer);
    let engine = AnalysisEngine::new_with_monitoring(pipeline, false);

    let report_path = engine.run().await.unwrap();
    assert!(report_path.contains("job_market_analysis_"));

    let (json_file, csv_file) = find_report_files(temp_dir.path());
    let json_file = json_file.expect("JSON report not written");
    let csv_file = csv_file.expect("CSV report not written");

    // The JSON report carries both postings and the AI summary.
    let report_bytes = std::fs::read(temp_dir.path().join(&json_file)).unwrap();
    let report: AnalysisReport = serde_json::from_slice(&report_bytes).unwrap();

    assert_eq!(report.metadata.total_jobs_collected, 2);
    assert_eq!(report.metadata.keywords_used, vec!["Rust"]);
    assert_eq!(report.metadata.locations_searched, vec!["Paris"]);
    assert_eq!(report.market_analysis.total_jobs, 2);
    assert_eq!(
        report.ai_summary.as_deref(),
        Some("Rust and Python dominate this market.")
    );

    let python_count = report
        .market_analysis
        .top_technologies
        .iter()
        .find(|e| e.name == "Python")
        .map(|e| e.count);
    assert_eq!(python_count, Some(2));

    assert_eq!(report.market_analysis.salary_analysis.total_with_salary, 1);
    assert_eq!(
        report.market_analysis.recruiter_insights.top_recruiters[0].name,
        "talent@acme.example.com"
    );

    // Both jobs are in the CSV, with list fields joined.
    let csv_content = std::fs::read_to_string(temp_dir.path().join(&csv_file)).unwrap();
    assert!(csv_content.contains("Senior Rust Engineer"));
    assert!(csv_content.contains("Python Developer"));
    assert!(csv_content.contains("Kubernetes"));

    // The raw JSON uses the original report field names.
    let raw: serde_json::Value = serde_json::from_slice(&report_bytes).unwrap();
    assert!(raw.get("ai_recommendations").is_some());
    assert!(raw.get("raw_jobs_data").is_some());
}

#[tokio::test]
async fn test_end_to_end_with_unreachable_boards_still_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/jobs/search");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/emplois");
        then.status(500);
    });

    let sources: Vec<Arc<dyn JobSource>> = vec![
        Arc::new(
            LinkedInSource::new(vec!["Rust".to_string()])
                .with_endpoint(server.url("/jobs/search")),
        ),
        Arc::new(IndeedSource::new(vec!["Rust".to_string()]).with_endpoint(server.url("/emplois"))),
    ];

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = MarketPipeline::new(storage, test_config(&output_path), sources);
    let engine = AnalysisEngine::new(pipeline);

    // Collection failures degrade to an empty (but valid) report.
    engine.run().await.unwrap();

    let (json_file, csv_file) = find_report_files(temp_dir.path());
    let report_bytes = std::fs::read(temp_dir.path().join(json_file.unwrap())).unwrap();
    let report: AnalysisReport = serde_json::from_slice(&report_bytes).unwrap();

    assert_eq!(report.metadata.total_jobs_collected, 0);
    assert_eq!(report.market_analysis.total_jobs, 0);
    assert_eq!(
        report.market_analysis.salary_analysis.percentage_with_salary,
        0.0
    );
    assert!(report.recommendations.top_skills_to_learn.is_empty());
    assert_eq!(report.recommendations.recruiter_networking_tips.len(), 5);

    // CSV exists and is empty (headers appear only with records).
    let csv_content = std::fs::read_to_string(temp_dir.path().join(csv_file.unwrap())).unwrap();
    assert!(csv_content.is_empty());
}

#[tokio::test]
async fn test_end_to_end_bundle_and_monitoring() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let detail_url = server.url("/jobs/view/1");
    server.mock(|when, then| {
        when.method(GET).path("/jobs/view/1");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(linkedin_detail_page("Rust all day."));
    });
    server.mock(|when, then| {
        when.method(GET).path("/jobs/search");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(linkedin_search_page(&[(
                "Rust Engineer",
                "Acme",
                "Paris",
                &detail_url,
            )]));
    });

    let sources: Vec<Arc<dyn JobSource>> = vec![Arc::new(
        LinkedInSource::new(vec!["Rust".to_string()]).with_endpoint(server.url("/jobs/search")),
    )];

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = MarketPipeline::new(storage, test_config(&output_path), sources)
        .with_bundle("job_market_analysis.zip");
    let engine = AnalysisEngine::new_with_monitoring(pipeline, true);

    engine.run().await.unwrap();

    let bundle_path = temp_dir.path().join("job_market_analysis.zip");
    assert!(bundle_path.exists());

    let zip_bytes = std::fs::read(&bundle_path).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
    assert_eq!(archive.len(), 2);
}
