use serde::{Deserialize, Serialize};

/// A single job posting collected from a job board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub frameworks: Vec<String>,
    pub certifications: Vec<String>,
    pub salary_range: Option<String>,
    pub date_posted: String,
    pub recruiter: Option<String>,
    pub url: String,
}

/// One entry of a ranked frequency count (count desc, name asc on ties).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryAnalysis {
    pub total_with_salary: usize,
    pub percentage_with_salary: f64,
    pub salary_ranges: Vec<FrequencyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruiterInsights {
    pub total_with_recruiter_info: usize,
    pub percentage_with_recruiter_info: f64,
    pub top_recruiters: Vec<FrequencyEntry>,
}

/// Aggregated view of the collected postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub total_jobs: usize,
    pub top_technologies: Vec<FrequencyEntry>,
    pub top_frameworks: Vec<FrequencyEntry>,
    pub top_certifications: Vec<FrequencyEntry>,
    pub top_companies: Vec<FrequencyEntry>,
    pub top_locations: Vec<FrequencyEntry>,
    pub salary_analysis: SalaryAnalysis,
    pub recruiter_insights: RecruiterInsights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub technology: String,
    pub job_count: usize,
    pub priority: DemandLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkRecommendation {
    pub framework: String,
    pub usage_frequency: usize,
    pub learning_recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationRecommendation {
    pub certification: String,
    pub demand_level: usize,
    pub estimated_roi: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOpportunity {
    pub location: String,
    pub job_availability: usize,
    pub market_attractiveness: DemandLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub top_skills_to_learn: Vec<SkillRecommendation>,
    pub emerging_technologies: Vec<FrameworkRecommendation>,
    pub certification_priorities: Vec<CertificationRecommendation>,
    pub market_opportunities: Vec<MarketOpportunity>,
    pub recruiter_networking_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_jobs_collected: usize,
    pub keywords_used: Vec<String>,
    pub locations_searched: Vec<String>,
    pub analysis_date: String,
}

/// The full analysis report, the value `run_full_analysis` resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub market_analysis: MarketAnalysis,
    #[serde(rename = "ai_recommendations")]
    pub recommendations: Recommendations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(rename = "raw_jobs_data")]
    pub jobs: Vec<JobPosting>,
}

/// Product of the transform stage, consumed by the load stage.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    pub jobs_csv: String,
}
