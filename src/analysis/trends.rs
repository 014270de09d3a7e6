use crate::domain::model::{
    FrequencyEntry, JobPosting, MarketAnalysis, RecruiterInsights, SalaryAnalysis,
};
use std::collections::HashMap;

/// Aggregates collected postings into ranked market statistics.
pub struct TrendAnalyzer {
    top_n: usize,
}

impl TrendAnalyzer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn analyze(&self, jobs: &[JobPosting]) -> MarketAnalysis {
        MarketAnalysis {
            total_jobs: jobs.len(),
            top_technologies: self.top_items(jobs.iter().flat_map(|j| j.technologies.clone())),
            top_frameworks: self.top_items(jobs.iter().flat_map(|j| j.frameworks.clone())),
            top_certifications: self.top_items(jobs.iter().flat_map(|j| j.certifications.clone())),
            top_companies: self.top_items(jobs.iter().map(|j| j.company.clone())),
            top_locations: self.top_items(jobs.iter().map(|j| j.location.clone())),
            salary_analysis: self.analyze_salaries(jobs),
            recruiter_insights: self.analyze_recruiters(jobs),
        }
    }

    /// Ranked frequency count, truncated to `top_n`. Ties break
    /// alphabetically so output is deterministic.
    fn top_items(&self, items: impl IntoIterator<Item = String>) -> Vec<FrequencyEntry> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for item in items {
            *counts.entry(item).or_insert(0) += 1;
        }

        let mut entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(name, count)| FrequencyEntry { name, count })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        entries.truncate(self.top_n);
        entries
    }

    fn analyze_salaries(&self, jobs: &[JobPosting]) -> SalaryAnalysis {
        let salaries: Vec<String> = jobs.iter().filter_map(|j| j.salary_range.clone()).collect();

        SalaryAnalysis {
            total_with_salary: salaries.len(),
            percentage_with_salary: percentage(salaries.len(), jobs.len()),
            salary_ranges: self.top_items(salaries),
        }
    }

    fn analyze_recruiters(&self, jobs: &[JobPosting]) -> RecruiterInsights {
        let recruiters: Vec<String> = jobs.iter().filter_map(|j| j.recruiter.clone()).collect();

        RecruiterInsights {
            total_with_recruiter_info: recruiters.len(),
            percentage_with_recruiter_info: percentage(recruiters.len(), jobs.len()),
            top_recruiters: self.top_items(recruiters),
        }
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new(10)
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
