use crate::domain::model::{MarketAnalysis, Recommendations};
use crate::utils::error::{AgentError, Result};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const PERSONA: &str = "You are an expert job market analyst. Your tone is professional, \
encouraging, and data-driven. Summarize the market snapshot below for a developer planning \
their next career move: call out the technologies worth learning, the certifications worth \
earning, and where the opportunities are.";

/// Narrative summary of an analysis, produced by an OpenAI-compatible
/// chat-completions endpoint. Best-effort: the pipeline ships the report
/// without a summary when this fails.
pub struct OpenAiSummarizer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Point at a different OpenAI-compatible endpoint (proxies, tests).
    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn summarize(
        &self,
        analysis: &MarketAnalysis,
        recommendations: &Recommendations,
    ) -> Result<String> {
        let prompt = build_summary_prompt(analysis, recommendations);

        let request_body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": PERSONA},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.4
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(60))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::LlmError {
                message: format!("OpenAI API error {}: {}", status, error_text),
            });
        }

        let response_json: serde_json::Value = response.json().await?;

        response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| AgentError::LlmError {
                message: "No content in OpenAI response".to_string(),
            })
    }
}

/// The market snapshot handed to the model, one ranked section per line.
pub fn build_summary_prompt(
    analysis: &MarketAnalysis,
    recommendations: &Recommendations,
) -> String {
    let format_entries = |entries: &[crate::domain::model::FrequencyEntry]| -> String {
        if entries.is_empty() {
            return "none observed".to_string();
        }
        entries
            .iter()
            .map(|e| format!("{} ({})", e.name, e.count))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = Vec::new();
    lines.push(format!("Total job postings analyzed: {}", analysis.total_jobs));
    lines.push(format!(
        "Top technologies: {}",
        format_entries(&analysis.top_technologies)
    ));
    lines.push(format!(
        "Top frameworks: {}",
        format_entries(&analysis.top_frameworks)
    ));
    lines.push(format!(
        "Top certifications: {}",
        format_entries(&analysis.top_certifications)
    ));
    lines.push(format!(
        "Hiring locations: {}",
        format_entries(&analysis.top_locations)
    ));
    lines.push(format!(
        "Postings with salary information: {} ({:.1}%)",
        analysis.salary_analysis.total_with_salary,
        analysis.salary_analysis.percentage_with_salary
    ));

    if !recommendations.top_skills_to_learn.is_empty() {
        let skills = recommendations
            .top_skills_to_learn
            .iter()
            .map(|s| format!("{} ({:?} priority)", s.technology, s.priority))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Preliminary skill priorities: {}", skills));
    }

    lines.join("\n")
}
