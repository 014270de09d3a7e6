use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AgentError, Result};
use crate::utils::validation::{
    validate_allowed_values, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analysis profile loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub profile: ProfileConfig,
    pub search: SearchConfig,
    pub sources: Option<SourcesConfig>,
    pub analysis: Option<AnalysisConfig>,
    pub llm: Option<LlmConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub limit_per_site: Option<usize>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub linkedin: Option<SourceEntry>,
    pub indeed: Option<SourceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub request_delay_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub enabled: Option<bool>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AgentError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AgentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` references so profiles can say
    /// `api_key = "${OPENAI_API_KEY}"` instead of embedding credentials.
    /// Unknown variables are left untouched.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static VAR: OnceLock<Regex> = OnceLock::new();
        let re = VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("load.output_path", &self.load.output_path)?;
        validate_allowed_values("load.output_formats", &self.load.output_formats, &["json", "csv"])?;

        if self.search.keywords.is_empty() {
            return Err(AgentError::MissingConfigError {
                field: "search.keywords".to_string(),
            });
        }
        for keyword in &self.search.keywords {
            validate_non_empty_string("search.keywords", keyword)?;
        }
        if self.search.locations.is_empty() {
            return Err(AgentError::MissingConfigError {
                field: "search.locations".to_string(),
            });
        }

        validate_positive_number("search.limit_per_site", self.limit_per_site(), 1)?;
        validate_positive_number("search.concurrent_requests", self.concurrent_requests(), 1)?;
        validate_range("analysis.top_n", self.top_n(), 1, 100)?;

        if let Some(sources) = &self.sources {
            for (field, entry) in [
                ("sources.linkedin.endpoint", &sources.linkedin),
                ("sources.indeed.endpoint", &sources.indeed),
            ] {
                if let Some(endpoint) = entry.as_ref().and_then(|e| e.endpoint.as_deref()) {
                    validate_url(field, endpoint)?;
                }
            }
        }

        if self.llm_enabled() {
            let llm = self.llm.as_ref().ok_or_else(|| AgentError::MissingConfigError {
                field: "llm".to_string(),
            })?;
            let api_key = validate_required_field("llm.api_key", &llm.api_key)?;
            validate_non_empty_string("llm.api_key", api_key)?;
            if let Some(endpoint) = &llm.endpoint {
                validate_url("llm.endpoint", endpoint)?;
            }
        }

        Ok(())
    }

    pub fn limit_per_site(&self) -> usize {
        self.search
            .limit_per_site
            .unwrap_or(super::DEFAULT_LIMIT_PER_SITE)
    }

    pub fn source_enabled(&self, pick: fn(&SourcesConfig) -> &Option<SourceEntry>) -> bool {
        self.sources
            .as_ref()
            .map(|s| pick(s).as_ref().and_then(|e| e.enabled).unwrap_or(true))
            .unwrap_or(true)
    }

    pub fn linkedin_enabled(&self) -> bool {
        self.source_enabled(|s| &s.linkedin)
    }

    pub fn indeed_enabled(&self) -> bool {
        self.source_enabled(|s| &s.indeed)
    }

    pub fn source_entry(
        &self,
        pick: fn(&SourcesConfig) -> &Option<SourceEntry>,
    ) -> Option<&SourceEntry> {
        self.sources.as_ref().and_then(|s| pick(s).as_ref())
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.as_ref().and_then(|l| l.enabled).unwrap_or(false)
    }

    pub fn llm_api_key(&self) -> Option<&str> {
        self.llm.as_ref().and_then(|l| l.api_key.as_deref())
    }

    pub fn llm_model(&self) -> &str {
        self.llm
            .as_ref()
            .and_then(|l| l.model.as_deref())
            .unwrap_or(crate::llm::DEFAULT_MODEL)
    }

    pub fn llm_endpoint(&self) -> Option<&str> {
        self.llm.as_ref().and_then(|l| l.endpoint.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn compression(&self) -> Option<&CompressionConfig> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.load.output_formats.iter().any(|f| f == format)
    }
}

impl ConfigProvider for TomlConfig {
    fn keywords(&self) -> &[String] {
        &self.search.keywords
    }

    fn locations(&self) -> &[String] {
        &self.search.locations
    }

    fn limit_per_site(&self) -> usize {
        self.limit_per_site()
    }

    fn concurrent_requests(&self) -> usize {
        self.search.concurrent_requests.unwrap_or(5)
    }

    fn top_n(&self) -> usize {
        self.analysis.as_ref().and_then(|a| a.top_n).unwrap_or(10)
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
