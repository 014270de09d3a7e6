use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Scraping {site} failed: {message}")]
    ScrapeError { site: String, message: String },

    #[error("LLM API error: {message}")]
    LlmError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Configuration,
    System,
    External,
}

impl AgentError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient: the job board or the LLM endpoint may recover on retry.
            AgentError::HttpError(_)
            | AgentError::ScrapeError { .. }
            | AgentError::LlmError { .. } => ErrorSeverity::Medium,
            AgentError::UrlError(_)
            | AgentError::CsvError(_)
            | AgentError::SerializationError(_)
            | AgentError::ProcessingError { .. } => ErrorSeverity::High,
            AgentError::ConfigError { .. }
            | AgentError::InvalidConfigValueError { .. }
            | AgentError::MissingConfigError { .. } => ErrorSeverity::High,
            AgentError::IoError(_) | AgentError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AgentError::HttpError(_) | AgentError::ScrapeError { .. } => ErrorCategory::Network,
            AgentError::LlmError { .. } => ErrorCategory::External,
            AgentError::UrlError(_)
            | AgentError::CsvError(_)
            | AgentError::SerializationError(_)
            | AgentError::ProcessingError { .. } => ErrorCategory::Parsing,
            AgentError::ConfigError { .. }
            | AgentError::InvalidConfigValueError { .. }
            | AgentError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AgentError::IoError(_) | AgentError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AgentError::HttpError(_) => {
                "Check network connectivity and that the job board endpoints are reachable"
            }
            AgentError::ScrapeError { .. } => {
                "The job board may be rate limiting; increase --request-delay-ms and retry"
            }
            AgentError::LlmError { .. } => {
                "Verify the API key (OPENAI_API_KEY) and the configured model name"
            }
            AgentError::UrlError(_) => "Check the endpoint URLs passed via flags or profile",
            AgentError::CsvError(_) | AgentError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the collected postings"
            }
            AgentError::SerializationError(_) => "Re-run with --verbose to locate the bad record",
            AgentError::ConfigError { .. }
            | AgentError::InvalidConfigValueError { .. }
            | AgentError::MissingConfigError { .. } => "Fix the configuration value and run again",
            AgentError::IoError(_) => "Check that the output path exists and is writable",
            AgentError::ZipError(_) => "Disable report compression or check disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AgentError::HttpError(e) => format!("A network request failed: {}", e),
            AgentError::ScrapeError { site, message } => {
                format!("Could not collect postings from {}: {}", site, message)
            }
            AgentError::LlmError { message } => format!("The AI summary step failed: {}", message),
            AgentError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            other => other.to_string(),
        }
    }
}
