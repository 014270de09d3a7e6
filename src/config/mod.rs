pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;

/// The original agent's default search configuration.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "Python Developer",
    "Java Developer",
    "JavaScript Developer",
    "Data Scientist",
    "Machine Learning Engineer",
    "DevOps Engineer",
    "Full Stack Developer",
    "Backend Developer",
    "Frontend Developer",
    "AI Engineer",
    "Cloud Engineer",
    "Cybersecurity Analyst",
    "Deep Learning",
];

pub const DEFAULT_LOCATIONS: &[&str] = &["Paris", "Lyon", "Marseille"];

pub const DEFAULT_LIMIT_PER_SITE: usize = 50;

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

pub fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::{default_keywords, default_locations, DEFAULT_LIMIT_PER_SITE};
    use crate::domain::ports::ConfigProvider;
    use crate::sources::{INDEED_SEARCH_URL, LINKEDIN_SEARCH_URL};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_string, validate_path, validate_positive_number, validate_range,
        validate_url, Validate,
    };
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "jobscope")]
    #[command(about = "Job market analysis: collect postings, rank skills, summarize trends")]
    pub struct CliConfig {
        /// Search keywords (comma separated); defaults to the built-in set
        #[arg(long, value_delimiter = ',')]
        pub keywords: Vec<String>,

        /// Locations to search (comma separated)
        #[arg(long, value_delimiter = ',')]
        pub locations: Vec<String>,

        /// Maximum postings per keyword and site
        #[arg(long, default_value_t = DEFAULT_LIMIT_PER_SITE)]
        pub limit_per_site: usize,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, default_value = "5")]
        pub concurrent_requests: usize,

        /// Entries kept per ranked statistic
        #[arg(long, default_value = "10")]
        pub top_n: usize,

        #[arg(long, default_value = LINKEDIN_SEARCH_URL)]
        pub linkedin_url: String,

        #[arg(long, default_value = INDEED_SEARCH_URL)]
        pub indeed_url: String,

        /// Pause between successive page fetches of one source
        #[arg(long, default_value = "1000")]
        pub request_delay_ms: u64,

        /// OpenAI API key; falls back to OPENAI_API_KEY
        #[arg(long)]
        pub api_key: Option<String>,

        #[arg(long, default_value = crate::llm::DEFAULT_MODEL)]
        pub model: String,

        /// Bundle the report files into a zip archive
        #[arg(long)]
        pub bundle: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU/memory usage per phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Fill empty keyword/location lists with the built-in defaults.
        pub fn apply_defaults(&mut self) {
            if self.keywords.is_empty() {
                self.keywords = default_keywords();
            }
            if self.locations.is_empty() {
                self.locations = default_locations();
            }
        }

        /// Resolved API key: flag first, then environment.
        pub fn resolved_api_key(&self) -> Option<String> {
            self.api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .filter(|key| !key.trim().is_empty())
        }
    }

    impl ConfigProvider for CliConfig {
        fn keywords(&self) -> &[String] {
            &self.keywords
        }

        fn locations(&self) -> &[String] {
            &self.locations
        }

        fn limit_per_site(&self) -> usize {
            self.limit_per_site
        }

        fn concurrent_requests(&self) -> usize {
            self.concurrent_requests
        }

        fn top_n(&self) -> usize {
            self.top_n
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("linkedin_url", &self.linkedin_url)?;
            validate_url("indeed_url", &self.indeed_url)?;
            validate_path("output_path", &self.output_path)?;
            validate_positive_number("limit_per_site", self.limit_per_site, 1)?;
            validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
            validate_range("top_n", self.top_n, 1, 100)?;

            for keyword in &self.keywords {
                validate_non_empty_string("keywords", keyword)?;
            }
            for location in &self.locations {
                validate_non_empty_string("locations", location)?;
            }

            Ok(())
        }
    }

}

/// Static configuration used by `JobMarketAgent` and tests.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub limit_per_site: usize,
    pub concurrent_requests: usize,
    pub top_n: usize,
    pub output_path: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            locations: default_locations(),
            limit_per_site: DEFAULT_LIMIT_PER_SITE,
            concurrent_requests: 5,
            top_n: 10,
            output_path: "./output".to_string(),
        }
    }
}

impl ConfigProvider for AgentConfig {
    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn locations(&self) -> &[String] {
        &self.locations
    }

    fn limit_per_site(&self) -> usize {
        self.limit_per_site
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}
